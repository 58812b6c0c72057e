use super::{ReportableSeries, common};
use crate::Result;
use crate::input::CanonicalSet;
use crate::metrics::Trend;
use core::fmt::Write;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

/// Which sections of each series to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOutputMode {
    pub summary: bool,
    pub values: bool,
}

impl ConsoleOutputMode {
    #[must_use]
    pub const fn full() -> Self {
        Self { summary: true, values: true }
    }
}

pub fn generate<W: Write>(series: &[ReportableSeries], use_colors: bool, mode: &ConsoleOutputMode, writer: &mut W) -> Result<()> {
    for (index, item) in series.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
            writeln!(writer, "═══════════════════════════════════════")?;
            writeln!(writer)?;
        }

        let header = format!("{} ({}, {} values)", item.source, item.metric_type(), item.metrics.count);
        if use_colors {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{header}")?;
        }

        if mode.summary {
            write_summary(writer, item, use_colors)?;
        }

        if mode.values {
            if mode.summary {
                writeln!(writer)?;
            }
            write_values(writer, item, use_colors)?;
        }
    }

    Ok(())
}

fn write_summary<W: Write>(writer: &mut W, item: &ReportableSeries, use_colors: bool) -> Result<()> {
    let metrics = &item.metrics;

    let trend = common::format_trend(metrics.trend);
    let trend = if use_colors {
        match metrics.trend {
            Trend::Positive => trend.green().to_string(),
            Trend::Negative => trend.red().to_string(),
            Trend::Neutral => trend.yellow().to_string(),
        }
    } else {
        trend
    };

    let bar = common::confidence_bar(metrics.confidence, common::CONFIDENCE_BAR_WIDTH);
    let mut confidence = format!("{bar} {}", common::format_percent(metrics.confidence));
    if item.low_confidence {
        let status = common::format_confidence_status(true);
        if use_colors {
            let _ = write!(confidence, "  {}", status.yellow().bold());
        } else {
            let _ = write!(confidence, "  {status}");
        }
    }

    writeln!(writer, "  average    : {}", common::format_value(metrics.average))?;
    writeln!(writer, "  median     : {}", common::format_value(metrics.median))?;
    writeln!(writer, "  trend      : {trend}")?;
    writeln!(writer, "  confidence : {confidence}")?;
    writeln!(
        writer,
        "  range      : {} .. {} (std dev {})",
        common::format_value(metrics.min),
        common::format_value(metrics.max),
        common::format_value(metrics.std_dev)
    )?;

    Ok(())
}

fn write_values<W: Write>(writer: &mut W, item: &ReportableSeries, use_colors: bool) -> Result<()> {
    match &item.data {
        CanonicalSet::Subjective(set) => {
            let max_name_len = set.names().map(str::len).max().unwrap_or(0);
            for rating in set.iter() {
                let points = common::scale_points(rating.value, &item.scale);
                let points = if use_colors { points.cyan().to_string() } else { points };
                writeln!(
                    writer,
                    "  {:<width$} : {points} {}",
                    rating.name,
                    common::format_value(rating.value),
                    width = max_name_len
                )?;
            }
        }
        CanonicalSet::Progress(series) => {
            let values: Vec<String> = series.values().map(common::format_value).collect();
            let max_value_len = values.iter().map(String::len).max().unwrap_or(0);

            // "  " (2) + date (10) + "  " (2) + value + "  " (2)
            let label_indent = 2 + 10 + 2 + max_value_len + 2;
            let term_width = get_terminal_width();

            for (point, value) in series.points().iter().zip(&values) {
                let wrapped = wrap_text(&point.label, term_width, label_indent);
                let mut lines = wrapped.iter();
                let first = lines.next().map_or("", String::as_str);
                writeln!(
                    writer,
                    "  {}  {value:>width$}  {first}",
                    common::format_date(&point.timestamp),
                    width = max_value_len
                )?;
                for line in lines {
                    writeln!(writer, "{line}")?;
                }
            }
        }
    }

    Ok(())
}

/// Get the terminal width, defaulting to 80 if not detectable
fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| w as usize)
}

/// Word-wrap text to fit within a given width, with indentation for continuation lines
fn wrap_text(text: &str, width: usize, indent: usize) -> Vec<String> {
    if width <= indent {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut is_first_line = true;

    for word in text.split_whitespace() {
        let separator_len = usize::from(!current_line.is_empty());
        // every line, the first included, starts at `indent`
        let line_width = indent + current_line.len();

        if !current_line.is_empty() && line_width + separator_len + word.len() > width {
            if is_first_line {
                lines.push(current_line);
                is_first_line = false;
            } else {
                lines.push(format!("{:indent$}{}", "", current_line, indent = indent));
            }
            current_line = word.to_string();
        } else {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        if is_first_line {
            lines.push(current_line);
        } else {
            lines.push(format!("{:indent$}{}", "", current_line, indent = indent));
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
