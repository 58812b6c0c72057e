use super::{ReportableSeries, common};
use crate::Result;
use core::fmt::Write;
use std::borrow::Cow;

const HEADER: &str = "Source,Type,Count,Average,Median,Trend,Confidence,Std Dev,Min,Max,Status";

pub fn generate<W: Write>(series: &[ReportableSeries], writer: &mut W) -> Result<()> {
    writeln!(writer, "{HEADER}")?;

    for item in series {
        let metrics = &item.metrics;
        writeln!(
            writer,
            "{},{},{},{},{},{},{:.4},{},{},{},{}",
            escape_csv(&item.source),
            item.metric_type(),
            metrics.count,
            common::format_value(metrics.average),
            common::format_value(metrics.median),
            metrics.trend,
            metrics.confidence,
            common::format_value(metrics.std_dev),
            common::format_value(metrics.min),
            common::format_value(metrics.max),
            common::format_confidence_status(item.low_confidence),
        )?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}
