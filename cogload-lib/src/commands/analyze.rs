use super::Host;
use super::common::{Common, CommonArgs, FailedInput, LOG_TARGET};
use crate::Result;
use crate::binding::MetricsBinding;
use crate::input::{MetricType, RawMetricInput};
use crate::reports::ReportableSeries;
use camino::Utf8PathBuf;
use clap::Parser;
use compact_str::{CompactString, format_compact};
use ohno::{IntoAppError, bail};
use serde_json::Value;
use tokio::io::AsyncReadExt;

/// Source name used for input read from stdin
const STDIN_SOURCE: &str = "<stdin>";

/// File argument that selects stdin
const STDIN_ARG: &str = "-";

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// JSON input files; `-` reads from stdin (default is stdin)
    #[arg(value_name = "FILES")]
    pub files: Vec<Utf8PathBuf>,

    /// Treat every file as a bare payload of this type instead of a `{kind, payload}` envelope
    #[arg(long = "type", value_name = "TYPE")]
    pub metric_type: Option<MetricType>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn analyze_inputs<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let files = input_files(&args.files)?;

    let mut inputs = Vec::new();
    for file in &files {
        let (source, document) = read_document(common.host, file).await?;
        inputs.extend(split_inputs(source, document, args.metric_type)?);
    }

    log::info!(target: LOG_TARGET, "Analyzing {} input(s)", inputs.len());

    let scale = common.scale();
    let mut binding = MetricsBinding::new(common.pipeline());
    let mut series = Vec::with_capacity(inputs.len());
    let mut failed = Vec::new();

    for (source, input) in inputs {
        let state = binding.set_input(&input);
        match (&state.validated, &state.metrics) {
            (Some(data), Some(metrics)) => {
                let low_confidence = common.is_low_confidence(metrics.confidence);
                series.push(ReportableSeries::new(source, data.clone(), *metrics, scale, low_confidence));
            }
            _ => failed.push(FailedInput {
                source,
                message: state.error.clone().unwrap_or_default(),
            }),
        }
    }

    log::info!(
        target: LOG_TARGET,
        "Analyzed {} input(s): {} valid, {} invalid",
        series.len() + failed.len(),
        series.len(),
        failed.len()
    );

    common.report(&series, &failed).await
}

/// The files to read, defaulting to stdin. Stdin can be consumed only once.
fn input_files(files: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>> {
    if files.is_empty() {
        return Ok(vec![Utf8PathBuf::from(STDIN_ARG)]);
    }

    if files.iter().filter(|file| file.as_str() == STDIN_ARG).count() > 1 {
        bail!("stdin ('{STDIN_ARG}') can only be given once");
    }

    Ok(files.to_vec())
}

/// Read and parse one JSON document from a file, or from the host's stdin for `-`
async fn read_document<H: Host>(host: &mut H, file: &Utf8PathBuf) -> Result<(CompactString, Value)> {
    let (source, text) = if file.as_str() == STDIN_ARG {
        let mut text = String::new();
        let _ = host.input().read_to_string(&mut text).await.into_app_err("reading input from stdin")?;
        (CompactString::const_new(STDIN_SOURCE), text)
    } else {
        let text = tokio::fs::read_to_string(file)
            .await
            .into_app_err_with(|| format!("reading input file '{file}'"))?;
        (CompactString::from(file.as_str()), text)
    };

    log::debug!(target: LOG_TARGET, "Read {} byte(s) from {source}", text.len());

    let document = serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON from {source}"))?;
    Ok((source, document))
}

/// Turn a document into the inputs it holds
///
/// With an explicit type the whole document is one payload. Otherwise the
/// document is a `{kind, payload}` envelope or an array of them; array
/// elements are named `source[index]`.
fn split_inputs(source: CompactString, document: Value, metric_type: Option<MetricType>) -> Result<Vec<(CompactString, RawMetricInput)>> {
    if let Some(metric_type) = metric_type {
        return Ok(vec![(source, RawMetricInput::new(metric_type.as_str(), document))]);
    }

    if let Value::Array(items) = document {
        return items
            .into_iter()
            .enumerate()
            .map(|(index, item)| -> Result<(CompactString, RawMetricInput)> {
                let name = format_compact!("{source}[{index}]");
                let input = parse_envelope(&name, item)?;
                Ok((name, input))
            })
            .collect();
    }

    let input = parse_envelope(&source, document)?;
    Ok(vec![(source, input)])
}

fn parse_envelope(source: &str, document: Value) -> Result<RawMetricInput> {
    serde_json::from_value(document)
        .into_app_err_with(|| format!("{source} is not a {{kind, payload}} envelope; use --type for bare payloads"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_files_defaults_to_stdin() {
        assert_eq!(input_files(&[]).unwrap(), vec![Utf8PathBuf::from("-")]);
    }

    #[test]
    fn test_input_files_keeps_order() {
        let files = vec![Utf8PathBuf::from("b.json"), Utf8PathBuf::from("-"), Utf8PathBuf::from("a.json")];
        assert_eq!(input_files(&files).unwrap(), files);
    }

    #[test]
    fn test_input_files_rejects_repeated_stdin() {
        let files = [Utf8PathBuf::from("-"), Utf8PathBuf::from("a.json"), Utf8PathBuf::from("-")];
        let err = input_files(&files).unwrap_err();
        assert!(err.to_string().contains("only be given once"));
    }

    #[test]
    fn test_split_inputs_with_type() {
        let inputs = split_inputs("a.json".into(), json!([1, 2]), Some(MetricType::Progress)).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].0, "a.json");
        assert_eq!(inputs[0].1.kind, "progress");
        assert_eq!(inputs[0].1.payload, json!([1, 2]));
    }

    #[test]
    fn test_split_inputs_single_envelope() {
        let inputs = split_inputs("a.json".into(), json!({"kind": "subjective", "payload": {"x": 1}}), None).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].1.kind, "subjective");
    }

    #[test]
    fn test_split_inputs_envelope_array() {
        let document = json!([
            {"kind": "subjective", "payload": {"x": 1}},
            {"kind": "weekly", "payload": []},
        ]);
        let inputs = split_inputs("all.json".into(), document, None).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].0, "all.json[0]");
        assert_eq!(inputs[1].0, "all.json[1]");
        assert_eq!(inputs[1].1.kind, "weekly");
    }

    #[test]
    fn test_split_inputs_rejects_bare_payload_without_type() {
        assert!(split_inputs("a.json".into(), json!({"x": 1}), None).is_err());
        assert!(split_inputs("a.json".into(), json!([{"timestamp": 1, "value": 2}]), None).is_err());
    }
}
