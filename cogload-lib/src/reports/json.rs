use super::ReportableSeries;
use crate::Result;
use crate::input::CanonicalSet;
use core::fmt::Write;
use serde_json::{Map, Value, json};

#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate<W: Write>(series: &[ReportableSeries], writer: &mut W) -> Result<()> {
    let mut series_data = Vec::with_capacity(series.len());

    for item in series {
        let mut series_obj = Map::new();
        series_obj.insert("source".to_string(), json!(item.source.as_str()));
        series_obj.insert("type".to_string(), json!(item.metric_type().as_str()));
        series_obj.insert("low_confidence".to_string(), json!(item.low_confidence));
        series_obj.insert("metrics".to_string(), serde_json::to_value(item.metrics)?);
        series_obj.insert("values".to_string(), values_to_json(&item.data));
        series_data.push(Value::Object(series_obj));
    }

    let output = json!({
        "series": series_data
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn values_to_json(data: &CanonicalSet) -> Value {
    match data {
        CanonicalSet::Subjective(set) => set
            .iter()
            .map(|rating| json!({"name": rating.name.as_str(), "value": rating.value}))
            .collect(),
        CanonicalSet::Progress(series) => series
            .points()
            .iter()
            .map(|point| {
                json!({
                    "timestamp": point.timestamp.to_rfc3339(),
                    "label": point.label.as_str(),
                    "value": point.value,
                })
            })
            .collect(),
    }
}
