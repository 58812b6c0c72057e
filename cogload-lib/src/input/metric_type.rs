use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// The kind of measurement carried by a raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize, ValueEnum)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    /// Named ratings on a bounded scale
    Subjective,

    /// Timestamped observations tracked over time
    Progress,
}

impl MetricType {
    /// Look up a metric type by its exact lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "subjective" => Some(Self::Subjective),
            "progress" => Some(Self::Progress),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
