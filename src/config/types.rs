use std::time::Duration;

use serde::Deserialize;

use crate::args::OutputFormat;
use crate::args::parsers::parse_duration_arg;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub address: Option<String>,
    pub commands: Option<Vec<String>>,
    pub iterations: Option<Vec<usize>>,
    #[serde(alias = "average_over")]
    pub average: Option<u32>,
    pub show_errors: Option<bool>,
    pub key_prefix: Option<String>,
    pub seed: Option<u64>,
    pub throughput: Option<ThroughputConfig>,
    pub output_format: Option<OutputFormat>,
    pub random_keys: Option<bool>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ThroughputConfig {
    pub command: Option<String>,
    pub duration: Option<DurationValue>,
}

/// Either whole seconds or a suffixed string such as `"500ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
