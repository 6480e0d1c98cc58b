use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

/// Logging and trace export settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TelemetryConfig {
    /// `service.name` reported with exported spans
    pub service_name: String,
    /// Log line format written to stdout
    pub log_format: LogFormat,
    /// Extra resource attributes attached to exported spans
    pub resource_attributes: HashMap<String, String>,
    /// Span export; logs only when absent
    pub otlp: Option<OtlpConfig>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "pillowtime".to_owned(),
            log_format: LogFormat::default(),
            resource_attributes: HashMap::new(),
            otlp: None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// OTLP span exporter
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OtlpConfig {
    /// Collector endpoint
    pub endpoint: Url,
    #[serde(default)]
    pub protocol: ExportProtocol,
    /// Fraction of root spans kept, clamped to `0.0..=1.0`
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
    /// Follow the caller's sampling decision when a parent span exists
    #[serde(default = "default_parent_based")]
    pub parent_based: bool,
}

/// OTLP transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    #[default]
    Grpc,
    HttpProto,
}

#[allow(clippy::missing_const_for_fn)]
fn default_sampling_rate() -> f64 {
    1.0
}

#[allow(clippy::missing_const_for_fn)]
fn default_parent_based() -> bool {
    true
}
