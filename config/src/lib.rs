#[macro_use]
extern crate tracing;

mod collector_config;
mod credentials;
mod duration;
mod error;
mod metric_request;

pub use collector_config::{
    CollectorConfig,
    DEFAULT_API_V3_URL,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use credentials::Credentials;
pub use duration::parse_offset;
pub use error::ConfigError;
pub use metric_request::{
    MetricRequest,
    MetricSelection,
};
use eyre::{
    Context as _,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::path::Path;

/// The YAML configuration file as written by operators.
///
/// Keys are camelCase to stay compatible with existing integration configs:
///
/// ```yaml
/// apiV3Url: https://api.conviva.com/insights/3.0
/// startOffset: 10m
/// granularity: PT1M
/// metrics:
///   - metricGroup: quality-metriclens
///     dimensions: [device_os]
///   - names: [plays, attempts]
///     filters:
///       device_os: [iOS, Android]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_v3_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
    #[serde(default)]
    pub metrics: Vec<MetricRequest>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(content)?)
    }
}

/// Everything a collection pass needs: the immutable collector settings and
/// the ordered list of metric requests.
#[derive(Debug, Clone)]
pub struct Config {
    pub collector: CollectorConfig,
    pub metrics: Vec<MetricRequest>,
}

impl Config {
    pub fn new(file: FileConfig, credentials: Credentials) -> Result<Self, ConfigError> {
        let collector = CollectorConfig::new(&file, credentials)?;
        Ok(Self {
            collector,
            metrics: file.metrics,
        })
    }

    /// Reads and validates the YAML configuration at `path`.
    #[instrument(level = "debug", skip(credentials))]
    pub fn load(path: &Path, credentials: Credentials) -> Result<Self> {
        debug!("loading Conviva configuration");
        let bytes = std::fs::read(path).wrap_err_with(|| format!("Failed to read config file {path:?}"))?;
        let content = String::from_utf8(bytes).wrap_err_with(|| format!("Config file {path:?} is not UTF-8"))?;
        let file = FileConfig::parse(&content).wrap_err_with(|| format!("Failed to parse config file {path:?}"))?;
        let config = Self::new(file, credentials).wrap_err("Invalid collector configuration")?;
        debug!(requests = config.metrics.len(), "Conviva configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::{
        collections::BTreeMap,
        time::Duration,
    };

    const SAMPLE: &str = r#"
apiV3Url: https://example.test/insights/3.0
startOffset: 20m
endOffset: 5m
granularity: PT1M
realTime: false
metrics:
  - metricGroup: quality-metriclens
    dimensions: [device_os, cdn]
  - metric: plays
    startOffset: 10m
  - names: [plays, attempts]
    filters:
      device_os: [iOS, Android]
    realTime: true
  - dimensions: [device_os]
"#;

    #[test]
    fn parses_camel_case_file() {
        let file = FileConfig::parse(SAMPLE).unwrap();
        assert_eq!(file.api_v3_url.as_deref(), Some("https://example.test/insights/3.0"));
        assert_eq!(file.start_offset.as_deref(), Some("20m"));
        assert_eq!(file.real_time, Some(false));
        assert_eq!(file.metrics.len(), 4);

        let group = &file.metrics[0];
        assert_eq!(group.metric_group.as_deref(), Some("quality-metriclens"));
        assert_eq!(group.dimensions, vec!["device_os".to_string(), "cdn".to_string()]);

        let names = &file.metrics[2];
        assert_eq!(names.names, vec!["plays".to_string(), "attempts".to_string()]);
        assert_eq!(
            names.filters,
            BTreeMap::from([(
                "device_os".to_string(),
                vec!["iOS".to_string(), "Android".to_string()]
            )])
        );
        assert_eq!(names.real_time, Some(true));
    }

    #[test]
    fn builds_collector_config() {
        let file = FileConfig::parse(SAMPLE).unwrap();
        let config = Config::new(file, Credentials::new("id", "secret")).unwrap();
        assert_eq!(config.collector.base_url.as_str(), "https://example.test/insights/3.0");
        assert_eq!(config.collector.start_offset, Duration::from_secs(20 * 60));
        assert_eq!(config.collector.end_offset, Duration::from_secs(5 * 60));
        assert_eq!(config.collector.granularity.as_deref(), Some("PT1M"));
        assert_eq!(config.collector.real_time, Some(false));
        assert_eq!(config.metrics.len(), 4);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = FileConfig::parse("{}").unwrap();
        let config = Config::new(file, Credentials::default()).unwrap();
        assert_eq!(config.collector.base_url.as_str(), DEFAULT_API_V3_URL);
        assert_eq!(config.collector.start_offset, Duration::ZERO);
        assert_eq!(config.collector.end_offset, Duration::ZERO);
        assert_eq!(config.collector.granularity, None);
        assert_eq!(config.collector.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert!(config.metrics.is_empty());
    }

    #[test]
    fn malformed_default_offset_is_rejected() {
        let file = FileConfig::parse("startOffset: ten minutes").unwrap();
        let err = Config::new(file, Credentials::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { field: "startOffset", .. }));
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        assert!(matches!(FileConfig::parse("metrics: 12"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/conviva-config.yml"), Credentials::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
