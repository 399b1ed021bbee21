use crate::{
    duration::{
        non_empty,
        parse_offset,
    },
    ConfigError,
    Credentials,
    FileConfig,
};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_V3_URL: &str = "https://api.conviva.com/insights/3.0";

/// Upper bound for a single metrics request, so a stalled API cannot block a
/// collection pass forever.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-wide collector settings. Built once at startup, read-only after.
///
/// Offsets are relative to "now": a `start_offset` of 20 minutes and an
/// `end_offset` of 5 minutes query the window `[now - 20m, now - 5m]`.
/// A zero `start_offset` means "let the API pick its default window".
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub base_url: Url,
    pub start_offset: Duration,
    pub end_offset: Duration,
    pub granularity: Option<String>,
    pub real_time: Option<bool>,
    pub request_timeout: Duration,
    pub credentials: Credentials,
}

impl CollectorConfig {
    pub fn new(file: &FileConfig, credentials: Credentials) -> Result<Self, ConfigError> {
        let raw_url = non_empty(file.api_v3_url.as_deref()).unwrap_or(DEFAULT_API_V3_URL);
        let base_url = Url::parse(raw_url).map_err(|source| ConfigError::InvalidUrl {
            value: raw_url.to_string(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(base_url));
        }

        Ok(Self {
            base_url,
            start_offset: default_duration("startOffset", file.start_offset.as_deref())?.unwrap_or_default(),
            end_offset: default_duration("endOffset", file.end_offset.as_deref())?.unwrap_or_default(),
            granularity: non_empty(file.granularity.as_deref()).map(str::to_string),
            real_time: file.real_time,
            request_timeout: default_duration("requestTimeout", file.request_timeout.as_deref())?
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            credentials,
        })
    }
}

fn default_duration(field: &'static str, value: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    non_empty(value)
        .map(|value| {
            parse_offset(value).map_err(|source| ConfigError::InvalidDuration {
                field,
                value: value.to_string(),
                source,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(url: &str) -> FileConfig {
        FileConfig {
            api_v3_url: Some(url.to_string()),
            ..FileConfig::default()
        }
    }

    #[test]
    fn empty_url_falls_back_to_default() {
        let config = CollectorConfig::new(&file(""), Credentials::default()).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_API_V3_URL);
    }

    #[test]
    fn rejects_unparseable_url() {
        let err = CollectorConfig::new(&file("not a url"), Credentials::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_url_without_path_support() {
        let err = CollectorConfig::new(&file("mailto:ops@example.test"), Credentials::default()).unwrap_err();
        assert!(matches!(err, ConfigError::CannotBeABase(_)));
    }

    #[test]
    fn parses_request_timeout() {
        let file = FileConfig {
            request_timeout: Some("10s".to_string()),
            ..FileConfig::default()
        };
        let config = CollectorConfig::new(&file, Credentials::default()).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
