#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("The configuration is not valid YAML: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("Invalid {field} duration {value:?}: {source}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("Invalid API URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("The API URL {0} cannot carry a path")]
    CannotBeABase(url::Url),
}
