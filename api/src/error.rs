use std::time::Duration;
use url::Url;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A request that must not be sent. Raised before any network access.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid {field} offset {value:?}: {source}")]
    InvalidOffset {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("End offset {end:?} is more than start offset {start:?}")]
    EndAfterStart { start: Duration, end: Duration },
    #[error("Offset {0:?} reaches outside the supported time range")]
    OffsetOutOfRange(Duration),
    #[error("The API URL {0} cannot carry a path")]
    CannotBeABase(Url),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Response from {url} does not have the expected shape: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn transport(url: &Url, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Transport {
            url: url.clone(),
            source: source.into(),
        }
    }
}
