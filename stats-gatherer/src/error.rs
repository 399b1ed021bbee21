use crate::sink::SinkError;

/// Anything that aborts a collection pass.
#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error(transparent)]
    Api(#[from] conviva_api::Error),
    #[error("Sink rejected a point from {query}: {source}")]
    Sink { query: String, source: SinkError },
}
