//! # Conviva Insights API
//!
//! Query construction, transport and response decoding for the Conviva
//! Insights v3 metrics API.
//!
//! - **`query`**: turns a metric request into a URL, choosing between the
//!   real-time and the historical endpoint
//! - **`client`**: the [`Transport`] seam, a blocking HTTP implementation and
//!   [`ConvivaClient`] which ties building, fetching and decoding together
//! - **`types`**: the sparse response shapes

#[macro_use]
extern crate tracing;

pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use client::{
    ConvivaClient,
    HttpTransport,
    Transport,
};
pub use error::{
    Error,
    Result,
    ValidationError,
};
pub use query::{
    Endpoint,
    Query,
    QueryBuilder,
};
pub use types::*;
