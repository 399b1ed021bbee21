//! # Conviva Stats Gatherer
//!
//! Pulls video-analytics metrics from the Conviva Insights API and turns them
//! into count and gauge points for a New Relic infrastructure integration.
//!
//! ## Architecture
//!
//! - **`metrics`**: the point types and the static catalog of every metric
//!   field with the shape it decomposes into
//! - **`collectors`**: the extraction pipeline and the orchestrator that runs
//!   each configured request, once per dimension when it declares any
//! - **`sink`**: validating entities and the integration payload written to
//!   stdout
//! - **`runner`**: one collect-then-publish pass
//!
//! ## Usage
//!
//! ```bash
//! nri-conviva --client-id=$CONVIVA_CLIENT_ID \
//!             --client-secret=$CONVIVA_CLIENT_SECRET \
//!             --config-path=conviva.yml \
//!             --pretty
//! ```

#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod error;
pub mod metrics;
pub mod runner;
pub mod sink;

#[cfg(test)]
mod testing;

pub use collectors::*;
pub use error::CollectError;
pub use metrics::*;
pub use runner::{
    run,
    INTEGRATION_NAME,
};
pub use sink::*;
