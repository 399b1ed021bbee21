//! # Collectors Module
//!
//! - **`Extractor`**: turns decoded snapshots into prefixed count and gauge
//!   points using the metric catalog
//! - **`Orchestrator`**: runs each configured metric request, once per
//!   dimension when it declares any, and feeds the results to the extractor

pub mod extractor;
pub mod orchestrator;

pub use extractor::Extractor;
pub use orchestrator::{
    CollectionSummary,
    Orchestrator,
};
