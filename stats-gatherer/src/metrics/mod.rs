pub mod catalog;
pub mod shared;

// Re-export the main types for easy access
pub use catalog::{
    CatalogEntry,
    MetricField,
    Shape,
    CATALOG,
};
pub use shared::*;

/// Prefix of every emitted metric name.
pub const METRIC_PREFIX: &str = "conviva.";
