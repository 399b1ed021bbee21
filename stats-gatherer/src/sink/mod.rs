//! # Sink Module
//!
//! Where collected points end up. [`PointSink`] is the seam the extraction
//! pipeline writes through; [`Entity`] validates and stores points and
//! [`Integration`] serializes its entities as one JSON document.

pub mod entity;
pub mod integration;

pub use entity::{
    Entity,
    PointSink,
    SinkError,
};
pub use integration::{
    Integration,
    Payload,
    PROTOCOL_VERSION,
};
