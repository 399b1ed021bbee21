use crate::metrics::MetricPoint;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SinkError {
    #[error("Metric names must not be empty")]
    EmptyName,
    #[error("Metric {name} has a non-finite value {value}")]
    NonFiniteValue { name: String, value: f64 },
    #[error("Metric {name} has a dimension without a key")]
    EmptyDimensionKey { name: String },
}

/// Receives the points produced by a collection pass.
pub trait PointSink {
    fn register(&mut self, point: MetricPoint) -> Result<(), SinkError>;
}

impl PointSink for Vec<MetricPoint> {
    fn register(&mut self, point: MetricPoint) -> Result<(), SinkError> {
        self.push(point);
        Ok(())
    }
}

/// The host entity points are attached to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    metrics: Vec<MetricPoint>,
}

impl Entity {
    pub fn host() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> &[MetricPoint] {
        &self.metrics
    }
}

impl PointSink for Entity {
    fn register(&mut self, point: MetricPoint) -> Result<(), SinkError> {
        if point.name.trim().is_empty() {
            return Err(SinkError::EmptyName);
        }
        if !point.value.is_finite() {
            return Err(SinkError::NonFiniteValue {
                name: point.name,
                value: point.value,
            });
        }
        if point.dimension.as_ref().is_some_and(|d| d.key.trim().is_empty()) {
            return Err(SinkError::EmptyDimensionKey { name: point.name });
        }
        self.metrics.push(point);
        Ok(())
    }
}
