use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Kind of a primitive data point handed to the sink.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Count,
    Gauge,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Count => "count",
            MetricType::Gauge => "gauge",
        }
    }
}

/// The dimension a point was broken out by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionTag {
    pub key: String,
    pub value: String,
}

/// A named, timestamped value ready to be attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub metric_type: MetricType,
    pub name: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub dimension: Option<DimensionTag>,
}

/// A point before it is named with the metric prefix and stamped with time
/// and dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub metric_type: MetricType,
    pub name: String,
    pub value: f64,
}

impl Sample {
    pub fn count(name: impl Into<String>, value: i64) -> Self {
        Self {
            metric_type: MetricType::Count,
            name: name.into(),
            value: value as f64,
        }
    }

    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self {
            metric_type: MetricType::Gauge,
            name: name.into(),
            value,
        }
    }
}
