use crate::{
    metrics::{
        CatalogEntry,
        DimensionTag,
        MetricPoint,
        CATALOG,
        METRIC_PREFIX,
    },
    sink::{
        PointSink,
        SinkError,
    },
};
use chrono::{
    DateTime,
    Utc,
};
use conviva_api::{
    DimensionalSnapshot,
    MetricSnapshot,
};

/// Walks snapshots against the metric catalog and hands every present field
/// to a sink as count and gauge points.
#[derive(Debug, Clone)]
pub struct Extractor {
    prefix: String,
    catalog: &'static [CatalogEntry],
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(METRIC_PREFIX, CATALOG)
    }
}

impl Extractor {
    pub fn new(prefix: impl Into<String>, catalog: &'static [CatalogEntry]) -> Self {
        Self {
            prefix: prefix.into(),
            catalog,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Emits every present field of `snapshot` at the snapshot's timestamp.
    ///
    /// Returns the number of points registered. The first point the sink
    /// rejects stops the walk.
    pub fn extract<S: PointSink + ?Sized>(&self, snapshot: &MetricSnapshot, sink: &mut S) -> Result<usize, SinkError> {
        self.walk(snapshot, snapshot.timestamp.to_datetime(), None, sink)
    }

    /// Emits every dimension entry of `snapshot`, each tagged with its own
    /// dimension and stamped with the snapshot's outer timestamp.
    pub fn extract_dimensional<S: PointSink + ?Sized>(
        &self,
        snapshot: &DimensionalSnapshot,
        sink: &mut S,
    ) -> Result<usize, SinkError> {
        let timestamp = snapshot.timestamp.to_datetime();
        let mut points = 0;
        for entry in &snapshot.dimensional_data {
            let tag = DimensionTag {
                key: entry.dimension.key.clone(),
                value: entry.dimension.value.clone(),
            };
            points += self.walk(&entry.metrics, timestamp, Some(&tag), sink)?;
        }
        Ok(points)
    }

    fn walk<S: PointSink + ?Sized>(
        &self,
        snapshot: &MetricSnapshot,
        timestamp: DateTime<Utc>,
        dimension: Option<&DimensionTag>,
        sink: &mut S,
    ) -> Result<usize, SinkError> {
        let mut points = 0;
        for entry in self.catalog {
            for sample in entry.samples(snapshot) {
                sink.register(MetricPoint {
                    metric_type: sample.metric_type,
                    name: format!("{}{}", self.prefix, sample.name),
                    value: sample.value,
                    timestamp,
                    dimension: dimension.cloned(),
                })?;
                points += 1;
            }
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metrics::MetricType,
        sink::Entity,
    };
    use conviva_api::{
        Bitrate,
        Count,
        DimensionalMetricData,
    };
    use pretty_assertions::assert_eq;

    fn snapshot(json: &str) -> MetricSnapshot {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_snapshot_emits_nothing() {
        let mut points: Vec<MetricPoint> = Vec::new();
        let emitted = Extractor::default()
            .extract(&MetricSnapshot::default(), &mut points)
            .unwrap();
        assert_eq!(emitted, 0);
        assert!(points.is_empty());
    }

    #[test]
    fn plays_decomposes_into_count_and_percentage() {
        let snapshot = snapshot(
            r#"{ "timestamp": { "epoch_ms": 1700000000000 }, "plays": { "count": 100, "percentage": 12.5 } }"#,
        );
        let mut points: Vec<MetricPoint> = Vec::new();
        let emitted = Extractor::default().extract(&snapshot, &mut points).unwrap();

        let timestamp = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(emitted, 2);
        assert_eq!(
            points,
            vec![
                MetricPoint {
                    metric_type: MetricType::Count,
                    name: "conviva.plays".to_string(),
                    value: 100.0,
                    timestamp,
                    dimension: None,
                },
                MetricPoint {
                    metric_type: MetricType::Gauge,
                    name: "conviva.plays.percentage".to_string(),
                    value: 12.5,
                    timestamp,
                    dimension: None,
                },
            ]
        );
    }

    #[test]
    fn custom_prefix_is_applied() {
        let snapshot = snapshot(r#"{ "bitrate": { "bps": 2500.0 } }"#);
        let mut points: Vec<MetricPoint> = Vec::new();
        Extractor::new("video.", CATALOG).extract(&snapshot, &mut points).unwrap();
        assert_eq!(points[0].name, "video.bitrate");
        assert_eq!(points[0].metric_type, MetricType::Gauge);
    }

    #[test]
    fn dimensional_points_keep_their_own_dimension() {
        let data: DimensionalMetricData = serde_json::from_str(
            r#"{ "time_series": [{
                "timestamp": { "epoch_ms": 1700000000000 },
                "dimensional_data": [
                    { "dimension": { "key": "device_os", "value": "iOS" }, "metrics": { "attempts": { "count": 3 } } },
                    { "dimension": { "key": "device_os", "value": "Android" }, "metrics": { "attempts": { "count": 5 }, "bitrate": { "bps": 900.0 } } }
                ]
            }] }"#,
        )
        .unwrap();

        let mut points: Vec<MetricPoint> = Vec::new();
        let emitted = Extractor::default()
            .extract_dimensional(&data.time_series[0], &mut points)
            .unwrap();

        assert_eq!(emitted, 3);
        let tagged: Vec<_> = points
            .iter()
            .map(|p| {
                (
                    p.name.as_str(),
                    p.value,
                    p.dimension.as_ref().map(|d| d.value.as_str()),
                )
            })
            .collect();
        assert_eq!(
            tagged,
            vec![
                ("conviva.attempts", 3.0, Some("iOS")),
                ("conviva.attempts", 5.0, Some("Android")),
                ("conviva.bitrate", 900.0, Some("Android")),
            ]
        );
        assert!(points
            .iter()
            .all(|p| p.timestamp == DateTime::from_timestamp(1_700_000_000, 0).unwrap()));
    }

    #[test]
    fn extraction_is_repeatable() {
        let snapshot = snapshot(r#"{ "ended_plays": { "count": 4, "per_unique_device": 1.5 } }"#);
        let extractor = Extractor::default();
        let mut first: Vec<MetricPoint> = Vec::new();
        let mut second: Vec<MetricPoint> = Vec::new();
        extractor.extract(&snapshot, &mut first).unwrap();
        extractor.extract(&snapshot, &mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[1].name, "conviva.ended_plays.per_unique_device");
    }

    #[test]
    fn first_rejected_point_halts_the_walk() {
        let snapshot = snapshot(r#"{ "attempts": { "count": 1 }, "bitrate": { "bps": 5.0 } }"#);

        struct Rejecting(usize);
        impl PointSink for Rejecting {
            fn register(&mut self, _: MetricPoint) -> Result<(), SinkError> {
                self.0 += 1;
                Err(SinkError::EmptyName)
            }
        }
        let mut sink = Rejecting(0);
        assert_eq!(Extractor::default().extract(&snapshot, &mut sink), Err(SinkError::EmptyName));
        assert_eq!(sink.0, 1);
    }

    #[test]
    fn entity_sink_rejects_non_finite_gauges() {
        let snapshot = MetricSnapshot {
            attempts: Some(Count { value: 1 }),
            bitrate: Some(Bitrate { bps: f64::INFINITY }),
            ..MetricSnapshot::default()
        };
        let mut entity = Entity::host();
        let err = Extractor::default().extract(&snapshot, &mut entity).unwrap_err();
        assert!(matches!(err, SinkError::NonFiniteValue { .. }));
        assert_eq!(entity.metrics().len(), 1);
    }
}
