use super::entity::Entity;
use crate::metrics::MetricType;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    io::Write,
};

pub const PROTOCOL_VERSION: &str = "4";

/// The integration a collection pass publishes as a single JSON document.
#[derive(Debug, Clone)]
pub struct Integration {
    name: String,
    version: String,
    host: Entity,
}

impl Integration {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            host: Entity::host(),
        }
    }

    pub fn host_entity(&self) -> &Entity {
        &self.host
    }

    pub fn host_entity_mut(&mut self) -> &mut Entity {
        &mut self.host
    }

    pub fn payload(&self) -> Payload<'_> {
        Payload {
            protocol_version: PROTOCOL_VERSION,
            integration: IntegrationInfo {
                name: &self.name,
                version: &self.version,
            },
            data: vec![EntityData::from(&self.host)],
        }
    }

    /// Writes the payload followed by a newline.
    pub fn publish(&self, mut writer: impl Write, pretty: bool) -> eyre::Result<()> {
        let payload = self.payload();
        if pretty {
            serde_json::to_writer_pretty(&mut writer, &payload)?;
        } else {
            serde_json::to_writer(&mut writer, &payload)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    pub protocol_version: &'static str,
    pub integration: IntegrationInfo<'a>,
    pub data: Vec<EntityData<'a>>,
}

#[derive(Debug, Serialize)]
pub struct IntegrationInfo<'a> {
    pub name: &'a str,
    pub version: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EntityData<'a> {
    pub common: BTreeMap<&'a str, &'a str>,
    pub metrics: Vec<MetricData<'a>>,
    pub inventory: BTreeMap<&'a str, &'a str>,
    pub events: Vec<()>,
}

#[derive(Debug, Serialize)]
pub struct MetricData<'a> {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<&'a str, &'a str>,
    pub value: f64,
}

impl<'a> From<&'a Entity> for EntityData<'a> {
    fn from(entity: &'a Entity) -> Self {
        let metrics = entity
            .metrics()
            .iter()
            .map(|point| MetricData {
                timestamp: point.timestamp.timestamp(),
                name: &point.name,
                metric_type: point.metric_type,
                attributes: point
                    .dimension
                    .iter()
                    .map(|d| (d.key.as_str(), d.value.as_str()))
                    .collect(),
                value: point.value,
            })
            .collect();

        Self {
            common: BTreeMap::new(),
            metrics,
            inventory: BTreeMap::new(),
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metrics::{
            DimensionTag,
            MetricPoint,
        },
        sink::PointSink,
    };
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_host_entity_payload() {
        let mut integration = Integration::new("com.newrelic.odp.conviva", "1.2.3");
        let host = integration.host_entity_mut();
        host.register(MetricPoint {
            metric_type: MetricType::Count,
            name: "conviva.plays".to_string(),
            value: 100.0,
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            dimension: None,
        })
        .unwrap();
        host.register(MetricPoint {
            metric_type: MetricType::Gauge,
            name: "conviva.plays.percentage".to_string(),
            value: 12.5,
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            dimension: Some(DimensionTag {
                key: "device_os".to_string(),
                value: "iOS".to_string(),
            }),
        })
        .unwrap();

        let json = serde_json::to_value(integration.payload()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "protocol_version": "4",
                "integration": { "name": "com.newrelic.odp.conviva", "version": "1.2.3" },
                "data": [{
                    "common": {},
                    "metrics": [
                        { "timestamp": 1_700_000_000, "name": "conviva.plays", "type": "count", "value": 100.0 },
                        {
                            "timestamp": 1_700_000_000,
                            "name": "conviva.plays.percentage",
                            "type": "gauge",
                            "attributes": { "device_os": "iOS" },
                            "value": 12.5
                        }
                    ],
                    "inventory": {},
                    "events": []
                }]
            })
        );
    }

    #[test]
    fn publish_writes_one_line() {
        let integration = Integration::new("test", "0.0.0");
        let mut out = Vec::new();
        integration.publish(&mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        assert!(integration.host_entity().metrics().is_empty());
    }
}
