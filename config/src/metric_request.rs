use crate::duration::non_empty;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::BTreeMap;

/// One entry of the `metrics` list: what to fetch and how to slice it.
///
/// Exactly one of `metric_group`, `metric` or `names` is expected to be set.
/// An entry with none of them is a placeholder and collects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_group: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<String>,
    /// Dimension key to allowed values. Values of one key are OR-ed, keys are AND-ed.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_time: Option<bool>,
}

/// The metrics a request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricSelection {
    /// An API-defined bundle of metrics.
    Group(String),
    /// One or more individual metric names, never empty.
    Names(Vec<String>),
}

impl MetricRequest {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            metric_group: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Resolves the declaration forms with precedence group, then single
    /// metric, then name list. `None` means there is nothing to collect.
    pub fn selection(&self) -> Option<MetricSelection> {
        if let Some(group) = non_empty(self.metric_group.as_deref()) {
            return Some(MetricSelection::Group(group.to_string()));
        }
        if let Some(metric) = non_empty(self.metric.as_deref()) {
            return Some(MetricSelection::Names(vec![metric.to_string()]));
        }
        let names: Vec<String> = self.names.iter().filter(|n| !n.trim().is_empty()).cloned().collect();
        if names.is_empty() {
            None
        } else {
            Some(MetricSelection::Names(names))
        }
    }

    pub fn start_offset(&self) -> Option<&str> {
        non_empty(self.start_offset.as_deref())
    }

    pub fn end_offset(&self) -> Option<&str> {
        non_empty(self.end_offset.as_deref())
    }

    pub fn granularity(&self) -> Option<&str> {
        non_empty(self.granularity.as_deref())
    }

    /// Dimension names in declaration order, blank entries dropped.
    pub fn dimensions(&self) -> Vec<&str> {
        self.dimensions
            .iter()
            .filter_map(|dimension| non_empty(Some(dimension.as_str())))
            .collect()
    }
}

impl std::fmt::Display for MetricSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricSelection::Group(group) => write!(f, "metric group {group}"),
            MetricSelection::Names(names) => write!(f, "metrics {}", names.join(",")),
        }
    }
}
