//! # Query Builder
//!
//! Turns a [`MetricRequest`] into the URL of a Conviva metrics query.
//!
//! URL layout: `<base>/<endpoint>/<root>[/group-by/<dimension>]?<params>` where
//!
//! - `endpoint` is `real-time-metrics` or `metrics` (see [`Endpoint`])
//! - `root` is the metric group, the single metric name, or `custom-selection`
//!   when several metric names are requested
//! - `params` are, in order: `start_epoch`, `end_epoch`, `granularity`, one
//!   `key=value` pair per filter value, and one `metric=<name>` per name when
//!   more than one name is requested

use crate::error::ValidationError;
use chrono::{
    DateTime,
    Utc,
};
use conviva_collector_config::{
    parse_offset,
    CollectorConfig,
    MetricRequest,
    MetricSelection,
};
use std::time::Duration;
use strum::{
    AsRefStr,
    Display,
};
use url::Url;

/// Path root used when a request names more than one metric.
pub const CUSTOM_SELECTION: &str = "custom-selection";

/// Windows starting further back than this are served by the historical endpoint.
pub const REAL_TIME_THRESHOLD: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Copy, Display, AsRefStr, PartialEq, Eq)]
pub enum Endpoint {
    #[strum(serialize = "real-time-metrics")]
    RealTime,
    #[strum(serialize = "metrics")]
    Historical,
}

/// A fully built query, ready to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub endpoint: Endpoint,
    pub url: Url,
}

#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    config: &'a CollectorConfig,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(config: &'a CollectorConfig) -> Self {
        Self { config }
    }

    /// Builds the query for `request`, optionally broken out by `dimension`.
    ///
    /// Returns `Ok(None)` when the request selects no metrics at all; such a
    /// request must simply be skipped. A blank `dimension` counts as none.
    pub fn build(&self, request: &MetricRequest, dimension: Option<&str>) -> Result<Option<Query>, ValidationError> {
        self.build_at(request, dimension, Utc::now())
    }

    /// Same as [`QueryBuilder::build`] with an explicit reference time, so
    /// both ends of the window are computed from the same instant.
    pub fn build_at(
        &self,
        request: &MetricRequest,
        dimension: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<Query>, ValidationError> {
        let Some(selection) = request.selection() else {
            return Ok(None);
        };
        let dimension = dimension.filter(|d| !d.trim().is_empty());

        let start = resolve_offset("start", request.start_offset(), self.config.start_offset)?;
        let end = resolve_offset("end", request.end_offset(), self.config.end_offset)?;

        let mut params: Vec<(&str, String)> = Vec::new();

        if !start.is_zero() {
            trace!(?start, ?end, "resolved query window");
            if end > start {
                return Err(ValidationError::EndAfterStart { start, end });
            }
            params.push(("start_epoch", epoch_seconds(now, start)?.to_string()));
            params.push(("end_epoch", epoch_seconds(now, end)?.to_string()));
        }

        if let Some(granularity) = request.granularity().or(self.config.granularity.as_deref()) {
            params.push(("granularity", granularity.to_string()));
        }

        for (key, values) in &request.filters {
            for value in values {
                params.push((key.as_str(), value.clone()));
            }
        }

        if let MetricSelection::Names(names) = &selection {
            if names.len() > 1 {
                params.extend(names.iter().map(|name| ("metric", name.clone())));
            }
        }

        let endpoint = if use_real_time(start, request.real_time, self.config.real_time) {
            Endpoint::RealTime
        } else {
            Endpoint::Historical
        };

        let mut url = self.config.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ValidationError::CannotBeABase(self.config.base_url.clone()))?;
            segments.pop_if_empty().push(endpoint.as_ref()).push(path_root(&selection));
            if let Some(dimension) = dimension {
                segments.push("group-by").push(dimension);
            }
        }

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(Some(Query { endpoint, url }))
    }
}

fn path_root(selection: &MetricSelection) -> &str {
    match selection {
        MetricSelection::Group(group) => group.as_str(),
        MetricSelection::Names(names) => match names.as_slice() {
            [single] => single.as_str(),
            _ => CUSTOM_SELECTION,
        },
    }
}

/// The request override wins over the collector default, which wins over zero.
fn resolve_offset(field: &'static str, value: Option<&str>, default: Duration) -> Result<Duration, ValidationError> {
    match value {
        Some(value) => parse_offset(value).map_err(|source| ValidationError::InvalidOffset {
            field,
            value: value.to_string(),
            source,
        }),
        None => Ok(default),
    }
}

/// `now - offset` in whole seconds since the Unix epoch.
fn epoch_seconds(now: DateTime<Utc>, offset: Duration) -> Result<i64, ValidationError> {
    chrono::Duration::from_std(offset)
        .ok()
        .and_then(|delta| now.checked_sub_signed(delta))
        .map(|at| at.timestamp())
        .ok_or(ValidationError::OffsetOutOfRange(offset))
}

fn use_real_time(start: Duration, requested: Option<bool>, default: Option<bool>) -> bool {
    if requested == Some(false) || default == Some(false) {
        return false;
    }
    start <= REAL_TIME_THRESHOLD
}
