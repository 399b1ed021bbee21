//! # Response Types
//!
//! Shapes of the Conviva Insights v3 metrics responses.
//!
//! The API only returns the fields that apply to the requested metrics, so
//! every metric field of [`MetricSnapshot`] is optional. Missing or `null`
//! fields decode to `None`, unknown fields are ignored.

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Count {
    #[serde(rename = "count")]
    pub value: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gauge {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Percentage {
    #[serde(rename = "percentage")]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountPercentage {
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ratio {
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bitrate {
    pub bps: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Framerate {
    pub fps: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndedPlays {
    pub count: i64,
    pub per_unique_device: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinutesPlayed {
    pub count: i64,
    pub per_unique_device: f64,
    pub per_ended_play: f64,
}

impl From<Percentage> for Gauge {
    fn from(p: Percentage) -> Self {
        Gauge { value: p.value }
    }
}

impl From<Ratio> for Gauge {
    fn from(r: Ratio) -> Self {
        Gauge { value: r.ratio }
    }
}

impl From<Bitrate> for Gauge {
    fn from(b: Bitrate) -> Self {
        Gauge { value: b.bps }
    }
}

impl From<Framerate> for Gauge {
    fn from(f: Framerate) -> Self {
        Gauge { value: f.fps }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timestamp {
    pub epoch_ms: i64,
    pub iso_date: String,
}

impl Timestamp {
    /// Falls back to the Unix epoch for out-of-range values.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.epoch_ms).unwrap_or_else(|| {
            warn!(
                epoch_ms = self.epoch_ms,
                iso_date = %self.iso_date,
                "timestamp out of range, stamping points with the Unix epoch"
            );
            DateTime::default()
        })
    }
}

/// One timestamped bundle of metric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricSnapshot {
    pub timestamp: Timestamp,
    pub abandonment: Option<CountPercentage>,
    pub abandonment_with_pre_roll: Option<Percentage>,
    pub abandonment_without_pre_roll: Option<Percentage>,
    pub ad_actual_duration: Option<Gauge>,
    pub ad_attempts: Option<Count>,
    pub ad_bitrate: Option<Bitrate>,
    pub ad_completed_creative_plays: Option<Gauge>,
    pub ad_concurrent_plays: Option<Count>,
    pub ad_connection_induced_rebuffering_ratio: Option<Ratio>,
    pub ad_ended_plays: Option<EndedPlays>,
    #[serde(rename = "exits_before_ad_start")]
    pub ad_exit_before_video_starts: Option<CountPercentage>,
    pub ad_framerate: Option<Framerate>,
    pub ad_minutes_played: Option<MinutesPlayed>,
    pub ad_percentage_complete: Option<Percentage>,
    pub ad_plays: Option<CountPercentage>,
    pub ad_rebuffering_ratio: Option<Ratio>,
    pub ad_unique_devices: Option<Count>,
    pub ad_video_playback_failures: Option<CountPercentage>,
    pub ad_video_restart_time: Option<Gauge>,
    pub ad_video_start_failures: Option<CountPercentage>,
    pub ad_video_start_time: Option<Gauge>,
    pub attempts: Option<Count>,
    pub attempts_with_pre_roll: Option<CountPercentage>,
    pub attempts_without_pre_roll: Option<CountPercentage>,
    pub bad_session: Option<CountPercentage>,
    pub bad_session_average_life_playing_time_mins: Option<Gauge>,
    pub bad_unique_devices: Option<CountPercentage>,
    pub bad_unique_viewers: Option<CountPercentage>,
    pub bitrate: Option<Bitrate>,
    pub concurrent_plays: Option<Count>,
    pub connection_induced_rebuffering_ratio: Option<Ratio>,
    pub ended_plays: Option<EndedPlays>,
    pub ended_plays_with_ads: Option<CountPercentage>,
    pub ended_plays_without_ads: Option<CountPercentage>,
    pub exit_before_video_starts: Option<CountPercentage>,
    pub framerate: Option<Framerate>,
    pub good_session: Option<Count>,
    pub good_session_average_life_playing_time_mins: Option<Gauge>,
    pub good_unique_devices: Option<Count>,
    pub good_unique_viewers: Option<Count>,
    pub high_rebuffering: Option<CountPercentage>,
    pub high_rebuffering_with_ads: Option<Percentage>,
    pub high_rebuffering_without_ads: Option<Percentage>,
    pub high_startup_time: Option<CountPercentage>,
    pub high_startup_time_with_pre_roll: Option<Percentage>,
    pub high_startup_time_without_pre_roll: Option<Percentage>,
    pub interval_minutes_played: Option<Count>,
    pub low_bitrate: Option<CountPercentage>,
    pub low_bitrate_with_ads: Option<Percentage>,
    pub low_bitrate_without_ads: Option<Percentage>,
    pub minutes_played: Option<MinutesPlayed>,
    pub non_zero_cirr_ended_plays: Option<CountPercentage>,
    pub percentage_complete: Option<Percentage>,
    pub plays: Option<CountPercentage>,
    pub rebuffering_ratio: Option<Ratio>,
    pub spi_streams: Option<Count>,
    pub spi_unique_devices: Option<Count>,
    pub spi_unique_viewers: Option<Count>,
    pub streaming_performance_index: Option<Gauge>,
    pub unique_devices: Option<Count>,
    pub video_playback_failures: Option<CountPercentage>,
    pub video_playback_failures_business: Option<CountPercentage>,
    pub video_playback_failures_tech: Option<CountPercentage>,
    pub video_playback_failures_tech_with_ads: Option<Percentage>,
    pub video_playback_failures_tech_without_ads: Option<Percentage>,
    pub video_restart_time: Option<Gauge>,
    pub video_start_failures: Option<CountPercentage>,
    pub video_start_failures_business: Option<CountPercentage>,
    pub video_start_failures_tech: Option<CountPercentage>,
    pub video_start_failures_tech_with_pre_roll: Option<Percentage>,
    pub video_start_failures_tech_without_pre_roll: Option<Percentage>,
    pub video_start_time: Option<Gauge>,
    pub zero_cirr_ended_plays: Option<CountPercentage>,
}

/// A dimension key with the value one breakdown entry belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionalEntry {
    pub dimension: Dimension,
    pub metrics: MetricSnapshot,
}

/// A timestamp with one metric snapshot per distinct dimension value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionalSnapshot {
    pub timestamp: Timestamp,
    pub dimensional_data: Vec<DimensionalEntry>,
}

/// Response of a metrics query without a `group-by` dimension.
///
/// The `total` block of the response is not used and therefore not decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricData {
    pub time_series: Vec<MetricSnapshot>,
}

/// Response of a metrics query broken out by one dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionalMetricData {
    pub time_series: Vec<DimensionalSnapshot>,
}
