//! # Metric Catalog
//!
//! Every metric field the Conviva API can return, in emission order, with the
//! shape that decides how it decomposes into primitive points:
//!
//! - **count**: one count point
//! - **gauge**: one gauge point; percentages, ratios, bitrates and framerates
//!   are read as gauges of their single value
//! - **count + percentage**: a count at the base name and a gauge at
//!   `<name>.percentage`
//! - **derived pair**: a count at the base name and a gauge at
//!   `<name>.<suffix>`, e.g. `ended_plays.per_unique_device`
//!
//! A field without an entry is never emitted.

use super::shared::Sample;
use conviva_api::{
    Count,
    CountPercentage,
    Gauge,
    MetricSnapshot,
};
use std::fmt;

pub const PERCENTAGE_SUFFIX: &str = "percentage";
pub const PER_UNIQUE_DEVICE: &str = "per_unique_device";
pub const PER_ENDED_PLAY: &str = "per_ended_play";

/// How a catalog entry reads its field, which also fixes its shape.
#[derive(Clone, Copy)]
pub enum Shape {
    Count(fn(&MetricSnapshot) -> Option<Count>),
    Gauge(fn(&MetricSnapshot) -> Option<Gauge>),
    CountPercentage(fn(&MetricSnapshot) -> Option<CountPercentage>),
    DerivedPair {
        suffix: &'static str,
        read: fn(&MetricSnapshot) -> Option<(i64, f64)>,
    },
}

/// The value of one metric field in one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricField {
    Absent,
    Count(i64),
    Gauge(f64),
    CountPercentage { count: i64, percentage: f64 },
    DerivedPair {
        count: i64,
        suffix: &'static str,
        secondary: f64,
    },
}

#[derive(Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub shape: Shape,
}

impl CatalogEntry {
    pub const fn count(name: &'static str, read: fn(&MetricSnapshot) -> Option<Count>) -> Self {
        Self {
            name,
            shape: Shape::Count(read),
        }
    }

    pub const fn gauge(name: &'static str, read: fn(&MetricSnapshot) -> Option<Gauge>) -> Self {
        Self {
            name,
            shape: Shape::Gauge(read),
        }
    }

    pub const fn count_percentage(name: &'static str, read: fn(&MetricSnapshot) -> Option<CountPercentage>) -> Self {
        Self {
            name,
            shape: Shape::CountPercentage(read),
        }
    }

    pub const fn derived_pair(
        name: &'static str,
        suffix: &'static str,
        read: fn(&MetricSnapshot) -> Option<(i64, f64)>,
    ) -> Self {
        Self {
            name,
            shape: Shape::DerivedPair { suffix, read },
        }
    }

    pub fn read(&self, snapshot: &MetricSnapshot) -> MetricField {
        match self.shape {
            Shape::Count(read) => read(snapshot).map_or(MetricField::Absent, |c| MetricField::Count(c.value)),
            Shape::Gauge(read) => read(snapshot).map_or(MetricField::Absent, |g| MetricField::Gauge(g.value)),
            Shape::CountPercentage(read) => read(snapshot).map_or(MetricField::Absent, |cp| {
                MetricField::CountPercentage {
                    count: cp.count,
                    percentage: cp.percentage,
                }
            }),
            Shape::DerivedPair { suffix, read } => read(snapshot).map_or(MetricField::Absent, |(count, secondary)| {
                MetricField::DerivedPair {
                    count,
                    suffix,
                    secondary,
                }
            }),
        }
    }

    /// Decomposes this entry's field of `snapshot` into zero, one or two samples.
    pub fn samples(&self, snapshot: &MetricSnapshot) -> Vec<Sample> {
        match self.read(snapshot) {
            MetricField::Absent => Vec::new(),
            MetricField::Count(count) => vec![Sample::count(self.name, count)],
            MetricField::Gauge(value) => vec![Sample::gauge(self.name, value)],
            MetricField::CountPercentage { count, percentage } => vec![
                Sample::count(self.name, count),
                Sample::gauge(format!("{}.{PERCENTAGE_SUFFIX}", self.name), percentage),
            ],
            MetricField::DerivedPair {
                count,
                suffix,
                secondary,
            } => vec![
                Sample::count(self.name, count),
                Sample::gauge(format!("{}.{suffix}", self.name), secondary),
            ],
        }
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self.shape {
            Shape::Count(_) => "count",
            Shape::Gauge(_) => "gauge",
            Shape::CountPercentage(_) => "count_percentage",
            Shape::DerivedPair { .. } => "derived_pair",
        };
        f.debug_struct("CatalogEntry")
            .field("name", &self.name)
            .field("shape", &shape)
            .finish()
    }
}

pub static CATALOG: &[CatalogEntry] = &[
    CatalogEntry::count_percentage("abandonment", |m| m.abandonment),
    CatalogEntry::gauge("abandonment_with_pre_roll", |m| m.abandonment_with_pre_roll.map(Gauge::from)),
    CatalogEntry::gauge("abandonment_without_pre_roll", |m| m.abandonment_without_pre_roll.map(Gauge::from)),
    CatalogEntry::gauge("ad_actual_duration", |m| m.ad_actual_duration),
    CatalogEntry::count("ad_attempts", |m| m.ad_attempts),
    CatalogEntry::gauge("ad_bitrate", |m| m.ad_bitrate.map(Gauge::from)),
    CatalogEntry::gauge("ad_completed_creative_plays", |m| m.ad_completed_creative_plays),
    CatalogEntry::count("ad_concurrent_plays", |m| m.ad_concurrent_plays),
    CatalogEntry::gauge(
        "ad_connection_induced_rebuffering_ratio",
        |m| m.ad_connection_induced_rebuffering_ratio.map(Gauge::from),
    ),
    CatalogEntry::derived_pair(
        "ad_ended_plays",
        PER_UNIQUE_DEVICE,
        |m| m.ad_ended_plays.map(|e| (e.count, e.per_unique_device)),
    ),
    CatalogEntry::count_percentage("ad_exit_before_video_starts", |m| m.ad_exit_before_video_starts),
    CatalogEntry::gauge("ad_framerate", |m| m.ad_framerate.map(Gauge::from)),
    CatalogEntry::derived_pair(
        "ad_minutes_played",
        PER_ENDED_PLAY,
        |m| m.ad_minutes_played.map(|e| (e.count, e.per_ended_play)),
    ),
    CatalogEntry::gauge("ad_percentage_complete", |m| m.ad_percentage_complete.map(Gauge::from)),
    CatalogEntry::count_percentage("ad_plays", |m| m.ad_plays),
    CatalogEntry::gauge("ad_rebuffering_ratio", |m| m.ad_rebuffering_ratio.map(Gauge::from)),
    CatalogEntry::count("ad_unique_devices", |m| m.ad_unique_devices),
    CatalogEntry::count_percentage("ad_video_playback_failures", |m| m.ad_video_playback_failures),
    CatalogEntry::gauge("ad_video_restart_time", |m| m.ad_video_restart_time),
    CatalogEntry::count_percentage("ad_video_start_failures", |m| m.ad_video_start_failures),
    CatalogEntry::gauge("ad_video_start_time", |m| m.ad_video_start_time),
    CatalogEntry::count("attempts", |m| m.attempts),
    CatalogEntry::count_percentage("attempts_with_pre_roll", |m| m.attempts_with_pre_roll),
    CatalogEntry::count_percentage("attempts_without_pre_roll", |m| m.attempts_without_pre_roll),
    CatalogEntry::count_percentage("bad_session", |m| m.bad_session),
    CatalogEntry::gauge("bad_session_average_life_playing_time_mins", |m| m.bad_session_average_life_playing_time_mins),
    CatalogEntry::count_percentage("bad_unique_devices", |m| m.bad_unique_devices),
    CatalogEntry::count_percentage("bad_unique_viewers", |m| m.bad_unique_viewers),
    CatalogEntry::gauge("bitrate", |m| m.bitrate.map(Gauge::from)),
    CatalogEntry::count("concurrent_plays", |m| m.concurrent_plays),
    CatalogEntry::gauge(
        "connection_induced_rebuffering_ratio",
        |m| m.connection_induced_rebuffering_ratio.map(Gauge::from),
    ),
    CatalogEntry::derived_pair(
        "ended_plays",
        PER_UNIQUE_DEVICE,
        |m| m.ended_plays.map(|e| (e.count, e.per_unique_device)),
    ),
    CatalogEntry::count_percentage("ended_plays_with_ads", |m| m.ended_plays_with_ads),
    CatalogEntry::count_percentage("ended_plays_without_ads", |m| m.ended_plays_without_ads),
    CatalogEntry::count_percentage("exit_before_video_starts", |m| m.exit_before_video_starts),
    CatalogEntry::gauge("framerate", |m| m.framerate.map(Gauge::from)),
    CatalogEntry::count("good_session", |m| m.good_session),
    CatalogEntry::gauge(
        "good_session_average_life_playing_time_mins",
        |m| m.good_session_average_life_playing_time_mins,
    ),
    CatalogEntry::count("good_unique_devices", |m| m.good_unique_devices),
    CatalogEntry::count("good_unique_viewers", |m| m.good_unique_viewers),
    CatalogEntry::count_percentage("high_rebuffering", |m| m.high_rebuffering),
    CatalogEntry::gauge("high_rebuffering_with_ads", |m| m.high_rebuffering_with_ads.map(Gauge::from)),
    CatalogEntry::gauge("high_rebuffering_without_ads", |m| m.high_rebuffering_without_ads.map(Gauge::from)),
    CatalogEntry::count_percentage("high_startup_time", |m| m.high_startup_time),
    CatalogEntry::gauge("high_startup_time_with_pre_roll", |m| m.high_startup_time_with_pre_roll.map(Gauge::from)),
    CatalogEntry::gauge(
        "high_startup_time_without_pre_roll",
        |m| m.high_startup_time_without_pre_roll.map(Gauge::from),
    ),
    CatalogEntry::count("interval_minutes_played", |m| m.interval_minutes_played),
    CatalogEntry::count_percentage("low_bitrate", |m| m.low_bitrate),
    CatalogEntry::gauge("low_bitrate_with_ads", |m| m.low_bitrate_with_ads.map(Gauge::from)),
    CatalogEntry::gauge("low_bitrate_without_ads", |m| m.low_bitrate_without_ads.map(Gauge::from)),
    CatalogEntry::derived_pair(
        "minutes_played",
        PER_ENDED_PLAY,
        |m| m.minutes_played.map(|e| (e.count, e.per_ended_play)),
    ),
    CatalogEntry::count_percentage("non_zero_cirr_ended_plays", |m| m.non_zero_cirr_ended_plays),
    CatalogEntry::gauge("percentage_complete", |m| m.percentage_complete.map(Gauge::from)),
    CatalogEntry::count_percentage("plays", |m| m.plays),
    CatalogEntry::gauge("rebuffering_ratio", |m| m.rebuffering_ratio.map(Gauge::from)),
    CatalogEntry::count("spi_streams", |m| m.spi_streams),
    CatalogEntry::count("spi_unique_devices", |m| m.spi_unique_devices),
    CatalogEntry::count("spi_unique_viewers", |m| m.spi_unique_viewers),
    CatalogEntry::gauge("streaming_performance_index", |m| m.streaming_performance_index),
    CatalogEntry::count("unique_devices", |m| m.unique_devices),
    CatalogEntry::count_percentage("video_playback_failures", |m| m.video_playback_failures),
    CatalogEntry::count_percentage("video_playback_failures_business", |m| m.video_playback_failures_business),
    CatalogEntry::count_percentage("video_playback_failures_tech", |m| m.video_playback_failures_tech),
    CatalogEntry::gauge(
        "video_playback_failures_tech_with_ads",
        |m| m.video_playback_failures_tech_with_ads.map(Gauge::from),
    ),
    CatalogEntry::gauge(
        "video_playback_failures_tech_without_ads",
        |m| m.video_playback_failures_tech_without_ads.map(Gauge::from),
    ),
    CatalogEntry::gauge("video_restart_time", |m| m.video_restart_time),
    CatalogEntry::count_percentage("video_start_failures", |m| m.video_start_failures),
    CatalogEntry::count_percentage("video_start_failures_business", |m| m.video_start_failures_business),
    CatalogEntry::count_percentage("video_start_failures_tech", |m| m.video_start_failures_tech),
    CatalogEntry::gauge(
        "video_start_failures_tech_with_pre_roll",
        |m| m.video_start_failures_tech_with_pre_roll.map(Gauge::from),
    ),
    CatalogEntry::gauge(
        "video_start_failures_tech_without_pre_roll",
        |m| m.video_start_failures_tech_without_pre_roll.map(Gauge::from),
    ),
    CatalogEntry::gauge("video_start_time", |m| m.video_start_time),
    CatalogEntry::count_percentage("zero_cirr_ended_plays", |m| m.zero_cirr_ended_plays),
];
