// ABOUTME: Domain models for running-form anomaly detection and interval segmentation
// ABOUTME: Typed descriptors, sparse sample series, anomalies, splits, segments, and reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Domain models shared by the analysis modules.
//!
//! All entities here are computed per request from caller-supplied inputs
//! and are immutable once produced; nothing is cached or persisted by
//! this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

use crate::providers::convert_value;

/// Well-known metric names as they appear in descriptor tables
pub mod metric_names {
    /// Ground contact time per stride (milliseconds)
    pub const GROUND_CONTACT_TIME: &str = "ground_contact_time";
    /// Vertical oscillation per stride (millimeters)
    pub const VERTICAL_OSCILLATION: &str = "vertical_oscillation";
    /// Vertical ratio (vertical oscillation / stride length, percent)
    pub const VERTICAL_RATIO: &str = "vertical_ratio";
    /// Elevation above sea level (meters)
    pub const ELEVATION: &str = "elevation";
    /// Pace (minutes per kilometer)
    pub const PACE: &str = "pace";
    /// Heart rate (beats per minute)
    pub const HEART_RATE: &str = "heart_rate";
}

/// Describes where a metric lives inside raw sample records and how to
/// convert its fixed-point representation. Loaded once per activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Metric name as recorded by the device
    pub name: String,
    /// Column index into each raw sample record
    pub sample_index: usize,
    /// Conversion factor; `>= 1` is a fixed-point denominator, `< 1` a fractional multiplier
    pub scale_factor: f64,
}

/// Raw per-activity payload returned by a [`crate::providers::MetricSeriesProvider`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityStreams {
    /// Activity identifier the streams belong to
    pub activity_id: String,
    /// Wall-clock start of the activity, when the source recorded one
    pub start_time: Option<DateTime<Utc>>,
    /// Descriptor table, metric name to location and scale
    pub descriptors: HashMap<String, MetricDescriptor>,
    /// One raw record per elapsed second; columns addressed via `sample_index`
    pub records: Vec<Vec<Option<f64>>>,
}

impl ActivityStreams {
    /// Look up a metric by name and materialize its converted sample series.
    ///
    /// Returns `None` when the descriptor table has no such metric, so a
    /// missing series is an explicit signal rather than a silently empty
    /// sequence. Record columns that are short or absent stay absent in
    /// the output; positions are never compacted.
    #[must_use]
    pub fn series(&self, metric: &str) -> Option<SampleSeries> {
        let descriptor = self.descriptors.get(metric)?;
        let values = self
            .records
            .iter()
            .map(|record| {
                record
                    .get(descriptor.sample_index)
                    .copied()
                    .flatten()
                    .map(|raw| convert_value(descriptor, raw))
            })
            .collect();
        Some(SampleSeries::new(values))
    }
}

/// Sparse per-second sample sequence. Index equals elapsed seconds from
/// activity start; absent samples keep their position so detection
/// indices stay aligned across metric and companion series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries(Vec<Option<f64>>);

impl SampleSeries {
    /// Wrap an already-positioned sequence of optional samples
    #[must_use]
    pub const fn new(values: Vec<Option<f64>>) -> Self {
        Self(values)
    }

    /// Build a fully-populated series from plain values
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }

    /// Number of positions (present or absent) in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no positions at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sample at `index`, `None` when absent or out of range
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// Raw view of the positioned samples
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.0
    }

    /// Mean of the non-null samples in `range` (clipped to the series),
    /// `None` when the clipped range holds no samples.
    #[must_use]
    pub fn mean_over(&self, range: Range<usize>) -> Option<f64> {
        let end = range.end.min(self.0.len());
        let start = range.start.min(end);
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in self.0[start..end].iter().copied().flatten() {
            sum += value;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Spread (max minus min) of the non-null samples in `range`
    /// (clipped to the series); `0.0` when fewer than two samples.
    #[must_use]
    pub fn spread_over(&self, range: Range<usize>) -> f64 {
        let end = range.end.min(self.0.len());
        let start = range.start.min(end);
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut count = 0usize;
        for value in self.0[start..end].iter().copied().flatten() {
            min = min.min(value);
            max = max.max(value);
            count += 1;
        }
        if count < 2 {
            0.0
        } else {
            max - min
        }
    }
}

/// Probable cause attached to a detected anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbableCause {
    /// Terrain shift (climb or descent) around the anomaly
    ElevationChange,
    /// Abrupt pace transition around the anomaly
    PaceChange,
    /// Accumulated fatigue indicated by heart-rate drift
    Fatigue,
}

/// Companion-signal magnitudes backing a cause classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CauseDetails {
    /// Elevation spread (m) within five seconds either side of the anomaly
    pub elevation_change_5s: f64,
    /// Pace spread (min/km) within ten seconds either side of the anomaly
    pub pace_change_10s: f64,
    /// Heart-rate drift (percent) of the final minute against the opening baseline
    pub hr_drift_percent: f64,
    /// Confidence in the attributed cause (0-1)
    pub correlation: f64,
}

/// Averages over one side of an anomaly's context window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextSide {
    /// Mean of the anomalous metric over the side, `0.0` when no samples
    pub metric_avg: f64,
    /// Mean elevation over the side, `0.0` when no samples
    pub elevation_avg: f64,
}

/// Symmetric before/after context around an anomaly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextWindow {
    /// Averages over the window preceding the anomaly
    pub before: ContextSide,
    /// Averages over the window starting at the anomaly
    pub after: ContextSide,
}

/// A detected running-form anomaly with its attributed cause and context.
/// Produced once by the engine; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    /// Sequential id across all metrics of one detection run, in detection order
    pub id: u64,
    /// Elapsed seconds from activity start
    pub timestamp_index: usize,
    /// Absolute time of the anomaly, when the activity start is known
    pub occurred_at: Option<DateTime<Utc>>,
    /// Name of the anomalous metric
    pub metric: String,
    /// Observed sample value
    pub observed_value: f64,
    /// Rolling-mean baseline at the same index
    pub baseline_value: f64,
    /// Standard deviations between observation and baseline
    pub z_score: f64,
    /// Attributed cause (exactly one, fixed priority)
    pub probable_cause: ProbableCause,
    /// Companion-signal magnitudes backing the attribution
    pub cause_details: CauseDetails,
    /// Before/after averages around the anomaly
    pub context: ContextWindow,
}

/// Per-metric and per-cause counts for a detection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalySummary {
    /// Anomalies found in ground contact time
    pub ground_contact_time_count: usize,
    /// Anomalies found in vertical oscillation
    pub vertical_oscillation_count: usize,
    /// Anomalies found in vertical ratio
    pub vertical_ratio_count: usize,
    /// Anomalies attributed to elevation change
    pub elevation_related: usize,
    /// Anomalies attributed to pace change
    pub pace_related: usize,
    /// Anomalies attributed to fatigue
    pub fatigue_related: usize,
}

/// Full result of one anomaly-detection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Activity the report was computed for
    pub activity_id: String,
    /// Detected anomalies in detection order
    pub anomalies: Vec<Anomaly>,
    /// Aggregated counts
    pub summary: AnomalySummary,
    /// One suggestion per distinct cause category present
    pub recommendations: Vec<String>,
}

/// One contiguous distance portion of an activity with its aggregated
/// metrics, as persisted by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// 1-based position of the split within the activity
    pub split_number: u32,
    /// Elapsed seconds at the start of the split
    pub start_time_s: f64,
    /// Elapsed seconds at the end of the split
    pub end_time_s: f64,
    /// Average pace over the split (min/km)
    pub avg_pace_min_km: Option<f64>,
    /// Average heart rate over the split (bpm)
    pub avg_heart_rate: Option<f64>,
    /// Average ground contact time over the split (ms)
    pub avg_ground_contact_time_ms: Option<f64>,
    /// Average vertical oscillation over the split (mm)
    pub avg_vertical_oscillation_mm: Option<f64>,
    /// Average vertical ratio over the split (percent)
    pub avg_vertical_ratio_percent: Option<f64>,
}

/// Training-intensity phase assigned to a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    /// Easy opening portion of the activity
    Warmup,
    /// High-intensity effort
    Work,
    /// Easy portion between efforts
    Recovery,
    /// Easy closing portion of the activity
    Cooldown,
    /// Neither clearly hard nor clearly easy
    Steady,
}

/// Arithmetic means of the tracked metrics over a segment's splits.
/// All fields are `None` when the segment covers no splits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentMetrics {
    /// Mean heart rate (bpm)
    pub avg_heart_rate: Option<f64>,
    /// Mean pace (min/km)
    pub avg_pace_min_km: Option<f64>,
    /// Mean ground contact time (ms)
    pub avg_ground_contact_time_ms: Option<f64>,
    /// Mean vertical oscillation (mm)
    pub avg_vertical_oscillation_mm: Option<f64>,
    /// Mean vertical ratio (percent)
    pub avg_vertical_ratio_percent: Option<f64>,
}

/// One or more consecutive splits classified into a training-intensity
/// phase. A segmentation run partitions the split list: contiguous,
/// every split covered exactly once, type always defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position of the segment within the activity
    pub segment_number: u32,
    /// Training-intensity phase
    pub segment_type: SegmentType,
    /// Elapsed seconds at the start of the first covered split
    pub start_time_s: f64,
    /// Elapsed seconds at the end of the last covered split
    pub end_time_s: f64,
    /// Index of the first covered split in the source list
    pub first_split: usize,
    /// Index of the last covered split in the source list (inclusive)
    pub last_split: usize,
    /// Aggregated metrics over the covered splits
    pub metrics: SegmentMetrics,
}

impl Segment {
    /// Number of splits the segment covers
    #[must_use]
    pub const fn split_count(&self) -> usize {
        self.last_split - self.first_split + 1
    }

    /// Segment duration in seconds
    #[must_use]
    pub fn duration_s(&self) -> f64 {
        self.end_time_s - self.start_time_s
    }
}

/// First-versus-last work-segment degradation indicators. All zeros when
/// fewer than two work segments exist (explicit no-signal, not an error).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FatigueReport {
    /// Heart-rate increase from first to last work segment (bpm)
    pub hr_increase_bpm: f64,
    /// Pace degradation from first to last work segment (seconds per km)
    pub pace_degradation_s_per_km: f64,
    /// Ground-contact-time degradation from first to last work segment (ms)
    pub gct_degradation_ms: f64,
}
