// ABOUTME: Attributes detected anomalies to elevation change, pace change, or fatigue
// ABOUTME: Fixed-priority rules over companion elevation, pace, and heart-rate series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Multi-hypothesis cause attribution for form anomalies.
//!
//! Exactly one cause is attached per anomaly. The rule order is fixed:
//! elevation change is checked before pace change, which is checked
//! before fatigue, even when several signals fire at once - a terrain
//! shift is the most physiologically direct explanation for a
//! form-metric spike, so it wins whenever it is present. When nothing
//! fires, the anomaly still gets an explicit low-confidence pace-change
//! attribution rather than an error.

use crate::config::AnomalyDetectionConfig;
use crate::models::{CauseDetails, ProbableCause, SampleSeries};

/// Outcome of classifying a single anomaly candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedCause {
    /// The attributed cause
    pub cause: ProbableCause,
    /// Companion-signal magnitudes backing the attribution
    pub details: CauseDetails,
}

/// Attribute one anomaly at `index` using the activity's companion series.
///
/// Absent companion series contribute a zero-magnitude signal, so
/// classification degrades to the low-confidence default instead of
/// failing.
#[must_use]
pub fn classify_cause(
    index: usize,
    elevation: Option<&SampleSeries>,
    pace: Option<&SampleSeries>,
    heart_rate: Option<&SampleSeries>,
    config: &AnomalyDetectionConfig,
) -> ClassifiedCause {
    let elevation_change_5s =
        elevation.map_or(0.0, |s| centered_spread(s, index, config.elevation_window_s));
    let pace_change_10s = pace.map_or(0.0, |s| centered_spread(s, index, config.pace_window_s));
    let hr_drift_percent = heart_rate.map_or(0.0, |s| hr_drift_percent(s, index, config));

    let (cause, correlation) = if elevation_change_5s > config.elevation_change_threshold_m {
        (
            ProbableCause::ElevationChange,
            scaled_correlation(
                elevation_change_5s,
                config.elevation_correlation_divisor,
                config,
            ),
        )
    } else if pace_change_10s > config.pace_change_threshold_min_km {
        (
            ProbableCause::PaceChange,
            scaled_correlation(pace_change_10s, config.pace_correlation_divisor, config),
        )
    } else if hr_drift_percent.abs() > config.hr_drift_threshold_percent {
        (
            ProbableCause::Fatigue,
            scaled_correlation(
                hr_drift_percent.abs(),
                config.hr_drift_correlation_divisor,
                config,
            ),
        )
    } else {
        (ProbableCause::PaceChange, config.default_correlation)
    };

    ClassifiedCause {
        cause,
        details: CauseDetails {
            elevation_change_5s,
            pace_change_10s,
            hr_drift_percent,
            correlation,
        },
    }
}

/// Spread of a companion series within `half_window` seconds either side of `index`
fn centered_spread(series: &SampleSeries, index: usize, half_window: usize) -> f64 {
    let start = index.saturating_sub(half_window);
    let end = index.saturating_add(half_window).saturating_add(1);
    series.spread_over(start..end)
}

/// Heart-rate drift of the recent window against the activity's opening
/// baseline, in percent. Zero when either window is empty or the
/// baseline mean is zero.
fn hr_drift_percent(heart_rate: &SampleSeries, index: usize, config: &AnomalyDetectionConfig) -> f64 {
    let baseline = heart_rate.mean_over(0..config.hr_baseline_window_s);
    let recent_start = index.saturating_sub(config.hr_recent_window_s);
    let recent = heart_rate.mean_over(recent_start..index);

    match (baseline, recent) {
        (Some(baseline), Some(recent)) if baseline != 0.0 => {
            (recent - baseline) / baseline * 100.0
        }
        _ => 0.0,
    }
}

/// Correlation for a fired signal: half confidence plus the signal scaled
/// by its divisor, capped at the configured maximum.
fn scaled_correlation(signal: f64, divisor: f64, config: &AnomalyDetectionConfig) -> f64 {
    config.correlation_cap.min(0.5 + signal / divisor)
}
