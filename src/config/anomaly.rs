// ABOUTME: Anomaly detection configuration: rolling window, z-score, and cause thresholds
// ABOUTME: Consolidates every detection and attribution constant behind documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Anomaly Detection Configuration
//!
//! Every threshold the detector and cause classifier consult lives here,
//! so alternate thresholds can be exercised in tests or deployments
//! without code changes.

use serde::{Deserialize, Serialize};

/// Thresholds and window sizes for anomaly detection and cause attribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyDetectionConfig {
    /// Full width (seconds) of the rolling mean/stdev window
    pub rolling_window_s: usize,
    /// Z-score a sample must strictly exceed to count as an anomaly
    pub z_score_threshold: f64,
    /// Seconds averaged on each side of an anomaly for its context window
    pub context_window_s: usize,
    /// Seconds looked at either side of an anomaly for elevation spread
    pub elevation_window_s: usize,
    /// Elevation spread (m) that attributes an anomaly to terrain
    pub elevation_change_threshold_m: f64,
    /// Seconds looked at either side of an anomaly for pace spread
    pub pace_window_s: usize,
    /// Pace spread (min/km) that attributes an anomaly to a pace transition
    pub pace_change_threshold_min_km: f64,
    /// Heart-rate drift (percent) that attributes an anomaly to fatigue
    pub hr_drift_threshold_percent: f64,
    /// Seconds of the activity opening used as the heart-rate baseline
    pub hr_baseline_window_s: usize,
    /// Seconds before the anomaly used as the recent heart-rate window
    pub hr_recent_window_s: usize,
    /// Upper bound on any attributed correlation
    pub correlation_cap: f64,
    /// Correlation reported when no companion signal fires
    pub default_correlation: f64,
    /// Elevation spread (m) that maps to full additional correlation
    pub elevation_correlation_divisor: f64,
    /// Pace spread (min/km) that maps to full additional correlation
    pub pace_correlation_divisor: f64,
    /// Heart-rate drift (percent) that maps to full additional correlation
    pub hr_drift_correlation_divisor: f64,
}

impl Default for AnomalyDetectionConfig {
    fn default() -> Self {
        Self {
            rolling_window_s: 60,
            z_score_threshold: 2.0,
            context_window_s: 30,
            elevation_window_s: 5,
            elevation_change_threshold_m: 5.0,
            pace_window_s: 10,
            pace_change_threshold_min_km: 0.25,
            hr_drift_threshold_percent: 10.0,
            hr_baseline_window_s: 300,
            hr_recent_window_s: 60,
            correlation_cap: 0.95,
            default_correlation: 0.3,
            elevation_correlation_divisor: 20.0,
            pace_correlation_divisor: 0.5,
            hr_drift_correlation_divisor: 30.0,
        }
    }
}
