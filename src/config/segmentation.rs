// ABOUTME: Interval segmentation configuration: relative factors and absolute pace bands
// ABOUTME: Two-tier thresholds so low-variance runs fall back to stable absolute bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Interval Segmentation Configuration
//!
//! Relative statistics alone misclassify low-variance runs: on a steady
//! tempo effort the pace stdev collapses and the work/recovery thresholds
//! meet at the mean. The absolute pace bands below give classification a
//! stable second tier for exactly those runs.

use serde::{Deserialize, Serialize};

/// Thresholds for classifying splits into training-intensity phases.
/// All paces are minutes per kilometer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Pace threshold factor accepted by callers; reserved for threshold scaling
    pub pace_threshold_factor: f64,
    /// Minimum duration (s) a work segment should span; not yet enforced
    pub min_work_duration_s: f64,
    /// Minimum duration (s) a recovery segment should span; not yet enforced
    pub min_recovery_duration_s: f64,
    /// Stdev multiples subtracted from the mean pace for the work threshold
    pub work_stdev_factor: f64,
    /// Stdev multiples added to the mean pace for the recovery threshold
    pub recovery_stdev_factor: f64,
    /// First split slower than this pace classifies as warmup
    pub warmup_pace_floor_min_km: f64,
    /// Last split slower than this pace classifies as cooldown
    pub cooldown_pace_floor_min_km: f64,
    /// Absolute band: any split faster than this pace is work
    pub fast_work_band_min_km: f64,
    /// Absolute band: any split slower than this pace is recovery
    pub slow_recovery_band_min_km: f64,
    /// Absolute band: paces from here up to the slow band are tempo work
    pub tempo_band_low_min_km: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            pace_threshold_factor: 1.3,
            min_work_duration_s: 180.0,
            min_recovery_duration_s: 60.0,
            work_stdev_factor: 0.5,
            recovery_stdev_factor: 0.3,
            warmup_pace_floor_min_km: 5.5,
            cooldown_pace_floor_min_km: 6.0,
            fast_work_band_min_km: 4.5,
            slow_recovery_band_min_km: 5.3,
            tempo_band_low_min_km: 5.0,
        }
    }
}
