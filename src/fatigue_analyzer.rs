// ABOUTME: Fatigue quantification from first/last work segments and recovery-speed calculation
// ABOUTME: Insufficient work segments yield zero indicators; missing HR yields none, not zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! # Fatigue and Recovery Analysis
//!
//! Fatigue compares the first and last work segment of an activity;
//! recovery speed measures how quickly heart rate falls from a work
//! segment into the recovery that follows it. Both treat missing data
//! as an explicit no-signal outcome rather than an error: a single
//! work segment is a common, valid activity shape.

use crate::models::{FatigueReport, Segment, SegmentType};

/// Quantify degradation between the first and last work segment.
///
/// With fewer than two work segments every indicator is zero - there is
/// nothing to compare, which is not an error. Indicators whose metric
/// is missing on either side are likewise zero.
#[must_use]
pub fn detect_fatigue(segments: &[Segment]) -> FatigueReport {
    let mut work = segments
        .iter()
        .filter(|s| s.segment_type == SegmentType::Work);
    let (Some(first), Some(last)) = (work.next(), work.last()) else {
        return FatigueReport::default();
    };

    FatigueReport {
        hr_increase_bpm: delta(first.metrics.avg_heart_rate, last.metrics.avg_heart_rate),
        pace_degradation_s_per_km: delta(
            first.metrics.avg_pace_min_km,
            last.metrics.avg_pace_min_km,
        ) * 60.0,
        gct_degradation_ms: delta(
            first.metrics.avg_ground_contact_time_ms,
            last.metrics.avg_ground_contact_time_ms,
        ),
    }
}

/// Heart-rate recovery rate (bpm per minute) from a work segment into
/// the recovery segment immediately following it.
///
/// Returns `None` - distinct from zero recovery - when either segment
/// lacks an average heart rate or the recovery duration is not
/// positive: "no data" must never read as "no recovery".
#[must_use]
pub fn calculate_recovery_speed(work: &Segment, recovery: &Segment) -> Option<f64> {
    let work_hr = work.metrics.avg_heart_rate?;
    let recovery_hr = recovery.metrics.avg_heart_rate?;

    let recovery_minutes = (recovery.end_time_s - recovery.start_time_s) / 60.0;
    if recovery_minutes <= 0.0 {
        return None;
    }

    Some((work_hr - recovery_hr) / recovery_minutes)
}

fn delta(first: Option<f64>, last: Option<f64>) -> f64 {
    match (first, last) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    }
}
