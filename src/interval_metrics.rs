// ABOUTME: Per-segment arithmetic means of heart rate, pace, and running-form metrics
// ABOUTME: Empty segments aggregate to an empty value; bad split ranges fail fast
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Segment metric aggregation.

use crate::errors::{AppError, AppResult};
use crate::models::{Segment, SegmentMetrics, Split};

/// Aggregate a segment's metrics from its member splits.
///
/// An empty split list yields the all-`None` metrics value. A segment
/// whose split range does not fit the supplied list is caller misuse
/// and is rejected outright - no silent clamping.
///
/// # Errors
///
/// Returns [`crate::errors::ErrorCode::InvalidInput`] when the segment
/// addresses splits outside the supplied list.
pub fn aggregate_segment_metrics(segment: &Segment, splits: &[Split]) -> AppResult<SegmentMetrics> {
    if splits.is_empty() {
        return Ok(SegmentMetrics::default());
    }
    if segment.first_split > segment.last_split || segment.last_split >= splits.len() {
        return Err(AppError::invalid_input(format!(
            "segment {} addresses splits {}..={} outside the supplied list of {}",
            segment.segment_number,
            segment.first_split,
            segment.last_split,
            splits.len()
        ))
        .with_resource_id(segment.segment_number.to_string()));
    }

    Ok(metrics_for_splits(
        &splits[segment.first_split..=segment.last_split],
    ))
}

/// Arithmetic means over a slice of splits; `None` per metric when no
/// split carries a value for it.
#[must_use]
pub fn metrics_for_splits(splits: &[Split]) -> SegmentMetrics {
    SegmentMetrics {
        avg_heart_rate: mean_of(splits.iter().map(|s| s.avg_heart_rate)),
        avg_pace_min_km: mean_of(splits.iter().map(|s| s.avg_pace_min_km)),
        avg_ground_contact_time_ms: mean_of(splits.iter().map(|s| s.avg_ground_contact_time_ms)),
        avg_vertical_oscillation_mm: mean_of(splits.iter().map(|s| s.avg_vertical_oscillation_mm)),
        avg_vertical_ratio_percent: mean_of(splits.iter().map(|s| s.avg_vertical_ratio_percent)),
    }
}

/// Mean of the present values, `None` when there are none
fn mean_of(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.flatten() {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
