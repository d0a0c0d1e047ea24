// ABOUTME: Classifies ordered split lists into warmup/work/recovery/cooldown/steady segments
// ABOUTME: Two-tier thresholds: relative pace statistics with absolute band fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! # Interval Segmenter
//!
//! Splits are classified in order against thresholds derived from the
//! activity's own pace distribution; when that distribution is too flat
//! to separate efforts (a steady tempo run collapses the relative
//! thresholds onto the mean), absolute pace bands take over. Every
//! split receives a type - `Steady` is the explicit default, never an
//! unclassified hole - and consecutive splits of the same type merge
//! into one segment, so the returned segments partition the split list
//! exactly.

use tracing::debug;

use crate::config::SegmentationConfig;
use crate::interval_metrics::metrics_for_splits;
use crate::models::{Segment, SegmentType, Split};

/// Classify an ordered split list into training-intensity segments.
///
/// Splits without a pace value classify as steady. An empty split list
/// yields an empty segment list, not an error.
#[must_use]
pub fn detect_intervals(splits: &[Split], config: &SegmentationConfig) -> Vec<Segment> {
    if splits.is_empty() {
        return Vec::new();
    }

    let paces: Vec<f64> = splits.iter().filter_map(|s| s.avg_pace_min_km).collect();
    let (mean_pace, pace_stdev) = pace_statistics(&paces);
    let work_threshold = config.work_stdev_factor.mul_add(-pace_stdev, mean_pace);
    let recovery_threshold = config.recovery_stdev_factor.mul_add(pace_stdev, mean_pace);

    // TODO: gate work/recovery runs on min_work_duration_s and
    // min_recovery_duration_s by merging short segments into their
    // neighbours; both values are accepted in config but unused today.
    let types: Vec<SegmentType> = splits
        .iter()
        .enumerate()
        .map(|(position, split)| {
            classify_split(
                split,
                position == 0,
                position == splits.len() - 1,
                work_threshold,
                recovery_threshold,
                config,
            )
        })
        .collect();

    let segments = merge_consecutive(splits, &types);
    debug!(
        split_count = splits.len(),
        segment_count = segments.len(),
        "interval segmentation finished"
    );
    segments
}

/// Mean and population stdev of the valid split paces
fn pace_statistics(paces: &[f64]) -> (f64, f64) {
    if paces.is_empty() {
        return (0.0, 0.0);
    }
    let mean = paces.iter().sum::<f64>() / paces.len() as f64;
    let variance = paces
        .iter()
        .map(|pace| {
            let delta = pace - mean;
            delta * delta
        })
        .sum::<f64>()
        / paces.len() as f64;
    (mean, variance.sqrt())
}

fn classify_split(
    split: &Split,
    is_first: bool,
    is_last: bool,
    work_threshold: f64,
    recovery_threshold: f64,
    config: &SegmentationConfig,
) -> SegmentType {
    let Some(pace) = split.avg_pace_min_km else {
        return SegmentType::Steady;
    };

    // Tier one: positional floors, then the relative thresholds.
    if is_first && pace > config.warmup_pace_floor_min_km {
        return SegmentType::Warmup;
    }
    if is_last && pace > config.cooldown_pace_floor_min_km {
        return SegmentType::Cooldown;
    }
    if pace < work_threshold {
        return SegmentType::Work;
    }
    if pace > recovery_threshold {
        return SegmentType::Recovery;
    }

    // Tier two: absolute pace bands for low-variance activities.
    if pace < config.fast_work_band_min_km {
        return SegmentType::Work;
    }
    if pace > config.slow_recovery_band_min_km {
        if is_first {
            return SegmentType::Warmup;
        }
        if is_last {
            return SegmentType::Cooldown;
        }
        return SegmentType::Recovery;
    }
    if pace >= config.tempo_band_low_min_km {
        return SegmentType::Work;
    }
    if is_first && pace >= config.fast_work_band_min_km {
        return SegmentType::Warmup;
    }

    SegmentType::Steady
}

/// Merge consecutive equally-typed splits into numbered segments
fn merge_consecutive(splits: &[Split], types: &[SegmentType]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run_start = 0usize;

    for index in 1..=types.len() {
        let run_ended = index == types.len() || types[index] != types[run_start];
        if !run_ended {
            continue;
        }

        let first = run_start;
        let last = index - 1;
        segments.push(Segment {
            segment_number: segments.len() as u32 + 1,
            segment_type: types[first],
            start_time_s: splits[first].start_time_s,
            end_time_s: splits[last].end_time_s,
            first_split: first,
            last_split: last,
            metrics: metrics_for_splits(&splits[first..=last]),
        });
        run_start = index;
    }

    segments
}
