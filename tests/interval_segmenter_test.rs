// ABOUTME: Tests for split classification into training-intensity segments
// ABOUTME: Covers phase detection, the absolute-band fallback, merging, and partition safety
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use cadence_intelligence::config::SegmentationConfig;
use cadence_intelligence::detect_intervals;
use cadence_intelligence::models::{Segment, SegmentType, Split};

use common::split;

/// Consecutive splits of the given paces, 300 seconds each
fn splits_with_paces(paces: &[f64]) -> Vec<Split> {
    paces
        .iter()
        .enumerate()
        .map(|(i, &pace)| {
            split(
                i as u32 + 1,
                i as f64 * 300.0,
                (i as f64 + 1.0) * 300.0,
                pace,
            )
        })
        .collect()
}

fn segment_types(segments: &[Segment]) -> Vec<SegmentType> {
    segments.iter().map(|s| s.segment_type).collect()
}

/// Segments must cover every split exactly once, in order, with
/// contiguous time ranges and 1-based sequential numbering.
fn assert_partitions(segments: &[Segment], splits: &[Split]) {
    assert!(!segments.is_empty());
    assert_eq!(segments[0].first_split, 0);
    assert_eq!(segments[segments.len() - 1].last_split, splits.len() - 1);
    assert!((segments[0].start_time_s - splits[0].start_time_s).abs() < f64::EPSILON);
    assert!(
        (segments[segments.len() - 1].end_time_s - splits[splits.len() - 1].end_time_s).abs()
            < f64::EPSILON
    );

    for (index, pair) in segments.windows(2).enumerate() {
        assert_eq!(pair[1].first_split, pair[0].last_split + 1, "gap after segment {index}");
        assert!((pair[1].start_time_s - pair[0].end_time_s).abs() < f64::EPSILON);
    }
    for (index, segment) in segments.iter().enumerate() {
        assert_eq!(segment.segment_number, index as u32 + 1);
        assert!(segment.first_split <= segment.last_split);
    }

    let covered: usize = segments.iter().map(Segment::split_count).sum();
    assert_eq!(covered, splits.len());
}

#[test]
fn four_phase_run_detects_all_phases() {
    let splits = splits_with_paces(&[6.0, 4.0, 5.5, 6.5]);
    let segments = detect_intervals(&splits, &SegmentationConfig::default());

    assert_eq!(
        segment_types(&segments),
        vec![
            SegmentType::Warmup,
            SegmentType::Work,
            SegmentType::Recovery,
            SegmentType::Cooldown
        ]
    );
    assert_partitions(&segments, &splits);
}

#[test]
fn consecutive_work_splits_merge_into_one_segment() {
    let splits = splits_with_paces(&[6.0, 4.0, 4.1, 6.5, 4.0, 7.0]);
    let segments = detect_intervals(&splits, &SegmentationConfig::default());

    assert_eq!(
        segment_types(&segments),
        vec![
            SegmentType::Warmup,
            SegmentType::Work,
            SegmentType::Recovery,
            SegmentType::Work,
            SegmentType::Cooldown
        ]
    );
    // The merged work segment spans splits 2 and 3
    assert_eq!(segments[1].first_split, 1);
    assert_eq!(segments[1].last_split, 2);
    assert!((segments[1].start_time_s - 300.0).abs() < f64::EPSILON);
    assert!((segments[1].end_time_s - 900.0).abs() < f64::EPSILON);
    assert_partitions(&segments, &splits);
}

#[test]
fn zero_variance_tempo_run_is_work_not_noise() {
    // Relative thresholds collapse onto the mean here; the absolute
    // tempo band keeps the classification stable.
    let splits = splits_with_paces(&[5.2, 5.2, 5.2]);
    let segments = detect_intervals(&splits, &SegmentationConfig::default());

    assert_eq!(segment_types(&segments), vec![SegmentType::Work]);
    assert_eq!(segments[0].split_count(), 3);
    assert_partitions(&segments, &splits);
}

#[test]
fn zero_variance_easy_run_defaults_to_steady() {
    let splits = splits_with_paces(&[4.7, 4.7, 4.7]);
    let segments = detect_intervals(&splits, &SegmentationConfig::default());

    // First split lands in the 4.5-5.0 warmup band; the rest are steady
    assert_eq!(
        segment_types(&segments),
        vec![SegmentType::Warmup, SegmentType::Steady]
    );
    assert_eq!(segments[1].split_count(), 2);
    assert_partitions(&segments, &splits);
}

#[test]
fn fast_uniform_run_is_all_work() {
    let splits = splits_with_paces(&[4.0, 4.0]);
    let segments = detect_intervals(&splits, &SegmentationConfig::default());

    assert_eq!(segment_types(&segments), vec![SegmentType::Work]);
    assert_partitions(&segments, &splits);
}

#[test]
fn slow_interior_splits_in_a_flat_run_become_recovery() {
    let splits = splits_with_paces(&[5.4, 5.4, 5.4, 5.4]);
    let segments = detect_intervals(&splits, &SegmentationConfig::default());

    // 5.4 sits above the slow band: positional first/last become
    // warmup/cooldown, the interior becomes recovery.
    assert_eq!(
        segment_types(&segments),
        vec![
            SegmentType::Warmup,
            SegmentType::Recovery,
            SegmentType::Cooldown
        ]
    );
    assert_partitions(&segments, &splits);
}

#[test]
fn splits_without_pace_classify_as_steady() {
    let mut splits = splits_with_paces(&[5.2, 5.2, 5.2]);
    splits[1].avg_pace_min_km = None;
    let segments = detect_intervals(&splits, &SegmentationConfig::default());

    assert_eq!(
        segment_types(&segments),
        vec![SegmentType::Work, SegmentType::Steady, SegmentType::Work]
    );
    assert_partitions(&segments, &splits);
}

#[test]
fn empty_split_list_yields_no_segments() {
    assert!(detect_intervals(&[], &SegmentationConfig::default()).is_empty());
}

#[test]
fn every_split_always_receives_a_type() {
    // Sweep a range of pace shapes; no shape may leave a gap
    let shapes: [&[f64]; 6] = [
        &[5.0],
        &[7.0],
        &[4.2, 6.8, 4.2, 6.8, 4.2],
        &[5.1, 5.15, 5.2, 5.25],
        &[6.1, 6.1, 6.1],
        &[3.5, 5.9, 3.6, 6.2, 3.4, 6.0, 7.1],
    ];
    for paces in shapes {
        let splits = splits_with_paces(paces);
        let segments = detect_intervals(&splits, &SegmentationConfig::default());
        assert_partitions(&segments, &splits);
    }
}

#[test]
fn segment_metrics_aggregate_member_splits() {
    let mut splits = splits_with_paces(&[4.0, 4.0]);
    splits[0].avg_heart_rate = Some(150.0);
    splits[1].avg_heart_rate = Some(160.0);
    splits[0].avg_ground_contact_time_ms = Some(250.0);

    let segments = detect_intervals(&splits, &SegmentationConfig::default());

    assert_eq!(segments.len(), 1);
    let metrics = segments[0].metrics;
    assert!((metrics.avg_heart_rate.unwrap() - 155.0).abs() < 1e-9);
    assert!((metrics.avg_pace_min_km.unwrap() - 4.0).abs() < 1e-9);
    // Only one split carries ground contact time; its mean is that value
    assert!((metrics.avg_ground_contact_time_ms.unwrap() - 250.0).abs() < 1e-9);
    assert!(metrics.avg_vertical_oscillation_mm.is_none());
}
