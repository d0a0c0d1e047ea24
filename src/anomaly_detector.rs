// ABOUTME: Z-score thresholding of sparse metric series against rolling statistics
// ABOUTME: Emits anomaly candidates in temporal order for downstream cause attribution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Z-score anomaly candidate detection.

use crate::models::SampleSeries;
use crate::rolling_statistics::RollingStatistics;

/// A sample flagged as anomalous, before cause attribution
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyCandidate {
    /// Elapsed seconds from activity start
    pub timestamp_index: usize,
    /// Name of the flagged metric
    pub metric: String,
    /// Observed sample value
    pub observed_value: f64,
    /// Rolling-mean baseline at the same index
    pub baseline_value: f64,
    /// Standard deviations between observation and baseline
    pub z_score: f64,
}

/// Flag every index whose sample deviates from the rolling baseline by
/// strictly more than `z_threshold` standard deviations.
///
/// Indices with an absent sample or a zero rolling stdev (the
/// insufficient-data sentinel) are skipped, never errored. Output is in
/// ascending timestamp order; severity does not reorder it.
#[must_use]
pub fn detect_candidates(
    metric: &str,
    series: &SampleSeries,
    stats: &RollingStatistics,
    z_threshold: f64,
) -> Vec<AnomalyCandidate> {
    let mut candidates = Vec::new();

    for (index, value) in series.values().iter().enumerate() {
        let Some(observed) = value else { continue };
        let (Some(&mean), Some(&std_dev)) = (stats.mean.get(index), stats.std_dev.get(index))
        else {
            continue;
        };
        if std_dev <= 0.0 {
            continue;
        }

        let z_score = (observed - mean).abs() / std_dev;
        if z_score > z_threshold {
            candidates.push(AnomalyCandidate {
                timestamp_index: index,
                metric: metric.to_owned(),
                observed_value: *observed,
                baseline_value: mean,
                z_score,
            });
        }
    }

    candidates
}
