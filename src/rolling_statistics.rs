// ABOUTME: Windowed mean and standard deviation over sparse per-second series
// ABOUTME: Shared primitive feeding z-score anomaly detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Rolling mean/stdev over a sparse sequence.
//!
//! The window for index `i` is `[i - W/2, i + W/2)`, clipped at the
//! sequence boundaries, with absent samples excluded. Indices whose
//! window holds fewer than two valid samples get the `0.0 / 0.0`
//! sentinel, which downstream detection treats as "insufficient data"
//! and skips. The computation is pure and never fails.

use crate::models::SampleSeries;

/// Rolling mean and population standard deviation, one value per input index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingStatistics {
    /// Rolling mean per index; `0.0` sentinel under two valid samples
    pub mean: Vec<f64>,
    /// Rolling population stdev per index; `0.0` sentinel under two valid samples
    pub std_dev: Vec<f64>,
}

impl RollingStatistics {
    /// Number of indices covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Whether the statistics cover no indices
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

/// Compute rolling statistics for `series` with a full window width of
/// `window` samples.
#[must_use]
pub fn rolling_statistics(series: &SampleSeries, window: usize) -> RollingStatistics {
    let n = series.len();
    let half = window / 2;
    let mut mean = Vec::with_capacity(n);
    let mut std_dev = Vec::with_capacity(n);

    for i in 0..n {
        let start = i.saturating_sub(half);
        let end = (i + half).min(n);

        let mut sum = 0.0;
        let mut count = 0usize;
        for value in series.values()[start..end].iter().copied().flatten() {
            sum += value;
            count += 1;
        }

        if count < 2 {
            mean.push(0.0);
            std_dev.push(0.0);
            continue;
        }

        let window_mean = sum / count as f64;
        let mut squared = 0.0;
        for value in series.values()[start..end].iter().copied().flatten() {
            let delta = value - window_mean;
            squared += delta * delta;
        }

        mean.push(window_mean);
        std_dev.push((squared / count as f64).sqrt());
    }

    RollingStatistics { mean, std_dev }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_yields_empty_statistics() {
        let stats = rolling_statistics(&SampleSeries::default(), 60);
        assert!(stats.is_empty());
    }

    #[test]
    fn sparse_window_gets_sentinel() {
        // Only one valid sample near index 0 -> sentinel there
        let series = SampleSeries::new(vec![Some(10.0), None, None, None, Some(12.0), Some(11.0)]);
        let stats = rolling_statistics(&series, 4);
        assert!((stats.mean[0] - 0.0).abs() < f64::EPSILON);
        assert!((stats.std_dev[0] - 0.0).abs() < f64::EPSILON);
        // Index 4 sees {12.0, 11.0} within [2, 6)
        assert!((stats.mean[4] - 11.5).abs() < 1e-9);
        assert!(stats.std_dev[4] > 0.0);
    }

    #[test]
    fn constant_window_has_zero_deviation() {
        let series = SampleSeries::from_values(vec![5.0; 20]);
        let stats = rolling_statistics(&series, 10);
        assert!(stats.mean.iter().all(|m| (m - 5.0).abs() < 1e-9));
        assert!(stats.std_dev.iter().all(|s| s.abs() < 1e-9));
    }

    #[test]
    fn never_produces_non_finite_values() {
        let series = SampleSeries::new(vec![None; 50]);
        let stats = rolling_statistics(&series, 60);
        assert!(stats.mean.iter().chain(&stats.std_dev).all(|v| v.is_finite()));
    }
}
