// ABOUTME: Symmetric before/after averages around an anomaly timestamp
// ABOUTME: Boundary-safe extraction over the metric and elevation series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Context window extraction.

use crate::models::{ContextSide, ContextWindow, SampleSeries};

/// Average the metric and elevation over `[index - window, index)` and
/// `[index, index + window)`, clipped at the sequence boundaries.
///
/// An anomaly at index 0 or at the final index is handled like any
/// other; a side with no samples averages to `0.0`.
#[must_use]
pub fn extract_context(
    index: usize,
    metric: &SampleSeries,
    elevation: Option<&SampleSeries>,
    window: usize,
) -> ContextWindow {
    let before = index.saturating_sub(window)..index;
    let after = index..index.saturating_add(window);

    ContextWindow {
        before: side(metric, elevation, before),
        after: side(metric, elevation, after),
    }
}

fn side(
    metric: &SampleSeries,
    elevation: Option<&SampleSeries>,
    range: std::ops::Range<usize>,
) -> ContextSide {
    ContextSide {
        metric_avg: metric.mean_over(range.clone()).unwrap_or(0.0),
        elevation_avg: elevation
            .and_then(|s| s.mean_over(range))
            .unwrap_or(0.0),
    }
}
