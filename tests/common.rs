// ABOUTME: Shared test utilities for integration tests
// ABOUTME: In-memory metric series provider and fixture builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence
#![allow(dead_code, clippy::must_use_candidate, clippy::missing_panics_doc)]
#![allow(missing_docs)]

//! Shared test utilities for `cadence_intelligence`
//!
//! Provides an in-memory [`MetricSeriesProvider`] and fixture builders
//! to reduce duplication across integration tests.

use async_trait::async_trait;
use std::collections::HashMap;

use cadence_intelligence::errors::{AppError, AppResult};
use cadence_intelligence::models::{ActivityStreams, MetricDescriptor, Split};
use cadence_intelligence::providers::MetricSeriesProvider;

/// In-memory provider backed by pre-built activity streams
#[derive(Debug, Default)]
pub struct StaticSeriesProvider {
    streams: HashMap<String, ActivityStreams>,
}

impl StaticSeriesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_streams(mut self, streams: ActivityStreams) -> Self {
        self.streams.insert(streams.activity_id.clone(), streams);
        self
    }
}

#[async_trait]
impl MetricSeriesProvider for StaticSeriesProvider {
    async fn load_streams(&self, activity_id: &str) -> AppResult<ActivityStreams> {
        self.streams
            .get(activity_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("activity {activity_id}")))
    }
}

/// Build activity streams from named metric columns, one record per
/// second. Descriptors are assigned column indices in argument order
/// with a unit scale factor.
pub fn streams(activity_id: &str, metrics: &[(&str, Vec<Option<f64>>)]) -> ActivityStreams {
    let descriptors: HashMap<String, MetricDescriptor> = metrics
        .iter()
        .enumerate()
        .map(|(index, (name, _))| {
            (
                (*name).to_owned(),
                MetricDescriptor {
                    name: (*name).to_owned(),
                    sample_index: index,
                    scale_factor: 1.0,
                },
            )
        })
        .collect();

    let length = metrics.iter().map(|(_, values)| values.len()).max().unwrap_or(0);
    let records = (0..length)
        .map(|second| {
            metrics
                .iter()
                .map(|(_, values)| values.get(second).copied().flatten())
                .collect()
        })
        .collect();

    ActivityStreams {
        activity_id: activity_id.to_owned(),
        start_time: None,
        descriptors,
        records,
    }
}

/// Fully-populated metric column from plain values
pub fn column(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Constant metric column of the given length
pub fn constant_column(value: f64, length: usize) -> Vec<Option<f64>> {
    vec![Some(value); length]
}

/// Split fixture covering `[start_time_s, end_time_s)` at the given pace
pub fn split(split_number: u32, start_time_s: f64, end_time_s: f64, pace: f64) -> Split {
    Split {
        split_number,
        start_time_s,
        end_time_s,
        avg_pace_min_km: Some(pace),
        avg_heart_rate: None,
        avg_ground_contact_time_ms: None,
        avg_vertical_oscillation_mm: None,
        avg_vertical_ratio_percent: None,
    }
}
