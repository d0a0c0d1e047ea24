// ABOUTME: External data seam: trait for loading per-activity metric streams
// ABOUTME: Also hosts the fixed-point unit conversion applied through metric descriptors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! # Metric Series Provider Seam
//!
//! The engine never performs I/O itself. A [`MetricSeriesProvider`]
//! implementation (device file reader, platform API client, database)
//! supplies descriptor tables and raw sample records; everything below
//! the seam is pure computation. A hard failure from the provider
//! (activity not found) is propagated once and never retried here:
//! retrying an absent-data condition cannot change the outcome.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{ActivityStreams, MetricDescriptor};

/// Supplies metric descriptors and raw per-second sample records per activity.
#[async_trait]
pub trait MetricSeriesProvider: Send + Sync {
    /// Load the descriptor table and raw sample records for an activity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::ResourceNotFound`] when the
    /// activity does not exist in the source.
    async fn load_streams(&self, activity_id: &str) -> AppResult<ActivityStreams>;
}

/// Convert a raw sample through its descriptor's scale factor.
///
/// Factors of one or more are fixed-point denominators (the device
/// stored `value * factor` as an integer), so the raw value is divided.
/// Factors below one are fractional multipliers.
#[must_use]
pub fn convert_value(descriptor: &MetricDescriptor, raw: f64) -> f64 {
    if descriptor.scale_factor >= 1.0 {
        raw / descriptor.scale_factor
    } else {
        raw * descriptor.scale_factor
    }
}

/// Invert [`convert_value`]: recover the raw sample from a converted one.
#[must_use]
pub fn invert_value(descriptor: &MetricDescriptor, converted: f64) -> f64 {
    if descriptor.scale_factor >= 1.0 {
        converted * descriptor.scale_factor
    } else {
        converted / descriptor.scale_factor
    }
}
