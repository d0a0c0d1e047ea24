// ABOUTME: Library entry point for the Cadence running-form intelligence engine
// ABOUTME: Re-exports the anomaly, interval, fatigue, and configuration surfaces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! # Cadence Intelligence
//!
//! Analysis engine for second-by-second biomechanical and pacing time
//! series captured during endurance-running activities.
//!
//! ## Features
//!
//! - **Anomaly detection**: z-score detection over rolling statistics of
//!   ground contact time, vertical oscillation, and vertical ratio, with
//!   each anomaly attributed to elevation change, pace change, or fatigue
//! - **Interval segmentation**: classification of an activity's splits
//!   into warmup/work/recovery/cooldown/steady phases
//! - **Fatigue and recovery**: first-versus-last work-segment degradation
//!   and heart-rate recovery speed
//!
//! ## Architecture
//!
//! The crate is a pure analysis core. I/O lives behind the
//! [`providers::MetricSeriesProvider`] seam; the command/report layer
//! that renders results and the storage layer that persists splits are
//! external collaborators. Every operation computes from caller-supplied
//! inputs and holds no state between calls, so concurrent runs for
//! different activities share nothing.

/// Z-score candidate detection over rolling statistics
pub mod anomaly_detector;
/// Per-activity orchestration of detection, attribution, and reporting
pub mod anomaly_engine;
/// Cause attribution for detected anomalies
pub mod cause_classifier;
/// Threshold configuration with env overrides and validation
pub mod config;
/// Before/after context extraction around anomalies
pub mod context_extractor;
/// Unified error types
pub mod errors;
/// Fatigue quantification and recovery-speed calculation
pub mod fatigue_analyzer;
/// Segment metric aggregation
pub mod interval_metrics;
/// Split classification into training-intensity segments
pub mod interval_segmenter;
/// Domain models
pub mod models;
/// External data seam and unit conversion
pub mod providers;
/// Rolling mean/stdev primitive
pub mod rolling_statistics;

pub use anomaly_engine::{AnomalyDetection, AnomalyEngine, DetectionRequest};
pub use config::IntelligenceConfig;
pub use errors::{AppError, AppResult, ErrorCode};
pub use fatigue_analyzer::{calculate_recovery_speed, detect_fatigue};
pub use interval_metrics::aggregate_segment_metrics;
pub use interval_segmenter::detect_intervals;
pub use models::{
    ActivityStreams, Anomaly, AnomalyReport, AnomalySummary, FatigueReport, MetricDescriptor,
    SampleSeries, Segment, SegmentMetrics, SegmentType, Split,
};
pub use providers::{convert_value, invert_value, MetricSeriesProvider};
pub use rolling_statistics::{rolling_statistics, RollingStatistics};
