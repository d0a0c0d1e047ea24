// ABOUTME: Orchestrates per-metric anomaly detection, cause attribution, and reporting
// ABOUTME: Loads streams once per request and produces ranked anomalies with recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! # Anomaly Engine
//!
//! The engine ties the analysis pipeline together per requested metric:
//! rolling statistics, z-score candidate detection, cause attribution,
//! and context extraction. It holds only immutable configuration, so
//! concurrent detection runs for different activities share nothing and
//! are freely parallelizable.

use async_trait::async_trait;
use chrono::Duration;
use tracing::debug;

use crate::anomaly_detector::detect_candidates;
use crate::cause_classifier::classify_cause;
use crate::config::{AnomalyDetectionConfig, IntelligenceConfig, RecommendationMessages};
use crate::context_extractor::extract_context;
use crate::errors::AppResult;
use crate::models::{metric_names, Anomaly, AnomalyReport, AnomalySummary, ProbableCause};
use crate::providers::MetricSeriesProvider;
use crate::rolling_statistics::rolling_statistics;

/// Per-call parameters for a detection run. `None` fields fall back to
/// the engine's configuration; an omitted metric list falls back to the
/// three running-form metrics.
#[derive(Debug, Clone, Default)]
pub struct DetectionRequest {
    /// Metrics to analyze, in order
    pub metrics: Option<Vec<String>>,
    /// Z-score a sample must strictly exceed to count as an anomaly
    pub z_score_threshold: Option<f64>,
    /// Seconds averaged on each side of an anomaly for its context window
    pub context_window_s: Option<usize>,
}

/// Anomaly detection over a provider's activities
#[async_trait]
pub trait AnomalyDetection {
    /// Detect anomalies across the requested form metrics of one activity.
    ///
    /// Zero anomalies is a valid, non-error outcome. A requested metric
    /// absent from the source data is silently skipped.
    ///
    /// # Errors
    ///
    /// Propagates the provider's not-found error when the activity does
    /// not exist; detection itself never fails on sparse data.
    async fn detect_anomalies(
        &self,
        activity_id: &str,
        request: DetectionRequest,
    ) -> AppResult<AnomalyReport>;
}

/// Anomaly engine over a metric series provider.
///
/// Holds the provider and immutable thresholds; no detection state
/// survives a call.
pub struct AnomalyEngine<P> {
    provider: P,
    config: AnomalyDetectionConfig,
    messages: RecommendationMessages,
}

impl<P: MetricSeriesProvider> AnomalyEngine<P> {
    /// Create an engine using the global configuration
    #[must_use]
    pub fn new(provider: P) -> Self {
        let global = IntelligenceConfig::global();
        Self {
            provider,
            config: global.anomaly.clone(),
            messages: global.recommendation.clone(),
        }
    }

    /// Create an engine with explicit configuration
    #[must_use]
    pub const fn with_config(
        provider: P,
        config: AnomalyDetectionConfig,
        messages: RecommendationMessages,
    ) -> Self {
        Self {
            provider,
            config,
            messages,
        }
    }

    fn default_metrics() -> Vec<String> {
        vec![
            metric_names::GROUND_CONTACT_TIME.to_owned(),
            metric_names::VERTICAL_OSCILLATION.to_owned(),
            metric_names::VERTICAL_RATIO.to_owned(),
        ]
    }

    fn summarize(anomalies: &[Anomaly]) -> AnomalySummary {
        let mut summary = AnomalySummary::default();
        for anomaly in anomalies {
            match anomaly.metric.as_str() {
                metric_names::GROUND_CONTACT_TIME => summary.ground_contact_time_count += 1,
                metric_names::VERTICAL_OSCILLATION => summary.vertical_oscillation_count += 1,
                metric_names::VERTICAL_RATIO => summary.vertical_ratio_count += 1,
                _ => {}
            }
            match anomaly.probable_cause {
                ProbableCause::ElevationChange => summary.elevation_related += 1,
                ProbableCause::PaceChange => summary.pace_related += 1,
                ProbableCause::Fatigue => summary.fatigue_related += 1,
            }
        }
        summary
    }

    fn recommendations(&self, summary: &AnomalySummary) -> Vec<String> {
        let mut recommendations = Vec::new();
        if summary.elevation_related > 0 {
            recommendations.push(self.messages.elevation_training.clone());
        }
        if summary.pace_related > 0 {
            recommendations.push(self.messages.pacing_strategy.clone());
        }
        if summary.fatigue_related > 0 {
            recommendations.push(self.messages.aerobic_base.clone());
        }
        recommendations
    }
}

#[async_trait]
impl<P: MetricSeriesProvider> AnomalyDetection for AnomalyEngine<P> {
    async fn detect_anomalies(
        &self,
        activity_id: &str,
        request: DetectionRequest,
    ) -> AppResult<AnomalyReport> {
        let streams = self.provider.load_streams(activity_id).await?;

        // Companion series are derived once and shared across metrics.
        let elevation = streams.series(metric_names::ELEVATION);
        let pace = streams.series(metric_names::PACE);
        let heart_rate = streams.series(metric_names::HEART_RATE);

        let metrics = request.metrics.unwrap_or_else(Self::default_metrics);
        let z_threshold = request
            .z_score_threshold
            .unwrap_or(self.config.z_score_threshold);
        let context_window = request
            .context_window_s
            .unwrap_or(self.config.context_window_s);

        let mut anomalies: Vec<Anomaly> = Vec::new();

        for metric in &metrics {
            let Some(series) = streams.series(metric) else {
                debug!(
                    activity_id,
                    metric = metric.as_str(),
                    "metric absent from source data, skipping"
                );
                continue;
            };

            let stats = rolling_statistics(&series, self.config.rolling_window_s);
            for candidate in detect_candidates(metric, &series, &stats, z_threshold) {
                let classified = classify_cause(
                    candidate.timestamp_index,
                    elevation.as_ref(),
                    pace.as_ref(),
                    heart_rate.as_ref(),
                    &self.config,
                );
                let context = extract_context(
                    candidate.timestamp_index,
                    &series,
                    elevation.as_ref(),
                    context_window,
                );
                let occurred_at = streams
                    .start_time
                    .map(|start| start + Duration::seconds(candidate.timestamp_index as i64));

                anomalies.push(Anomaly {
                    id: anomalies.len() as u64 + 1,
                    timestamp_index: candidate.timestamp_index,
                    occurred_at,
                    metric: candidate.metric,
                    observed_value: candidate.observed_value,
                    baseline_value: candidate.baseline_value,
                    z_score: candidate.z_score,
                    probable_cause: classified.cause,
                    cause_details: classified.details,
                    context,
                });
            }
        }

        let summary = Self::summarize(&anomalies);
        let recommendations = self.recommendations(&summary);
        debug!(
            activity_id,
            anomaly_count = anomalies.len(),
            "anomaly detection finished"
        );

        Ok(AnomalyReport {
            activity_id: activity_id.to_owned(),
            anomalies,
            summary,
            recommendations,
        })
    }
}
