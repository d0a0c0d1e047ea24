// ABOUTME: Intelligence configuration container with env overrides and validation
// ABOUTME: Loads documented defaults, applies CADENCE_* variables, validates, exposes a global
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Type-safe configuration for the analysis engine. Configuration is
//! organized into domain sections:
//! - `anomaly` - detection and cause-attribution thresholds
//! - `segmentation` - interval classification thresholds and bands
//! - `recommendation` - report message templates
//!
//! Defaults match the documented product behavior; individual values can
//! be overridden through `CADENCE_*` environment variables. The loaded
//! configuration is validated before use.

pub mod anomaly;
pub mod error;
pub mod recommendation;
pub mod segmentation;

pub use anomaly::AnomalyDetectionConfig;
pub use error::ConfigError;
pub use recommendation::RecommendationMessages;
pub use segmentation::SegmentationConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Anomaly detection and cause attribution thresholds
    pub anomaly: AnomalyDetectionConfig,
    /// Interval segmentation thresholds and pace bands
    pub segmentation: SegmentationConfig,
    /// Recommendation message templates
    pub recommendation: RecommendationMessages,
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparsable
    /// value or the final configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config = config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Helper to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Anomaly detection overrides
        Self::apply_env_var(
            "CADENCE_ANOMALY_ROLLING_WINDOW_S",
            &mut self.anomaly.rolling_window_s,
        )?;
        Self::apply_env_var(
            "CADENCE_ANOMALY_Z_SCORE_THRESHOLD",
            &mut self.anomaly.z_score_threshold,
        )?;
        Self::apply_env_var(
            "CADENCE_ANOMALY_CONTEXT_WINDOW_S",
            &mut self.anomaly.context_window_s,
        )?;
        Self::apply_env_var(
            "CADENCE_ANOMALY_ELEVATION_CHANGE_M",
            &mut self.anomaly.elevation_change_threshold_m,
        )?;
        Self::apply_env_var(
            "CADENCE_ANOMALY_PACE_CHANGE_MIN_KM",
            &mut self.anomaly.pace_change_threshold_min_km,
        )?;
        Self::apply_env_var(
            "CADENCE_ANOMALY_HR_DRIFT_PERCENT",
            &mut self.anomaly.hr_drift_threshold_percent,
        )?;

        // Segmentation overrides
        Self::apply_env_var(
            "CADENCE_SEGMENTATION_PACE_THRESHOLD_FACTOR",
            &mut self.segmentation.pace_threshold_factor,
        )?;
        Self::apply_env_var(
            "CADENCE_SEGMENTATION_MIN_WORK_DURATION_S",
            &mut self.segmentation.min_work_duration_s,
        )?;
        Self::apply_env_var(
            "CADENCE_SEGMENTATION_MIN_RECOVERY_DURATION_S",
            &mut self.segmentation.min_recovery_duration_s,
        )?;
        Self::apply_env_var(
            "CADENCE_SEGMENTATION_WARMUP_PACE_FLOOR",
            &mut self.segmentation.warmup_pace_floor_min_km,
        )?;
        Self::apply_env_var(
            "CADENCE_SEGMENTATION_COOLDOWN_PACE_FLOOR",
            &mut self.segmentation.cooldown_pace_floor_min_km,
        )?;

        Ok(self)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when a threshold is non-finite, non-positive, or
    /// the pace bands are ordered inconsistently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let anomaly = &self.anomaly;
        if anomaly.rolling_window_s < 2 {
            return Err(ConfigError::InvalidRange(
                "rolling window must span at least 2 seconds",
            ));
        }
        if !anomaly.z_score_threshold.is_finite() || anomaly.z_score_threshold <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "z-score threshold must be positive and finite",
            ));
        }
        if anomaly.elevation_change_threshold_m <= 0.0
            || anomaly.pace_change_threshold_min_km <= 0.0
            || anomaly.hr_drift_threshold_percent <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "cause thresholds must be positive",
            ));
        }
        if anomaly.hr_baseline_window_s == 0 || anomaly.hr_recent_window_s == 0 {
            return Err(ConfigError::InvalidRange(
                "heart-rate windows must be non-empty",
            ));
        }
        if !(0.0..=1.0).contains(&anomaly.correlation_cap)
            || !(0.0..=1.0).contains(&anomaly.default_correlation)
        {
            return Err(ConfigError::ValueOutOfRange(
                "correlations must lie within 0..=1",
            ));
        }
        if anomaly.elevation_correlation_divisor <= 0.0
            || anomaly.pace_correlation_divisor <= 0.0
            || anomaly.hr_drift_correlation_divisor <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "correlation divisors must be positive",
            ));
        }

        let seg = &self.segmentation;
        if seg.pace_threshold_factor <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "pace threshold factor must be positive",
            ));
        }
        if seg.work_stdev_factor < 0.0 || seg.recovery_stdev_factor < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "stdev factors must not be negative",
            ));
        }
        if seg.fast_work_band_min_km >= seg.slow_recovery_band_min_km {
            return Err(ConfigError::InvalidRange(
                "fast work band must be faster than the slow recovery band",
            ));
        }
        if seg.tempo_band_low_min_km > seg.slow_recovery_band_min_km {
            return Err(ConfigError::InvalidRange(
                "tempo band must not start above the slow recovery band",
            ));
        }

        Ok(())
    }
}
