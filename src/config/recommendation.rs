// ABOUTME: Recommendation message templates for the anomaly report
// ABOUTME: One configurable suggestion per cause category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cadence Fitness Intelligence

//! Recommendation message templates, one per cause category. Deployments
//! can override the wording without touching the engine.

use serde::{Deserialize, Serialize};

/// Template messages emitted when a cause category appears in a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationMessages {
    /// Suggestion when anomalies cluster on elevation changes
    pub elevation_training: String,
    /// Suggestion when anomalies cluster on pace transitions
    pub pacing_strategy: String,
    /// Suggestion when anomalies track accumulated fatigue
    pub aerobic_base: String,
}

impl Default for RecommendationMessages {
    fn default() -> Self {
        Self {
            elevation_training:
                "Form anomalies cluster on elevation changes - add hill repeats to build climbing strength"
                    .into(),
            pacing_strategy:
                "Form breaks down around abrupt pace changes - practice smoother pacing transitions"
                    .into(),
            aerobic_base:
                "Form degrades as fatigue accumulates - grow your aerobic base with more easy volume"
                    .to_owned(),
        }
    }
}
