//! Risk score calculation
//!
//! Combines weighted deviations and stress velocity into a single clamped
//! score. The discrete level mapping lives on `RiskLevel::from_score`.

use crate::normalizer::clamp01;
use crate::types::{Deviations, Metric, MetricWeights};

/// Contribution of stress velocity to the combined score
pub const VELOCITY_WEIGHT: f64 = 0.10;

/// Combines deviations, weights, and velocity into the risk score
pub struct RiskScorer;

impl RiskScorer {
    /// `clamp01(sum(w_m * dev_m) + 0.10 * stress_velocity)`
    pub fn combine(deviations: &Deviations, weights: &MetricWeights, stress_velocity: f64) -> f64 {
        let weighted: f64 = Metric::ALL
            .iter()
            .map(|&m| weights.get(m) * deviations.get(m))
            .sum();
        clamp01(weighted + VELOCITY_WEIGHT * stress_velocity)
    }
}

/// Dashboard stability headline: `round((1 - risk_score) * 100)`
pub fn stability_index(risk_score: f64) -> u8 {
    ((1.0 - risk_score) * 100.0).round() as u8
}
