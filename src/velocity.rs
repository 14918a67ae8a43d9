//! Velocity and acceleration analysis
//!
//! Two independent short-horizon derivatives, both over most-recent-first
//! windows of three samples:
//!
//! - stress velocity from the last three logs' normalized stress
//! - recovery/acceleration status from the last three persisted risk scores
//!
//! With fewer than three samples the derivatives are undefined and fall back
//! to zero velocity / `Stable`.

use crate::normalizer::{clamp01, normalize};
use crate::types::{AccelerationStatus, DailyLog, RecoveryStatus, RiskScoreRecord};

/// Samples required for any derivative
pub const TREND_WINDOW: usize = 3;

/// Derives first- and second-order trend signals
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Stress velocity over the three most recent logs (most-recent-first).
    ///
    /// `clamp01((s1 - s2) + (s2 - s3))` where s1 is today. Zero with fewer
    /// than three logs.
    pub fn stress_velocity(logs: &[DailyLog]) -> f64 {
        if logs.len() < TREND_WINDOW {
            return 0.0;
        }
        let s1 = normalize(logs[0].stress);
        let s2 = normalize(logs[1].stress);
        let s3 = normalize(logs[2].stress);
        clamp01((s1 - s2) + (s2 - s3))
    }

    /// Recovery status over the three most recent risk scores
    /// (most-recent-first).
    ///
    /// Strictly increasing when read most-recent-first means the score has
    /// been falling day over day: `Improving`. The strict opposite ordering
    /// is `Worsening`; anything else, or fewer than three records, `Stable`.
    pub fn recovery_status(previous: &[RiskScoreRecord]) -> RecoveryStatus {
        if previous.len() < TREND_WINDOW {
            return RecoveryStatus::Stable;
        }
        let p0 = previous[0].risk_score;
        let p1 = previous[1].risk_score;
        let p2 = previous[2].risk_score;

        if p0 < p1 && p1 < p2 {
            RecoveryStatus::Improving
        } else if p0 > p1 && p1 > p2 {
            RecoveryStatus::Worsening
        } else {
            RecoveryStatus::Stable
        }
    }

    /// Acceleration status over the three most recent risk scores.
    ///
    /// With deltas `d1 = p0 - p1` and `d2 = p1 - p2`, the risk is
    /// accelerating when both are positive and the newer delta is larger.
    pub fn acceleration_status(previous: &[RiskScoreRecord]) -> AccelerationStatus {
        if previous.len() < TREND_WINDOW {
            return AccelerationStatus::Stable;
        }
        let d1 = previous[0].risk_score - previous[1].risk_score;
        let d2 = previous[1].risk_score - previous[2].risk_score;

        if d1 > 0.0 && d2 > 0.0 && d1 > d2 {
            AccelerationStatus::RiskAccelerating
        } else {
            AccelerationStatus::Stable
        }
    }
}
