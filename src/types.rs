//! Core types for the CamPulse risk pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: daily logs, baselines, deviations, weights, risk records, alerts,
//! and schedule blocks.

use crate::error::EngineError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five self-reported behavioral metrics.
///
/// `ALL` fixes the canonical engine order (stress, sleep, workload, mood,
/// nutrition). Weight tie-breaking and prevention ordering both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Stress,
    Sleep,
    Workload,
    Mood,
    Nutrition,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Stress,
        Metric::Sleep,
        Metric::Workload,
        Metric::Mood,
        Metric::Nutrition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Stress => "stress",
            Metric::Sleep => "sleep",
            Metric::Workload => "workload",
            Metric::Mood => "mood",
            Metric::Nutrition => "nutrition",
        }
    }
}

/// A single day's self-reported check-in
///
/// Ratings are integers on a 1-5 scale. At most one log exists per user per
/// calendar day; a same-day resubmission replaces the prior entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day this log covers
    pub date: NaiveDate,
    /// Perceived stress (1 = calm, 5 = overwhelmed)
    pub stress: u8,
    /// Sleep quality (1 = poor, 5 = fully rested)
    pub sleep: u8,
    /// Mood (1 = low, 5 = great)
    pub mood: u8,
    /// Workload (1 = light, 5 = crushing)
    pub workload: u8,
    /// Nutrition quality (1 = skipped meals, 5 = balanced)
    pub nutrition: u8,
    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DailyLog {
    /// Raw 1-5 rating for a metric
    pub fn rating(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Stress => self.stress,
            Metric::Sleep => self.sleep,
            Metric::Workload => self.workload,
            Metric::Mood => self.mood,
            Metric::Nutrition => self.nutrition,
        }
    }

    /// Check that every rating is within the 1-5 scale
    pub fn validate(&self) -> Result<(), EngineError> {
        for metric in Metric::ALL {
            let value = self.rating(metric);
            if !(1..=5).contains(&value) {
                return Err(EngineError::InvalidRating {
                    metric: metric.as_str(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Per-user baseline vector of normalized (0-1) metric averages
///
/// Created exactly once from the user's first four logs and never recomputed;
/// read-only to every stage downstream of the baseline manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Baseline {
    pub user_id: Uuid,
    pub stress: f64,
    pub sleep: f64,
    pub mood: f64,
    pub workload: f64,
    pub nutrition: f64,
    pub created_at: DateTime<Utc>,
}

impl Baseline {
    /// Normalized baseline value for a metric
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Stress => self.stress,
            Metric::Sleep => self.sleep,
            Metric::Workload => self.workload,
            Metric::Mood => self.mood,
            Metric::Nutrition => self.nutrition,
        }
    }
}

/// Per-metric deviation from baseline, each clamped to 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deviations {
    pub stress: f64,
    pub sleep: f64,
    pub workload: f64,
    pub mood: f64,
    pub nutrition: f64,
}

impl Deviations {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Stress => self.stress,
            Metric::Sleep => self.sleep,
            Metric::Workload => self.workload,
            Metric::Mood => self.mood,
            Metric::Nutrition => self.nutrition,
        }
    }
}

/// Per-metric weights applied when combining deviations into a risk score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    pub stress: f64,
    pub sleep: f64,
    pub workload: f64,
    pub mood: f64,
    pub nutrition: f64,
}

impl MetricWeights {
    /// Prior weights before dominant-factor boosting (sum 1.00)
    pub const PRIOR: MetricWeights = MetricWeights {
        stress: 0.30,
        sleep: 0.25,
        workload: 0.20,
        mood: 0.15,
        nutrition: 0.10,
    };

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Stress => self.stress,
            Metric::Sleep => self.sleep,
            Metric::Workload => self.workload,
            Metric::Mood => self.mood,
            Metric::Nutrition => self.nutrition,
        }
    }

    pub fn boost(&mut self, metric: Metric, amount: f64) {
        match metric {
            Metric::Stress => self.stress += amount,
            Metric::Sleep => self.sleep += amount,
            Metric::Workload => self.workload += amount,
            Metric::Mood => self.mood += amount,
            Metric::Nutrition => self.nutrition += amount,
        }
    }

    pub fn sum(&self) -> f64 {
        self.stress + self.sleep + self.workload + self.mood + self.nutrition
    }
}

/// Discrete risk level derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Map a 0-1 score onto a level. Pure and total; no hysteresis.
    pub fn from_score(score: f64) -> Self {
        if score < 0.40 {
            RiskLevel::Low
        } else if score < 0.70 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

/// Direction of the recent risk-score trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStatus {
    Stable,
    Improving,
    Worsening,
}

/// Whether consecutive risk-score increases are themselves growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelerationStatus {
    Stable,
    RiskAccelerating,
}

/// Binary deviation flags, one per metric
///
/// `ALL` fixes the declaration order used for prevention recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorFlag {
    RisingStress,
    SleepDecline,
    WorkloadSpike,
    MoodInstability,
    NutritionDrop,
}

impl BehaviorFlag {
    pub const ALL: [BehaviorFlag; 5] = [
        BehaviorFlag::RisingStress,
        BehaviorFlag::SleepDecline,
        BehaviorFlag::WorkloadSpike,
        BehaviorFlag::MoodInstability,
        BehaviorFlag::NutritionDrop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorFlag::RisingStress => "rising_stress",
            BehaviorFlag::SleepDecline => "sleep_decline",
            BehaviorFlag::WorkloadSpike => "workload_spike",
            BehaviorFlag::MoodInstability => "mood_instability",
            BehaviorFlag::NutritionDrop => "nutrition_drop",
        }
    }

    /// Flag name with underscores rendered as spaces, for prose
    pub fn label(&self) -> &'static str {
        match self {
            BehaviorFlag::RisingStress => "rising stress",
            BehaviorFlag::SleepDecline => "sleep decline",
            BehaviorFlag::WorkloadSpike => "workload spike",
            BehaviorFlag::MoodInstability => "mood instability",
            BehaviorFlag::NutritionDrop => "nutrition drop",
        }
    }

    /// The metric whose deviation this flag thresholds
    pub fn metric(&self) -> Metric {
        match self {
            BehaviorFlag::RisingStress => Metric::Stress,
            BehaviorFlag::SleepDecline => Metric::Sleep,
            BehaviorFlag::WorkloadSpike => Metric::Workload,
            BehaviorFlag::MoodInstability => Metric::Mood,
            BehaviorFlag::NutritionDrop => Metric::Nutrition,
        }
    }
}

/// Named behavioral state reduced from flag combinations and stress velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehavioralState {
    Stable,
    BurnoutPatternEmerging,
    EmotionalOverloadPattern,
    RapidStressEscalation,
}

impl BehavioralState {
    pub fn label(&self) -> &'static str {
        match self {
            BehavioralState::Stable => "Stable",
            BehavioralState::BurnoutPatternEmerging => "Burnout Pattern Emerging",
            BehavioralState::EmotionalOverloadPattern => "Emotional Overload Pattern",
            BehavioralState::RapidStressEscalation => "Rapid Stress Escalation",
        }
    }
}

/// One immutable output of a pipeline run, appended per evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScoreRecord {
    pub user_id: Uuid,
    /// Combined risk score, clamped to 0-1
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub recovery_status: RecoveryStatus,
    pub acceleration_status: AccelerationStatus,
    /// Short-horizon stress trend
    pub stress_velocity: f64,
    pub behavioral_state: BehavioralState,
    /// Flags active on this run
    pub flags: Vec<BehaviorFlag>,
    pub timestamp: DateTime<Utc>,
}

/// Alert category. A single tag today; counselors resolve alerts externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HighBurnoutRisk,
}

/// Raised when an evaluation lands at high risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub user_id: Uuid,
    pub alert_type: AlertType,
    /// Flipped to true only by an external counselor action
    pub resolved: bool,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn high_burnout_risk(user_id: Uuid) -> Self {
        Self {
            user_id,
            alert_type: AlertType::HighBurnoutRisk,
            resolved: false,
            timestamp: Utc::now(),
        }
    }
}

/// Schedule block categories recognized by the stress predictor
///
/// Unrecognized type strings deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BlockType {
    Exam,
    Assignment,
    Lecture,
    Lab,
    Study,
    Meeting,
    Social,
    Break,
    Exercise,
    Other,
}

impl From<String> for BlockType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "exam" => BlockType::Exam,
            "assignment" => BlockType::Assignment,
            "lecture" => BlockType::Lecture,
            "lab" => BlockType::Lab,
            "study" => BlockType::Study,
            "meeting" => BlockType::Meeting,
            "social" => BlockType::Social,
            "break" => BlockType::Break,
            "exercise" => BlockType::Exercise,
            _ => BlockType::Other,
        }
    }
}

/// A typed, durationed block on a student's planned day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub start_time: NaiveTime,
    /// Duration in minutes; treated as 60 when absent
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

/// Baseline-phase evaluation output: no score yet, keep logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineStatus {
    pub logs_recorded: usize,
    pub logs_required: usize,
    pub message: String,
}

/// Monitoring-phase evaluation output: the full record plus prose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringReport {
    #[serde(flatten)]
    pub record: RiskScoreRecord,
    pub insight: String,
    pub preventive_measures: Vec<String>,
    /// Dashboard headline: round((1 - risk_score) * 100)
    pub stability_index: u8,
}

/// Result of one `evaluate` call, tagged by pipeline phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Evaluation {
    Baseline(BaselineStatus),
    Monitoring(Box<MonitoringReport>),
}

impl Evaluation {
    pub fn as_monitoring(&self) -> Option<&MonitoringReport> {
        match self {
            Evaluation::Monitoring(report) => Some(report.as_ref()),
            Evaluation::Baseline(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries_are_exact() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.39999), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.40000), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(0.69999), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(0.70000), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::High);
    }

    #[test]
    fn test_prior_weights_sum_to_one() {
        assert!((MetricWeights::PRIOR.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_block_type_falls_back_to_other() {
        let parsed: BlockType = serde_json::from_str("\"office_hours\"").unwrap();
        assert_eq!(parsed, BlockType::Other);

        let parsed: BlockType = serde_json::from_str("\"exam\"").unwrap();
        assert_eq!(parsed, BlockType::Exam);
    }

    #[test]
    fn test_behavioral_state_serialization() {
        let json = serde_json::to_string(&BehavioralState::BurnoutPatternEmerging).unwrap();
        assert_eq!(json, "\"burnout_pattern_emerging\"");
    }

    #[test]
    fn test_daily_log_validation() {
        let mut log = DailyLog {
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 6, 11).unwrap(),
            stress: 3,
            sleep: 4,
            mood: 3,
            workload: 2,
            nutrition: 3,
            note: None,
        };
        assert!(log.validate().is_ok());

        log.sleep = 6;
        let err = log.validate().unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidRating {
                metric: "sleep",
                value: 6
            }
        ));
    }

    #[test]
    fn test_evaluation_phase_tagging() {
        let status = Evaluation::Baseline(BaselineStatus {
            logs_recorded: 2,
            logs_required: 4,
            message: "keep logging".to_string(),
        });
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&status).unwrap()).unwrap();
        assert_eq!(value["phase"], "baseline");
        assert_eq!(value["logs_recorded"], 2);
    }
}
