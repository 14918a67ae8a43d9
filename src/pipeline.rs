//! Pipeline orchestration
//!
//! This module provides the public API for the CamPulse engine. One
//! `evaluate` call runs the full chain for a user: baseline lookup,
//! deviation, weighting, trend analysis, scoring, classification, and
//! insight synthesis, then appends the resulting record (and alert, when
//! high) to the store.
//!
//! Each call is an explicit, idempotent computation over loaded history;
//! the engine holds no per-user state of its own, so concurrent runs for
//! different users are independent.

use crate::baseline::{BaselineManager, BaselinePhase, BASELINE_SAMPLE_SIZE};
use crate::deviation::DeviationCalculator;
use crate::error::EngineError;
use crate::flags::StateClassifier;
use crate::insight::InsightGenerator;
use crate::schedule::predict_schedule_stress;
use crate::score::{stability_index, RiskScorer};
use crate::store::RiskStore;
use crate::types::{
    Alert, BaselineStatus, Evaluation, MonitoringReport, RiskLevel, RiskScoreRecord,
    ScheduleBlock,
};
use crate::velocity::{TrendAnalyzer, TREND_WINDOW};
use crate::weights::WeightAllocator;
use chrono::Utc;
use uuid::Uuid;

/// Log window loaded per evaluation; covers baseline seeding and velocity
pub const HISTORY_WINDOW: usize = 30;

/// Stateful-looking but stateless engine over a pluggable store
pub struct RiskEngine<S> {
    store: S,
}

impl<S: RiskStore> RiskEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store, for callers that also ingest logs through it
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one evaluation for the calling user.
    ///
    /// A missing caller identity fails immediately with `Unauthenticated`;
    /// nothing is computed or persisted. With fewer than four logs the
    /// result is the baseline-phase status and the scoring stages do not
    /// run. Otherwise the full record is computed, appended to the store
    /// (record first, then the alert if the level is high, so risk history
    /// survives a failed alert write), and returned.
    pub fn evaluate(&self, caller: Option<Uuid>) -> Result<Evaluation, EngineError> {
        let user_id = caller.ok_or(EngineError::Unauthenticated)?;

        let logs = self.store.load_recent_logs(user_id, HISTORY_WINDOW)?;

        let baseline = match BaselineManager::ensure(&self.store, user_id, &logs)? {
            BaselinePhase::Establishing { logs_recorded } => {
                return Ok(Evaluation::Baseline(baseline_status(logs_recorded)));
            }
            BaselinePhase::Monitoring(baseline) => baseline,
        };

        let today = match logs.first() {
            Some(log) => log,
            // Baseline exists but no logs are loadable; report as still
            // establishing rather than scoring a day that does not exist.
            None => return Ok(Evaluation::Baseline(baseline_status(0))),
        };

        let deviations = DeviationCalculator::compute(today, &baseline);
        let weights = WeightAllocator::allocate(&deviations);
        let stress_velocity = TrendAnalyzer::stress_velocity(&logs);

        let previous = self
            .store
            .load_recent_risk_scores(user_id, TREND_WINDOW)?;
        let recovery_status = TrendAnalyzer::recovery_status(&previous);
        let acceleration_status = TrendAnalyzer::acceleration_status(&previous);

        let risk_score = RiskScorer::combine(&deviations, &weights, stress_velocity);
        let risk_level = RiskLevel::from_score(risk_score);

        let flags = StateClassifier::flags(&deviations);
        let behavioral_state = StateClassifier::classify(&flags, stress_velocity);

        let insight = InsightGenerator::insight(risk_level, &flags, behavioral_state);
        let preventive_measures = InsightGenerator::preventive_measures(&flags);

        let record = RiskScoreRecord {
            user_id,
            risk_score,
            risk_level,
            recovery_status,
            acceleration_status,
            stress_velocity,
            behavioral_state,
            flags,
            timestamp: Utc::now(),
        };

        // Record before alert: history must never be lost to an alert failure
        self.store.append_risk_score(record.clone())?;
        if risk_level == RiskLevel::High {
            self.store.append_alert(Alert::high_burnout_risk(user_id))?;
        }

        Ok(Evaluation::Monitoring(Box::new(MonitoringReport {
            stability_index: stability_index(record.risk_score),
            record,
            insight,
            preventive_measures,
        })))
    }

    /// Forecast a 1-5 stress score from a day's planned schedule.
    ///
    /// Stateless; reads nothing from the store. Empty input yields `None`.
    pub fn predict_schedule_stress(&self, blocks: &[ScheduleBlock]) -> Option<u8> {
        predict_schedule_stress(blocks)
    }
}

fn baseline_status(logs_recorded: usize) -> BaselineStatus {
    let remaining = BASELINE_SAMPLE_SIZE.saturating_sub(logs_recorded);
    BaselineStatus {
        logs_recorded,
        logs_required: BASELINE_SAMPLE_SIZE,
        message: format!(
            "Baseline phase: {} of {} daily check-ins recorded. Log {} more to unlock risk monitoring.",
            logs_recorded, BASELINE_SAMPLE_SIZE, remaining
        ),
    }
}
