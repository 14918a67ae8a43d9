//! Baseline establishment
//!
//! A user's baseline is the mean of their first four logs' normalized
//! metrics, computed exactly once and then read-only forever. Until four
//! logs exist the pipeline stays in the baseline phase and produces no
//! score. Creation goes through the store's first-write-wins guard so
//! concurrent runs cannot produce two baselines.

use crate::error::EngineError;
use crate::normalizer::normalize;
use crate::store::RiskStore;
use crate::types::{Baseline, DailyLog, Metric};
use chrono::Utc;
use uuid::Uuid;

/// Number of logs averaged into the baseline
pub const BASELINE_SAMPLE_SIZE: usize = 4;

/// Which phase the user's pipeline is in after a baseline lookup
#[derive(Debug, Clone)]
pub enum BaselinePhase {
    /// Not enough history yet; keep logging
    Establishing { logs_recorded: usize },
    /// Baseline available; the rest of the pipeline may run
    Monitoring(Baseline),
}

/// Owns baseline creation and lookup
pub struct BaselineManager;

impl BaselineManager {
    /// Resolve the user's phase, creating the baseline if this invocation is
    /// the first to see four logs.
    ///
    /// `recent_logs` is the most-recent-first window the pipeline already
    /// loaded. An existing baseline is returned untouched no matter how much
    /// history has accumulated since.
    pub fn ensure<S: RiskStore>(
        store: &S,
        user_id: Uuid,
        recent_logs: &[DailyLog],
    ) -> Result<BaselinePhase, EngineError> {
        if let Some(existing) = store.load_baseline(user_id)? {
            return Ok(BaselinePhase::Monitoring(existing));
        }

        if recent_logs.len() < BASELINE_SAMPLE_SIZE {
            return Ok(BaselinePhase::Establishing {
                logs_recorded: recent_logs.len(),
            });
        }

        // The window is most-recent-first; the oldest four seed the baseline
        let oldest_four: Vec<&DailyLog> = recent_logs
            .iter()
            .rev()
            .take(BASELINE_SAMPLE_SIZE)
            .collect();
        let baseline = Self::compute(user_id, &oldest_four);

        // First-write-wins: a concurrent creation may have landed first
        let stored = store.save_baseline(baseline)?;
        Ok(BaselinePhase::Monitoring(stored))
    }

    fn compute(user_id: Uuid, logs: &[&DailyLog]) -> Baseline {
        let count = logs.len() as f64;
        let mean = |metric: Metric| -> f64 {
            logs.iter()
                .map(|log| normalize(log.rating(metric)))
                .sum::<f64>()
                / count
        };

        Baseline {
            user_id,
            stress: mean(Metric::Stress),
            sleep: mean(Metric::Sleep),
            mood: mean(Metric::Mood),
            workload: mean(Metric::Workload),
            nutrition: mean(Metric::Nutrition),
            created_at: Utc::now(),
        }
    }
}
