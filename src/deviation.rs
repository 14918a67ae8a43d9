//! Deviation calculation
//!
//! Compares today's normalized metrics against the stored baseline. Each
//! metric has a fixed "bad" direction: rising stress and workload, falling
//! sleep and nutrition, mood movement either way. Improvement relative to
//! baseline clamps to zero rather than offsetting risk.

use crate::normalizer::{clamp01, normalize};
use crate::types::{Baseline, DailyLog, Deviations};

/// Computes per-metric deviation from baseline for the current day
pub struct DeviationCalculator;

impl DeviationCalculator {
    /// Deviations for today's log against the baseline, each clamped to 0-1
    pub fn compute(today: &DailyLog, baseline: &Baseline) -> Deviations {
        let stress = normalize(today.stress);
        let sleep = normalize(today.sleep);
        let mood = normalize(today.mood);
        let workload = normalize(today.workload);
        let nutrition = normalize(today.nutrition);

        Deviations {
            stress: clamp01(stress - baseline.stress),
            sleep: clamp01(baseline.sleep - sleep),
            workload: clamp01(workload - baseline.workload),
            mood: clamp01((mood - baseline.mood).abs()),
            nutrition: clamp01(baseline.nutrition - nutrition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn make_log(stress: u8, sleep: u8, mood: u8, workload: u8, nutrition: u8) -> DailyLog {
        DailyLog {
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
            stress,
            sleep,
            mood,
            workload,
            nutrition,
            note: None,
        }
    }

    fn make_baseline(stress: f64, sleep: f64, mood: f64, workload: f64, nutrition: f64) -> Baseline {
        Baseline {
            user_id: Uuid::new_v4(),
            stress,
            sleep,
            mood,
            workload,
            nutrition,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_deviation_directions() {
        let today = make_log(5, 1, 3, 4, 2);
        let baseline = make_baseline(0.5, 0.6, 0.5, 0.25, 0.5);
        let dev = DeviationCalculator::compute(&today, &baseline);

        // stress 1.0 - 0.5, sleep 0.6 - 0.0, workload 0.75 - 0.25
        assert!((dev.stress - 0.5).abs() < 1e-9);
        assert!((dev.sleep - 0.6).abs() < 1e-9);
        assert!((dev.workload - 0.5).abs() < 1e-9);
        // mood matches baseline exactly, nutrition 0.5 - 0.25
        assert_eq!(dev.mood, 0.0);
        assert!((dev.nutrition - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_improvement_clamps_to_zero() {
        // Calm day well below baseline stress, sleep above baseline
        let today = make_log(1, 5, 3, 1, 5);
        let baseline = make_baseline(0.75, 0.4, 0.5, 0.6, 0.3);
        let dev = DeviationCalculator::compute(&today, &baseline);

        assert_eq!(dev.stress, 0.0);
        assert_eq!(dev.sleep, 0.0);
        assert_eq!(dev.workload, 0.0);
        assert_eq!(dev.nutrition, 0.0);
    }

    #[test]
    fn test_extremes_stay_in_unit_interval() {
        let today = make_log(5, 1, 1, 5, 1);
        let baseline = make_baseline(0.0, 1.0, 1.0, 0.0, 1.0);
        let dev = DeviationCalculator::compute(&today, &baseline);

        assert_eq!(dev.stress, 1.0);
        assert_eq!(dev.sleep, 1.0);
        assert_eq!(dev.workload, 1.0);
        assert_eq!(dev.mood, 1.0);
        assert_eq!(dev.nutrition, 1.0);
    }

    #[test]
    fn test_mood_volatility_counts_both_directions() {
        let baseline = make_baseline(0.5, 0.5, 0.5, 0.5, 0.5);

        let up = DeviationCalculator::compute(&make_log(3, 3, 5, 3, 3), &baseline);
        let down = DeviationCalculator::compute(&make_log(3, 3, 1, 3, 3), &baseline);

        assert!((up.mood - 0.5).abs() < 1e-9);
        assert!((down.mood - 0.5).abs() < 1e-9);
    }
}
