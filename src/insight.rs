//! Insight and prevention synthesis
//!
//! Turns the run's risk level, flags, and behavioral state into prose and a
//! list of preventive actions. Pure functions of their inputs; the wording is
//! fixed so downstream surfaces can rely on it.

use crate::types::{BehaviorFlag, BehavioralState, RiskLevel};

/// Generates the human-readable portion of a monitoring report
pub struct InsightGenerator;

impl InsightGenerator {
    /// One-paragraph insight for the current evaluation
    pub fn insight(
        risk_level: RiskLevel,
        flags: &[BehaviorFlag],
        state: BehavioralState,
    ) -> String {
        if risk_level == RiskLevel::Low {
            return "Behavioral patterns are holding steady near your personal baseline. \
                    Keep up your current habits."
                .to_string();
        }

        let opening = if flags.is_empty() {
            "Risk is elevated without a single dominant metric.".to_string()
        } else {
            let labels: Vec<&str> = flags.iter().map(|f| f.label()).collect();
            format!("Detected {}.", labels.join(", "))
        };

        let severity = if risk_level == RiskLevel::High {
            "Significant deviation from your baseline requires attention."
        } else {
            "Early strain indicators are present; small adjustments now can prevent escalation."
        };

        format!("{} {} Current pattern: {}.", opening, severity, state.label())
    }

    /// One fixed recommendation per active flag, in flag declaration order
    pub fn preventive_measures(flags: &[BehaviorFlag]) -> Vec<String> {
        BehaviorFlag::ALL
            .iter()
            .copied()
            .filter(|flag| flags.contains(flag))
            .map(|flag| recommendation(flag).to_string())
            .collect()
    }
}

fn recommendation(flag: BehaviorFlag) -> &'static str {
    match flag {
        BehaviorFlag::RisingStress => {
            "Schedule a short break or breathing exercise between study blocks."
        }
        BehaviorFlag::SleepDecline => {
            "Protect a consistent sleep window tonight; aim for at least 7 hours."
        }
        BehaviorFlag::WorkloadSpike => {
            "Split large tasks into smaller chunks and defer non-urgent work."
        }
        BehaviorFlag::MoodInstability => {
            "Take a brief mindfulness pause or talk to someone you trust."
        }
        BehaviorFlag::NutritionDrop => {
            "Plan regular meals; even a small snack can restore focus."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_low_risk_is_a_fixed_reassurance() {
        let text = InsightGenerator::insight(
            RiskLevel::Low,
            &[BehaviorFlag::RisingStress],
            BehavioralState::Stable,
        );
        assert_eq!(
            text,
            "Behavioral patterns are holding steady near your personal baseline. \
             Keep up your current habits."
        );
    }

    #[test]
    fn test_moderate_risk_lists_flags_and_state() {
        let flags = vec![BehaviorFlag::RisingStress, BehaviorFlag::SleepDecline];
        let text = InsightGenerator::insight(
            RiskLevel::Moderate,
            &flags,
            BehavioralState::BurnoutPatternEmerging,
        );
        assert_eq!(
            text,
            "Detected rising stress, sleep decline. Early strain indicators are present; \
             small adjustments now can prevent escalation. \
             Current pattern: Burnout Pattern Emerging."
        );
    }

    #[test]
    fn test_high_risk_uses_significant_deviation_clause() {
        let flags = vec![BehaviorFlag::WorkloadSpike];
        let text = InsightGenerator::insight(
            RiskLevel::High,
            &flags,
            BehavioralState::RapidStressEscalation,
        );
        assert!(text.contains("Significant deviation from your baseline"));
        assert!(text.contains("workload spike"));
        assert!(text.ends_with("Current pattern: Rapid Stress Escalation."));
    }

    #[test]
    fn test_measures_follow_declaration_order() {
        // Detection order reversed on purpose; output still runs
        // stress -> sleep -> nutrition
        let flags = vec![
            BehaviorFlag::NutritionDrop,
            BehaviorFlag::SleepDecline,
            BehaviorFlag::RisingStress,
        ];
        let measures = InsightGenerator::preventive_measures(&flags);
        assert_eq!(measures.len(), 3);
        assert!(measures[0].contains("breathing exercise"));
        assert!(measures[1].contains("sleep window"));
        assert!(measures[2].contains("regular meals"));
    }

    #[test]
    fn test_no_flags_no_measures() {
        assert!(InsightGenerator::preventive_measures(&[]).is_empty());
    }
}
