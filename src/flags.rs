//! Flag thresholds and behavioral-state classification
//!
//! Each deviation thresholds into an independent binary flag; flag
//! combinations plus stress velocity reduce to a named behavioral state.
//!
//! The state checks run unconditionally in a fixed sequence and the LAST
//! matching check wins. The override order is load-bearing for behavioral
//! compatibility; see DESIGN.md before reordering.

use crate::types::{BehaviorFlag, BehavioralState, Deviations};

/// A flag fires when its deviation strictly exceeds this threshold
pub const FLAG_THRESHOLD: f64 = 0.35;

/// Stress velocity above which escalation overrides other states
pub const ESCALATION_VELOCITY: f64 = 0.4;

/// Reduces deviations and velocity to flags and a behavioral state
pub struct StateClassifier;

impl StateClassifier {
    /// Active flags in declaration order. Equality with the threshold does
    /// not fire.
    pub fn flags(deviations: &Deviations) -> Vec<BehaviorFlag> {
        BehaviorFlag::ALL
            .iter()
            .copied()
            .filter(|flag| deviations.get(flag.metric()) > FLAG_THRESHOLD)
            .collect()
    }

    /// Behavioral state from flags and velocity, last-match-wins
    pub fn classify(flags: &[BehaviorFlag], stress_velocity: f64) -> BehavioralState {
        let has = |flag: BehaviorFlag| flags.contains(&flag);

        let mut state = BehavioralState::Stable;
        if has(BehaviorFlag::RisingStress) && has(BehaviorFlag::SleepDecline) {
            state = BehavioralState::BurnoutPatternEmerging;
        }
        if has(BehaviorFlag::MoodInstability) && has(BehaviorFlag::WorkloadSpike) {
            state = BehavioralState::EmotionalOverloadPattern;
        }
        if stress_velocity > ESCALATION_VELOCITY {
            state = BehavioralState::RapidStressEscalation;
        }
        state
    }
}
