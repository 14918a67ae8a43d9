//! CamPulse Core - Behavioral risk scoring and insight engine
//!
//! CamPulse turns a student's daily self-reported check-ins (stress, sleep,
//! mood, workload, nutrition) into a continuously-updated burnout-risk
//! assessment through a deterministic pipeline: normalization → baseline →
//! deviation → dynamic weighting → trend analysis → scoring → classification
//! → insight synthesis.
//!
//! ## Modules
//!
//! - **Risk Pipeline**: `RiskEngine::evaluate` runs the full chain per new log
//! - **Schedule Predictor**: forecasts same-day stress from a planned schedule
//!
//! Persistence is delegated to a `RiskStore` collaborator; the engine itself
//! holds no mutable state between runs.

pub mod baseline;
pub mod deviation;
pub mod error;
pub mod flags;
pub mod insight;
pub mod normalizer;
pub mod pipeline;
pub mod schedule;
pub mod score;
pub mod store;
pub mod types;
pub mod velocity;
pub mod weights;

pub use error::EngineError;
pub use pipeline::RiskEngine;
pub use schedule::predict_schedule_stress;
pub use store::{MemoryStore, RiskStore};
pub use types::{
    Alert, AlertType, Baseline, BehaviorFlag, BehavioralState, DailyLog, Evaluation, Metric,
    MonitoringReport, RiskLevel, RiskScoreRecord, ScheduleBlock,
};

/// Engine version embedded in reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "campulse-core";
