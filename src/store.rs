//! Persistence collaborator
//!
//! The engine is read-then-append only: it loads history, computes, and
//! appends new immutable records. Everything durable lives behind the
//! `RiskStore` trait so the core stays free of storage concerns; `MemoryStore`
//! is the in-process implementation used by tests and the CLI.

use crate::error::EngineError;
use crate::types::{Alert, Baseline, DailyLog, RiskScoreRecord};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Durable store the pipeline reads from and appends to.
///
/// Ordered reads return most-recent-first. Implementations own ordering and
/// the atomic guard on baseline creation; the core never updates in place.
pub trait RiskStore {
    /// Up to `limit` logs for the user, most-recent-first by date
    fn load_recent_logs(&self, user_id: Uuid, limit: usize) -> Result<Vec<DailyLog>, EngineError>;

    /// The user's baseline, if one has been established
    fn load_baseline(&self, user_id: Uuid) -> Result<Option<Baseline>, EngineError>;

    /// Persist a baseline under a first-write-wins guard.
    ///
    /// When two concurrent runs race on creation only one write survives;
    /// the returned baseline is the surviving record either way.
    fn save_baseline(&self, baseline: Baseline) -> Result<Baseline, EngineError>;

    /// Up to `limit` risk records for the user, most-recent-first
    fn load_recent_risk_scores(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<RiskScoreRecord>, EngineError>;

    /// Append one immutable risk record
    fn append_risk_score(&self, record: RiskScoreRecord) -> Result<(), EngineError>;

    /// Append one alert (high risk only)
    fn append_alert(&self, alert: Alert) -> Result<(), EngineError>;
}

#[derive(Default)]
struct MemoryInner {
    /// Per-user logs kept sorted oldest-first by date
    logs: HashMap<Uuid, Vec<DailyLog>>,
    baselines: HashMap<Uuid, Baseline>,
    /// Per-user risk records in append (chronological) order
    risk_scores: HashMap<Uuid, Vec<RiskScoreRecord>>,
    alerts: HashMap<Uuid, Vec<Alert>>,
}

/// In-process `RiskStore` backed by hash maps
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a daily check-in. A resubmission for the same calendar day
    /// replaces the prior entry rather than creating a duplicate.
    pub fn insert_log(&self, log: DailyLog) -> Result<(), EngineError> {
        log.validate()?;
        let mut inner = self.lock()?;
        let logs = inner.logs.entry(log.user_id).or_default();
        logs.retain(|existing| existing.date != log.date);
        logs.push(log);
        logs.sort_by_key(|l| l.date);
        Ok(())
    }

    /// All alerts raised for a user, in append order
    pub fn alerts(&self, user_id: Uuid) -> Result<Vec<Alert>, EngineError> {
        let inner = self.lock()?;
        Ok(inner.alerts.get(&user_id).cloned().unwrap_or_default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>, EngineError> {
        self.inner
            .lock()
            .map_err(|_| EngineError::StoreUnavailable("memory store lock poisoned".to_string()))
    }
}

impl RiskStore for MemoryStore {
    fn load_recent_logs(&self, user_id: Uuid, limit: usize) -> Result<Vec<DailyLog>, EngineError> {
        let inner = self.lock()?;
        let logs = match inner.logs.get(&user_id) {
            Some(logs) => logs,
            None => return Ok(Vec::new()),
        };
        Ok(logs.iter().rev().take(limit).cloned().collect())
    }

    fn load_baseline(&self, user_id: Uuid) -> Result<Option<Baseline>, EngineError> {
        let inner = self.lock()?;
        Ok(inner.baselines.get(&user_id).cloned())
    }

    fn save_baseline(&self, baseline: Baseline) -> Result<Baseline, EngineError> {
        let mut inner = self.lock()?;
        let stored = inner
            .baselines
            .entry(baseline.user_id)
            .or_insert(baseline);
        Ok(stored.clone())
    }

    fn load_recent_risk_scores(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<RiskScoreRecord>, EngineError> {
        let inner = self.lock()?;
        let records = match inner.risk_scores.get(&user_id) {
            Some(records) => records,
            None => return Ok(Vec::new()),
        };
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    fn append_risk_score(&self, record: RiskScoreRecord) -> Result<(), EngineError> {
        let mut inner = self.lock()?;
        inner
            .risk_scores
            .entry(record.user_id)
            .or_default()
            .push(record);
        Ok(())
    }

    fn append_alert(&self, alert: Alert) -> Result<(), EngineError> {
        let mut inner = self.lock()?;
        inner.alerts.entry(alert.user_id).or_default().push(alert);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn make_log(user_id: Uuid, day: u32, stress: u8) -> DailyLog {
        DailyLog {
            user_id,
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            stress,
            sleep: 3,
            mood: 3,
            workload: 3,
            nutrition: 3,
            note: None,
        }
    }

    #[test]
    fn test_recent_logs_are_most_recent_first() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        // Insert out of order
        store.insert_log(make_log(user, 10, 2)).unwrap();
        store.insert_log(make_log(user, 12, 4)).unwrap();
        store.insert_log(make_log(user, 11, 3)).unwrap();

        let logs = store.load_recent_logs(user, 2).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].date, NaiveDate::from_ymd_opt(2025, 6, 12).unwrap());
        assert_eq!(logs[1].date, NaiveDate::from_ymd_opt(2025, 6, 11).unwrap());
    }

    #[test]
    fn test_same_day_resubmission_replaces() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        store.insert_log(make_log(user, 10, 2)).unwrap();
        store.insert_log(make_log(user, 10, 5)).unwrap();

        let logs = store.load_recent_logs(user, 10).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].stress, 5);
    }

    #[test]
    fn test_insert_rejects_out_of_range_rating() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let mut log = make_log(user, 10, 2);
        log.mood = 0;

        assert!(store.insert_log(log).is_err());
        assert!(store.load_recent_logs(user, 10).unwrap().is_empty());
    }

    #[test]
    fn test_baseline_first_write_wins() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        let first = Baseline {
            user_id: user,
            stress: 0.25,
            sleep: 0.75,
            mood: 0.5,
            workload: 0.5,
            nutrition: 0.5,
            created_at: Utc::now(),
        };
        let second = Baseline {
            stress: 0.9,
            ..first.clone()
        };

        let won = store.save_baseline(first.clone()).unwrap();
        assert_eq!(won.stress, 0.25);

        // A racing second creation observes the surviving record
        let survivor = store.save_baseline(second).unwrap();
        assert_eq!(survivor.stress, 0.25);
        assert_eq!(store.load_baseline(user).unwrap().unwrap().stress, 0.25);
    }

    #[test]
    fn test_users_are_isolated() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert_log(make_log(alice, 10, 2)).unwrap();
        assert!(store.load_recent_logs(bob, 10).unwrap().is_empty());
    }
}
