use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::Utc;
use drivesafe_core::alert::AlertDraft;
use drivesafe_core::telemetry::TelemetrySample;
use drivesafe_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::alert::Alert;
use crate::models::sensor_reading::SensorReading;
use crate::store::{ReadingStore, StoreError};

/// Records kept per record set when no capacity is given.
pub const DEFAULT_MEMORY_CAPACITY: usize = 10_000;

/// Append-only log with monotonic ids and a bounded window.
///
/// Oldest entries are evicted once `capacity` is reached; ids keep
/// increasing regardless.
struct BoundedLog<T> {
    entries: VecDeque<T>,
    next_id: DbId,
    capacity: usize,
}

impl<T: Clone> BoundedLog<T> {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 1,
            capacity: capacity.max(1),
        }
    }

    fn push_with(&mut self, build: impl FnOnce(DbId) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            tracing::trace!(capacity = self.capacity, evicted_before = id, "Memory store window full");
        }
        let entry = build(id);
        self.entries.push_back(entry.clone());
        entry
    }

    fn newest_first(&self, limit: i64) -> Vec<T> {
        let take = usize::try_from(limit).unwrap_or(0);
        self.entries.iter().rev().take(take).cloned().collect()
    }
}

/// [`ReadingStore`] held in process memory.
///
/// Used when no database is configured and by the test suites. Contents
/// are lost on restart.
pub struct MemoryReadingStore {
    readings: RwLock<BoundedLog<SensorReading>>,
    alerts: RwLock<BoundedLog<Alert>>,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }

    /// Create a store that keeps at most `capacity` readings and
    /// `capacity` alerts.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            readings: RwLock::new(BoundedLog::new(capacity)),
            alerts: RwLock::new(BoundedLog::new(capacity)),
        }
    }
}

impl Default for MemoryReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingStore for MemoryReadingStore {
    async fn append_reading(&self, sample: &TelemetrySample) -> Result<SensorReading, StoreError> {
        let mut log = self.readings.write().await;
        Ok(log.push_with(|id| SensorReading {
            id,
            speed: sample.speed,
            acceleration: sample.acceleration,
            braking: sample.braking,
            tilt: sample.tilt,
            rotation_rate: sample.rotation_rate,
            is_crash: sample.is_crash,
            timestamp: Utc::now(),
        }))
    }

    async fn append_alert(&self, draft: &AlertDraft) -> Result<Alert, StoreError> {
        let mut log = self.alerts.write().await;
        Ok(log.push_with(|id| Alert {
            id,
            kind: draft.kind,
            severity: draft.severity,
            value: draft.value,
            unit: draft.unit.clone(),
            message: draft.message.clone(),
            timestamp: Utc::now(),
        }))
    }

    async fn recent_readings(&self, limit: i64) -> Result<Vec<SensorReading>, StoreError> {
        Ok(self.readings.read().await.newest_first(limit))
    }

    async fn latest_reading(&self) -> Result<Option<SensorReading>, StoreError> {
        Ok(self.readings.read().await.entries.back().cloned())
    }

    async fn recent_alerts(&self, limit: i64) -> Result<Vec<Alert>, StoreError> {
        Ok(self.alerts.read().await.newest_first(limit))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
