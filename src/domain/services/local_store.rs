use crate::domain::models::event::{upsert_record, EventRecord, STORAGE_KEY};
use crate::domain::ports::{EventStore, KeyValueStore};
use crate::error::AppError;
use async_trait::async_trait;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Event records kept as one JSON array under a single key.
pub struct LocalEventStore {
    kv: Arc<dyn KeyValueStore>,
    tz: Tz,
    write_lock: Mutex<()>,
}

impl LocalEventStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, tz: Tz) -> Self {
        Self { kv, tz, write_lock: Mutex::new(()) }
    }

    async fn load(&self) -> Result<Vec<EventRecord>, AppError> {
        let Some(raw) = self.kv.get(STORAGE_KEY).await? else {
            return Ok(Vec::new());
        };
        let mut records: Vec<EventRecord> = serde_json::from_str(&raw)?;
        for record in records.iter_mut() {
            record.normalize(self.tz);
        }
        Ok(records)
    }

    async fn store(&self, records: &[EventRecord]) -> Result<(), AppError> {
        let raw = serde_json::to_string(records)?;
        self.kv.put(STORAGE_KEY, &raw).await
    }
}

#[async_trait]
impl EventStore for LocalEventStore {
    async fn list(&self) -> Result<Vec<EventRecord>, AppError> {
        self.load().await
    }

    async fn get(&self, id: &str) -> Result<Option<EventRecord>, AppError> {
        Ok(self.load().await?.into_iter().find(|e| e.id == id))
    }

    async fn save(&self, record: &EventRecord) -> Result<EventRecord, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut record = record.clone();
        record.normalize(self.tz);

        let mut records = self.load().await?;
        upsert_record(&mut records, record.clone());
        self.store(&records).await?;

        debug!("Saved event {} ({} records)", record.id, records.len());
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|e| e.id != id);
        if records.len() != before {
            self.store(&records).await?;
            debug!("Deleted event {}", id);
        }
        Ok(())
    }
}
