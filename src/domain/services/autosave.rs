use crate::domain::models::event::GeneratedContent;
use crate::domain::ports::EventStore;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Debounced writer for manual content edits. Only the latest edit of each
/// event inside the debounce window reaches the store.
pub struct AutosaveService {
    store: Arc<dyn EventStore>,
    debounce: Duration,
    /// Latest pending generation per event. Entries leave once settled.
    generations: Arc<Mutex<HashMap<String, u64>>>,
    next_generation: AtomicU64,
}

impl AutosaveService {
    pub fn new(store: Arc<dyn EventStore>, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            generations: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(1),
        }
    }

    fn bump(&self, event_id: &str) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let mut generations = self.generations.lock().unwrap_or_else(|e| e.into_inner());
        generations.insert(event_id.to_string(), generation);
        generation
    }

    /// Drops the pending edit of an event, if any. Returns whether one was pending.
    pub fn cancel(&self, event_id: &str) -> bool {
        let mut generations = self.generations.lock().unwrap_or_else(|e| e.into_inner());
        let cancelled = generations.remove(event_id).is_some();
        if cancelled {
            debug!("Pending autosave for {} cancelled", event_id);
        }
        cancelled
    }

    pub fn pending(&self) -> usize {
        self.generations.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns the generation assigned to this edit.
    pub fn schedule(&self, event_id: &str, content: GeneratedContent) -> u64 {
        let generation = self.bump(event_id);
        let event_id = event_id.to_string();
        let store = self.store.clone();
        let generations = self.generations.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            sleep(debounce).await;

            let latest = {
                let generations = generations.lock().unwrap_or_else(|e| e.into_inner());
                generations.get(&event_id).copied()
            };
            if latest != Some(generation) {
                debug!("Autosave for {} superseded (gen {})", event_id, generation);
                return;
            }

            match store.get(&event_id).await {
                Ok(Some(mut record)) => {
                    record.generated = content;
                    record.updated_at = Utc::now();
                    match store.save(&record).await {
                        Ok(_) => debug!("Autosaved content for {} (gen {})", event_id, generation),
                        Err(e) => error!("Autosave failed for {}: {:?}", event_id, e),
                    }
                }
                Ok(None) => warn!("Autosave skipped, event {} no longer exists", event_id),
                Err(e) => error!("Autosave could not load {}: {:?}", event_id, e),
            }

            let mut generations = generations.lock().unwrap_or_else(|e| e.into_inner());
            if generations.get(&event_id) == Some(&generation) {
                generations.remove(&event_id);
            }
        });

        generation
    }
}
