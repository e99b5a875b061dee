use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use webscribe_core_types::ActionRecord;

use crate::store::SessionStore;

/// Fixed session-store key holding the serialized action log.
pub const ACTIONS_KEY: &str = "__webscribe_actions__";

/// Append-only ordered log of action records, written through to the
/// session store on every mutation.
///
/// No TTL and no size cap: lifetime management is the harvesting
/// host's responsibility.
pub struct ActionBuffer {
    store: Arc<dyn SessionStore>,
    records: Mutex<Vec<ActionRecord>>,
}

impl ActionBuffer {
    /// Open the buffer, seeding the in-memory log from whatever the
    /// session store already holds so recording survives navigation
    /// within one browsing session.
    pub fn open(store: Arc<dyn SessionStore>) -> Self {
        let records = match store.get(ACTIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ActionRecord>>(&raw) {
                Ok(records) => {
                    debug!(count = records.len(), "restored action log from session");
                    records
                }
                Err(err) => {
                    warn!(error = %err, "stored action log unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "session store unavailable, starting empty");
                Vec::new()
            }
        };
        Self {
            store,
            records: Mutex::new(records),
        }
    }

    pub fn append(&self, record: ActionRecord) {
        let mut records = self.records.lock();
        records.push(record);
        self.flush(&records);
    }

    pub fn replace_all(&self, replacement: Vec<ActionRecord>) {
        let mut records = self.records.lock();
        *records = replacement;
        self.flush(&records);
    }

    /// Apply `f` to the log as one transition under a single lock; the
    /// store is rewritten only when `f` reports a change. Callers that
    /// must inspect the tail and mutate based on it go through here so
    /// no other writer can slip in between the read and the write.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<ActionRecord>) -> (R, bool)) -> R {
        let mut records = self.records.lock();
        let (out, changed) = f(&mut records);
        if changed {
            self.flush(&records);
        }
        out
    }

    /// Ordered snapshot of the log, for harvesting.
    pub fn read(&self) -> Vec<ActionRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Overwrite with the empty array; used by the host between
    /// logical recording sessions.
    pub fn reset(&self) {
        self.replace_all(Vec::new());
    }

    // Serialize the full current log under the fixed key. Failures are
    // logged, never surfaced: recording must not crash the host page.
    fn flush(&self, records: &[ActionRecord]) {
        let raw = match serde_json::to_string(records) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "action log serialization failed, keeping in-memory copy");
                return;
            }
        };
        if let Err(err) = self.store.set(ACTIONS_KEY, &raw) {
            warn!(error = %err, "session store write failed, keeping in-memory copy");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::store::MemorySessionStore;
    use webscribe_core_types::ActionRecord;

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Backend("quota exceeded".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".into()))
        }
    }

    fn click(ts: i64) -> ActionRecord {
        ActionRecord::click(ts, "#go", "//*[@id=\"go\"]", "Go", "button")
    }

    #[test]
    fn append_writes_full_log_under_fixed_key() {
        let store = Arc::new(MemorySessionStore::new());
        let buffer = ActionBuffer::open(store.clone());
        buffer.append(click(1));
        buffer.append(click(2));

        let raw = store.get(ACTIONS_KEY).unwrap().expect("log persisted");
        let stored: Vec<ActionRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].timestamp, 2);
    }

    #[test]
    fn reopen_restores_log_across_navigation() {
        let store = Arc::new(MemorySessionStore::new());
        let buffer = ActionBuffer::open(store.clone());
        buffer.append(click(1));
        drop(buffer);

        let reopened = ActionBuffer::open(store);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.read()[0].selector, "#go");
    }

    #[test]
    fn storage_failure_keeps_memory_authoritative() {
        let buffer = ActionBuffer::open(Arc::new(BrokenStore));
        buffer.append(click(1));
        buffer.append(click(2));
        assert_eq!(buffer.read().len(), 2);
    }

    #[test]
    fn reset_overwrites_with_empty_array() {
        let store = Arc::new(MemorySessionStore::new());
        let buffer = ActionBuffer::open(store.clone());
        buffer.append(click(1));
        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(store.get(ACTIONS_KEY).unwrap().as_deref(), Some("[]"));
    }
}
