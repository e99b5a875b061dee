use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use webscribe_core_types::ActionRecord;

use crate::ports::ActionSink;

type Pending = Arc<Mutex<Option<ActionRecord>>>;

struct Entry {
    cancel: CancellationToken,
    pending: Pending,
}

/// Per-key debounce timers for input coalescing.
///
/// Each keystroke resets the timer for its selector key; only the final
/// firing emits a record. A timer is cancelled by a subsequent reset on
/// the same key or an explicit `fire_now`/`cancel` (the blur path).
pub struct DebounceBank {
    delay: Duration,
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl DebounceBank {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Replace any pending record for `key` and restart its timer. On
    /// expiry the record is delivered to `sink`.
    pub fn reset(&self, key: &str, record: ActionRecord, sink: Arc<dyn ActionSink>) {
        let cancel = CancellationToken::new();
        let pending: Pending = Arc::new(Mutex::new(Some(record)));

        {
            let mut entries = self.entries.lock();
            if let Some(prev) = entries.remove(key) {
                prev.cancel.cancel();
            }
            entries.insert(
                key.to_string(),
                Entry {
                    cancel: cancel.clone(),
                    pending: pending.clone(),
                },
            );
        }

        let entries = self.entries.clone();
        let key = key.to_string();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let record = pending.lock().take();
                    {
                        // Remove only our own entry; a racing reset may
                        // have installed a newer one under the same key.
                        let mut entries = entries.lock();
                        if let Some(entry) = entries.get(&key) {
                            if Arc::ptr_eq(&entry.pending, &pending) {
                                entries.remove(&key);
                            }
                        }
                    }
                    if let Some(record) = record {
                        if let Err(err) = sink.accept(record).await {
                            warn!(error = %err, "debounced record dropped");
                        }
                    }
                }
            }
        });
    }

    /// Cancel the timer for `key` and hand back the pending record so
    /// the caller can flush immediately.
    pub fn fire_now(&self, key: &str) -> Option<ActionRecord> {
        let entry = self.entries.lock().remove(key)?;
        entry.cancel.cancel();
        let record = entry.pending.lock().take();
        record
    }

    /// Cancel the timer for `key`, discarding the pending record.
    pub fn cancel(&self, key: &str) {
        if let Some(entry) = self.entries.lock().remove(key) {
            entry.cancel.cancel();
        }
    }

    pub fn pending_keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use webscribe_core_types::RecorderError;

    #[derive(Default)]
    struct CollectSink {
        records: Mutex<Vec<ActionRecord>>,
    }

    #[async_trait]
    impl ActionSink for CollectSink {
        async fn accept(&self, record: ActionRecord) -> Result<(), RecorderError> {
            self.records.lock().push(record);
            Ok(())
        }
    }

    fn input(ts: i64, value: &str) -> ActionRecord {
        ActionRecord::input(ts, "q", "//q", value, "input")
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_final_reset_fires() {
        let bank = DebounceBank::new(500);
        let sink = Arc::new(CollectSink::default());

        bank.reset("q", input(0, "f"), sink.clone());
        tokio::time::sleep(Duration::from_millis(100)).await;
        bank.reset("q", input(100, "fo"), sink.clone());
        tokio::time::sleep(Duration::from_millis(100)).await;
        bank.reset("q", input(200, "foo"), sink.clone());

        tokio::time::sleep(Duration::from_millis(600)).await;
        let records = sink.records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value.as_deref(), Some("foo"));
        assert!(bank.pending_keys().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fire_now_cancels_the_timer() {
        let bank = DebounceBank::new(500);
        let sink = Arc::new(CollectSink::default());

        bank.reset("q", input(0, "abc"), sink.clone());
        let pending = bank.fire_now("q").expect("pending record");
        assert_eq!(pending.value.as_deref(), Some("abc"));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(sink.records.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn keys_debounce_independently() {
        let bank = DebounceBank::new(500);
        let sink = Arc::new(CollectSink::default());

        bank.reset("user", input(0, "alice"), sink.clone());
        bank.reset("pass", input(0, "hunter2"), sink.clone());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(sink.records.lock().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending() {
        let bank = DebounceBank::new(500);
        let sink = Arc::new(CollectSink::default());

        bank.reset("q", input(0, "abc"), sink.clone());
        bank.cancel("q");
        assert!(bank.fire_now("q").is_none());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(sink.records.lock().is_empty());
    }
}
