use std::sync::Arc;

use tracing::debug;

use session_store::ActionBuffer;
use webscribe_core_types::{ActionKind, ActionRecord};

use crate::policy::ReconcilerPolicyView;

/// Outcome of admitting one candidate action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Appended,
    Merged,
    Discarded,
}

/// Dedup/merge state machine over the tail of the action log.
///
/// The states are implicit in the log itself: the last record is the
/// only one still open for merging, and only while it is an input
/// record inside the dedup window.
pub struct Reconciler {
    policy: ReconcilerPolicyView,
    buffer: Arc<ActionBuffer>,
}

impl Reconciler {
    pub fn new(policy: ReconcilerPolicyView, buffer: Arc<ActionBuffer>) -> Self {
        Self { policy, buffer }
    }

    pub fn buffer(&self) -> &Arc<ActionBuffer> {
        &self.buffer
    }

    /// Admit a candidate and write the change through to the buffer
    /// before returning.
    ///
    /// Classification and mutation happen as one buffer transition:
    /// debounce timers, the relay pump and top-level dispatch all admit
    /// concurrently, and a record appended between a separate read and
    /// write would be silently overwritten.
    pub fn admit(&self, candidate: ActionRecord) -> Verdict {
        self.buffer.update(|records| {
            let verdict = match records.last() {
                Some(last) => self.classify(&candidate, last),
                None => Verdict::Appended,
            };

            match verdict {
                Verdict::Appended => {
                    debug!(kind = %candidate.kind, selector = %candidate.selector, "recorded action");
                    records.push(candidate);
                    (verdict, true)
                }
                Verdict::Merged => {
                    debug!(selector = %candidate.selector, "updated last input action value");
                    if let Some(last) = records.last_mut() {
                        last.value = candidate.value;
                        last.timestamp = candidate.timestamp;
                    }
                    (verdict, true)
                }
                Verdict::Discarded => {
                    debug!(selector = %candidate.selector, "skipped duplicate input action");
                    (verdict, false)
                }
            }
        })
    }

    /// Ordered snapshot of the reconciled log.
    pub fn snapshot(&self) -> Vec<ActionRecord> {
        self.buffer.read()
    }

    // Click and select records never merge; only input/input pairs on
    // the same element inside the window coalesce.
    fn classify(&self, candidate: &ActionRecord, last: &ActionRecord) -> Verdict {
        if candidate.kind != ActionKind::Input || last.kind != ActionKind::Input {
            return Verdict::Appended;
        }
        if !candidate.same_target(last) {
            return Verdict::Appended;
        }
        // Relayed records may arrive late; a negative delta still counts
        // as inside the window.
        if candidate.timestamp - last.timestamp >= self.policy.dedup_window_ms {
            return Verdict::Appended;
        }
        if candidate.value == last.value {
            Verdict::Discarded
        } else {
            Verdict::Merged
        }
    }
}
