use std::sync::Arc;

use tracing::{debug, warn};

use selector_synth::{synthesize, ElementSnapshot, SelectorPair};
use webscribe_core_types::ActionRecord;

use crate::debounce::DebounceBank;
use crate::model::DomEvent;
use crate::policy::RelayPolicyView;
use crate::ports::ActionSink;

/// Which browsing context this capture instance serves. Records built
/// inside a nested frame carry frame-prefixed selectors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameScope {
    TopLevel,
    Nested,
}

/// The capturing-phase listener set for one browsing context.
///
/// Every handler recovers locally: a failure while recording one
/// interaction drops that single event and never interrupts the page
/// or the recording of subsequent interactions.
pub struct EventCapture {
    policy: RelayPolicyView,
    scope: FrameScope,
    debounce: DebounceBank,
    sink: Arc<dyn ActionSink>,
}

impl EventCapture {
    pub fn new(policy: RelayPolicyView, scope: FrameScope, sink: Arc<dyn ActionSink>) -> Self {
        let debounce = DebounceBank::new(policy.debounce_ms);
        Self {
            policy,
            scope,
            debounce,
            sink,
        }
    }

    pub async fn handle(&self, event: DomEvent) {
        match event {
            DomEvent::Click { target, timestamp } => self.on_click(target, timestamp).await,
            DomEvent::Input { target, timestamp } => self.on_input(target, timestamp),
            DomEvent::Blur { target, timestamp } => self.on_blur(target, timestamp).await,
            DomEvent::CharacterData {
                ancestors,
                timestamp,
            } => self.on_character_data(ancestors, timestamp),
            DomEvent::Change { target, timestamp } => self.on_change(target, timestamp).await,
        }
    }

    async fn on_click(&self, target: ElementSnapshot, timestamp: i64) {
        if target.recorder_ui {
            debug!("ignoring click on recorder UI");
            return;
        }
        // Non-element targets are dropped, matching the live listener.
        let Some(tag) = target.tag_lower() else {
            return;
        };
        let pair = self.scoped(synthesize(&target));
        let text = snippet(target.text.as_deref(), self.policy.text_snippet_max);
        let record = ActionRecord::click(timestamp, pair.css, pair.xpath, text, tag);
        self.emit(record).await;
    }

    fn on_input(&self, target: ElementSnapshot, timestamp: i64) {
        if target.recorder_ui || !target.is_text_entry() {
            return;
        }
        let raw = synthesize(&target);
        let key = raw.css.clone();
        let pair = self.scoped(raw);
        let record = ActionRecord::input(
            timestamp,
            pair.css,
            pair.xpath,
            target.entry_value(),
            entry_tag(&target),
        );
        self.debounce.reset(&key, record, self.sink.clone());
    }

    async fn on_blur(&self, target: ElementSnapshot, timestamp: i64) {
        if target.recorder_ui || !target.is_text_entry() {
            return;
        }
        let raw = synthesize(&target);
        // Blur is a more reliable "user is done" signal than elapsed
        // time: drop the pending timer and flush the current value
        // immediately instead.
        self.debounce.cancel(&raw.css);

        let value = target.entry_value();
        if value.trim().is_empty() {
            return;
        }
        let pair = self.scoped(raw);
        let record =
            ActionRecord::input(timestamp, pair.css, pair.xpath, value, entry_tag(&target));
        self.emit(record).await;
    }

    fn on_character_data(&self, ancestors: Vec<ElementSnapshot>, timestamp: i64) {
        // Best-effort support for legacy contenteditable change
        // notification: walk up to the nearest editable host, bounded by
        // reaching <body> or exhausting the chain.
        let Some(host) = nearest_editable_host(&ancestors) else {
            return;
        };
        if host.recorder_ui {
            return;
        }
        let raw = synthesize(host);
        let key = raw.css.clone();
        let pair = self.scoped(raw);
        let record = ActionRecord::input(
            timestamp,
            pair.css,
            pair.xpath,
            host.text.clone().unwrap_or_default(),
            "contenteditable",
        );
        self.debounce.reset(&key, record, self.sink.clone());
    }

    async fn on_change(&self, target: ElementSnapshot, timestamp: i64) {
        if target.recorder_ui || !target.is_select() {
            return;
        }
        let selected = target.selected.clone().unwrap_or_default();
        let pair = self.scoped(synthesize(&target));
        let record =
            ActionRecord::select(timestamp, pair.css, pair.xpath, selected.value, selected.text);
        self.emit(record).await;
    }

    /// Flush every pending debounced record immediately; used when the
    /// session stops so trailing keystrokes are not lost.
    pub async fn flush_pending(&self) {
        for key in self.debounce.pending_keys() {
            if let Some(record) = self.debounce.fire_now(&key) {
                self.emit(record).await;
            }
        }
    }

    async fn emit(&self, record: ActionRecord) {
        if let Err(err) = self.sink.accept(record).await {
            warn!(error = %err, "action dropped");
        }
    }

    fn scoped(&self, pair: SelectorPair) -> SelectorPair {
        match self.scope {
            FrameScope::TopLevel => pair,
            FrameScope::Nested => pair.for_frame(),
        }
    }
}

fn entry_tag(target: &ElementSnapshot) -> String {
    if target.content_editable {
        "contenteditable".to_string()
    } else {
        target.tag_lower().unwrap_or_else(|| "unknown".to_string())
    }
}

fn snippet(text: Option<&str>, max: usize) -> String {
    text.unwrap_or_default().chars().take(max).collect()
}

fn nearest_editable_host(ancestors: &[ElementSnapshot]) -> Option<&ElementSnapshot> {
    for ancestor in ancestors {
        if ancestor.content_editable {
            return Some(ancestor);
        }
        if ancestor.is_body() {
            return None;
        }
    }
    None
}
