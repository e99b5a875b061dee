use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drag::DragTracker;
use crate::policy::BridgePolicyView;

pub const START_ACTION: &str = "start";

/// The shared flag object written once per click and polled by the host.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StartSignal {
    pub timestamp: i64,
    pub action: String,
}

impl StartSignal {
    pub fn at(timestamp: i64) -> Self {
        Self {
            timestamp,
            action: START_ACTION.to_string(),
        }
    }
}

struct BridgeState {
    signal: Option<StartSignal>,
    panel_visible: bool,
    drag: DragTracker,
}

/// Polling handshake between the floating panel and the host.
///
/// The panel writes, the host polls; there is no synchronous in-page to
/// host call path. After a successful press the panel is hidden to
/// prevent re-triggering. The bridge stays functional if the panel
/// disappears mid-session: polling simply keeps returning the last
/// signal until the host takes it.
pub struct ControlBridge {
    policy: BridgePolicyView,
    state: Mutex<BridgeState>,
}

impl ControlBridge {
    pub fn new(policy: BridgePolicyView) -> Self {
        Self {
            policy,
            state: Mutex::new(BridgeState {
                signal: None,
                panel_visible: true,
                drag: DragTracker::default(),
            }),
        }
    }

    /// Start-button press. Returns whether the signal was actually set;
    /// presses during or just after a drag gesture are suppressed.
    pub fn press(&self, now_ms: i64) -> bool {
        let mut state = self.state.lock();
        if state.drag.suppresses_click(now_ms) {
            debug!("start press suppressed by drag gesture");
            return false;
        }
        if state.signal.is_some() {
            return false;
        }
        state.signal = Some(StartSignal::at(now_ms));
        state.panel_visible = false;
        debug!(timestamp = now_ms, "recording start request set");
        true
    }

    /// Non-consuming read, the host's poll.
    pub fn poll(&self) -> Option<StartSignal> {
        self.state.lock().signal.clone()
    }

    /// Consume the signal after the host has acted on it.
    pub fn take(&self) -> Option<StartSignal> {
        self.state.lock().signal.take()
    }

    pub fn panel_visible(&self) -> bool {
        self.state.lock().panel_visible
    }

    pub fn drag_begin(&self, x: f64, y: f64) {
        self.state.lock().drag.begin(x, y);
    }

    pub fn drag_move(&self, x: f64, y: f64) {
        let mut state = self.state.lock();
        state.drag.move_to(x, y, &self.policy);
    }

    pub fn drag_end(&self, now_ms: i64) {
        let mut state = self.state.lock();
        state.drag.end(now_ms, &self.policy);
    }
}

impl Default for ControlBridge {
    fn default() -> Self {
        Self::new(BridgePolicyView::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_signal_once_and_hides_panel() {
        let bridge = ControlBridge::default();
        assert!(bridge.press(1000));
        assert!(!bridge.panel_visible());
        assert!(!bridge.press(1001));

        let signal = bridge.poll().expect("signal present");
        assert_eq!(signal.action, START_ACTION);
        assert_eq!(signal.timestamp, 1000);
    }

    #[test]
    fn poll_does_not_consume_take_does() {
        let bridge = ControlBridge::default();
        bridge.press(5);
        assert!(bridge.poll().is_some());
        assert!(bridge.poll().is_some());
        assert!(bridge.take().is_some());
        assert!(bridge.poll().is_none());
    }

    #[test]
    fn drag_release_over_button_does_not_start_recording() {
        let bridge = ControlBridge::default();
        bridge.drag_begin(100.0, 20.0);
        bridge.drag_move(160.0, 20.0);
        bridge.drag_end(1000);
        assert!(!bridge.press(1050));
        assert!(bridge.poll().is_none());
        // Guard expired, panel still up, press goes through.
        assert!(bridge.press(1200));
    }

    #[test]
    fn signal_wire_format() {
        let raw = serde_json::to_value(StartSignal::at(42)).unwrap();
        assert_eq!(raw["timestamp"], 42);
        assert_eq!(raw["action"], "start");
    }
}
