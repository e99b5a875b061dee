use crate::policy::BridgePolicyView;

/// Tracks one drag gesture on the floating panel header.
///
/// A press is suppressed while a drag is in progress and for a short
/// guard interval after mouse-up, so releasing a dragged panel over the
/// start button does not trigger it.
#[derive(Debug, Default)]
pub struct DragTracker {
    origin: Option<(f64, f64)>,
    dragging: bool,
    guard_until: i64,
}

impl DragTracker {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
        self.dragging = false;
    }

    pub fn move_to(&mut self, x: f64, y: f64, policy: &BridgePolicyView) {
        let Some((ox, oy)) = self.origin else {
            return;
        };
        if (x - ox).abs() > policy.drag_threshold_px || (y - oy).abs() > policy.drag_threshold_px {
            self.dragging = true;
        }
    }

    pub fn end(&mut self, now_ms: i64, policy: &BridgePolicyView) {
        if self.dragging {
            self.guard_until = now_ms + policy.click_guard_ms;
        }
        self.origin = None;
        self.dragging = false;
    }

    /// Whether a press at `now_ms` should be treated as part of a drag.
    pub fn suppresses_click(&self, now_ms: i64) -> bool {
        self.dragging || now_ms < self.guard_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_movement_is_not_a_drag() {
        let policy = BridgePolicyView::default();
        let mut drag = DragTracker::default();
        drag.begin(10.0, 10.0);
        drag.move_to(13.0, 12.0, &policy);
        assert!(!drag.suppresses_click(0));
    }

    #[test]
    fn movement_beyond_threshold_suppresses() {
        let policy = BridgePolicyView::default();
        let mut drag = DragTracker::default();
        drag.begin(10.0, 10.0);
        drag.move_to(20.0, 10.0, &policy);
        assert!(drag.suppresses_click(0));
    }

    #[test]
    fn guard_interval_covers_the_release() {
        let policy = BridgePolicyView::default();
        let mut drag = DragTracker::default();
        drag.begin(0.0, 0.0);
        drag.move_to(50.0, 0.0, &policy);
        drag.end(1000, &policy);
        assert!(drag.suppresses_click(1050));
        assert!(!drag.suppresses_click(1101));
    }

    #[test]
    fn clean_click_after_plain_release_is_allowed() {
        let policy = BridgePolicyView::default();
        let mut drag = DragTracker::default();
        drag.begin(0.0, 0.0);
        drag.end(1000, &policy);
        assert!(!drag.suppresses_click(1001));
    }
}
