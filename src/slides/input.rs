//! Input adapters
//!
//! Touch, keyboard, wheel and indicator input all reduce to a
//! [`NavIntent`] (or a target index) before reaching the controller.

use glam::Vec2;

use crate::consts::{MIN_SWIPE, WHEEL_LOCK_MS, WHEEL_THRESHOLD};

/// Navigation requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Next,
    Previous,
}

/// Tracks one touch gesture from start to end
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<Vec2>,
    min_distance: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(MIN_SWIPE)
    }
}

impl SwipeTracker {
    pub fn new(min_distance: f32) -> Self {
        Self {
            start: None,
            min_distance,
        }
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some(Vec2::new(x, y));
    }

    /// Finish the gesture
    ///
    /// Swiping left (finger moves toward smaller x) means next. Gestures
    /// that are mostly vertical, too short, or exact diagonals are ignored.
    pub fn end(&mut self, x: f32, y: f32) -> Option<NavIntent> {
        let start = self.start.take()?;
        let diff = start - Vec2::new(x, y);

        if diff.x.abs() > diff.y.abs() && diff.x.abs() > self.min_distance {
            if diff.x > 0.0 {
                Some(NavIntent::Next)
            } else {
                Some(NavIntent::Previous)
            }
        } else {
            None
        }
    }
}

/// Map a `KeyboardEvent.key` value to a navigation
pub fn key_intent(key: &str) -> Option<NavIntent> {
    match key {
        "ArrowRight" | "ArrowDown" | " " => Some(NavIntent::Next),
        "ArrowLeft" | "ArrowUp" => Some(NavIntent::Previous),
        _ => None,
    }
}

/// Lets one wheel navigation through per lock window
///
/// Any wheel event outside the window re-arms the lock, even one too small
/// to navigate.
#[derive(Debug, Clone)]
pub struct WheelGate {
    locked_until: f64,
    lock_ms: f64,
    threshold: f64,
}

impl Default for WheelGate {
    fn default() -> Self {
        Self::new(WHEEL_LOCK_MS, WHEEL_THRESHOLD)
    }
}

impl WheelGate {
    pub fn new(lock_ms: f64, threshold: f64) -> Self {
        Self {
            locked_until: f64::NEG_INFINITY,
            lock_ms,
            threshold,
        }
    }

    pub fn is_locked(&self, now_ms: f64) -> bool {
        now_ms < self.locked_until
    }

    pub fn on_wheel(&mut self, delta_y: f64, now_ms: f64) -> Option<NavIntent> {
        if self.is_locked(now_ms) {
            return None;
        }
        self.locked_until = now_ms + self.lock_ms;

        if delta_y > self.threshold {
            Some(NavIntent::Next)
        } else if delta_y < -self.threshold {
            Some(NavIntent::Previous)
        } else {
            None
        }
    }
}

/// Parse an indicator's `data-slide` attribute
///
/// Range checking is left to the controller.
pub fn indicator_target(attr: Option<&str>) -> Option<usize> {
    attr?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_left_is_next() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(300.0, 100.0);
        assert_eq!(swipe.end(200.0, 110.0), Some(NavIntent::Next));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(200.0, 90.0), Some(NavIntent::Previous));
    }

    #[test]
    fn test_swipe_ignored_when_short_or_vertical() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(50.0, 100.0), None); // exactly 50 is not enough

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(20.0, 0.0), None); // vertical dominates

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(0.0, 0.0), None); // tie
    }

    #[test]
    fn test_swipe_end_without_start() {
        let mut swipe = SwipeTracker::default();
        assert_eq!(swipe.end(0.0, 0.0), None);

        swipe.begin(300.0, 0.0);
        assert!(swipe.end(0.0, 0.0).is_some());
        // Start is consumed by the first end
        assert_eq!(swipe.end(0.0, 0.0), None);
    }

    #[test]
    fn test_keys() {
        assert_eq!(key_intent("ArrowRight"), Some(NavIntent::Next));
        assert_eq!(key_intent("ArrowDown"), Some(NavIntent::Next));
        assert_eq!(key_intent(" "), Some(NavIntent::Next));
        assert_eq!(key_intent("ArrowLeft"), Some(NavIntent::Previous));
        assert_eq!(key_intent("ArrowUp"), Some(NavIntent::Previous));
        assert_eq!(key_intent("Enter"), None);
    }

    #[test]
    fn test_wheel_lock_window() {
        let mut wheel = WheelGate::default();
        assert_eq!(wheel.on_wheel(40.0, 0.0), Some(NavIntent::Next));
        assert_eq!(wheel.on_wheel(40.0, 500.0), None);
        assert_eq!(wheel.on_wheel(40.0, 799.0), None);
        assert_eq!(wheel.on_wheel(40.0, 800.0), Some(NavIntent::Next));
        assert_eq!(wheel.on_wheel(-40.0, 1700.0), Some(NavIntent::Previous));
    }

    #[test]
    fn test_small_wheel_delta_still_locks() {
        let mut wheel = WheelGate::default();
        assert_eq!(wheel.on_wheel(10.0, 0.0), None);
        assert!(wheel.is_locked(100.0));
        assert_eq!(wheel.on_wheel(100.0, 100.0), None);
        assert_eq!(wheel.on_wheel(30.0, 900.0), None); // not beyond threshold
    }

    #[test]
    fn test_indicator_target() {
        assert_eq!(indicator_target(Some("3")), Some(3));
        assert_eq!(indicator_target(Some(" 0 ")), Some(0));
        assert_eq!(indicator_target(Some("-1")), None);
        assert_eq!(indicator_target(Some("two")), None);
        assert_eq!(indicator_target(None), None);
    }
}
