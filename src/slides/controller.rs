//! Slide controller state machine
//!
//! `Idle` accepts one transition at a time; `Transitioning` rejects every
//! request until the settle delay has elapsed.

use std::collections::BTreeMap;

use super::hooks::{EnterHook, HookStep, RevealTarget};
use super::timeline::Timeline;
use crate::consts::SETTLE_DELAY_MS;

/// Which way the slides move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Old slide leaves to the left, new one arrives from the right
    Forward,
    /// Old slide leaves to the right, new one arrives from the left
    Backward,
}

impl Direction {
    /// Direction implied by jumping from `current` to `target`
    pub fn between(current: usize, target: usize) -> Self {
        if target > current {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlidePhase {
    Idle,
    Transitioning { settles_at: f64 },
}

/// Visible change the page must apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlideEffect {
    /// Write the total slide count
    SetTotal(usize),
    /// Show a slide without animation (page load)
    Activate(usize),
    /// Animate from one slide to another; `to` becomes the only active slide
    Transition {
        from: usize,
        to: usize,
        direction: Direction,
    },
    /// Mark exactly this indicator dot active
    MarkIndicator(usize),
    /// Counter text (1-based)
    SetCounter(usize),
    /// Hide the swipe hint for good
    HideHint,
    Conceal(RevealTarget),
    Reveal(RevealTarget),
    /// Transition finished, new requests are accepted again
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SlideTimer {
    Settle,
    Reveal(RevealTarget),
}

/// Owns the current slide and every rule about moving between slides
#[derive(Debug, Clone)]
pub struct SlideController {
    total: usize,
    current: usize,
    phase: SlidePhase,
    settle_ms: f64,
    hint_hidden: bool,
    hooks: BTreeMap<usize, EnterHook>,
    timers: Timeline<SlideTimer>,
}

impl SlideController {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            phase: SlidePhase::Idle,
            settle_ms: SETTLE_DELAY_MS,
            hint_hidden: false,
            hooks: BTreeMap::new(),
            timers: Timeline::new(),
        }
    }

    /// Override the settle delay
    pub fn with_settle_delay(mut self, settle_ms: f64) -> Self {
        self.settle_ms = settle_ms.max(0.0);
        self
    }

    /// Attach an enter hook to a slide (replaces any previous one)
    pub fn with_hook(mut self, index: usize, hook: EnterHook) -> Self {
        if index < self.total {
            self.hooks.insert(index, hook);
        } else {
            log::warn!("Ignoring enter hook for slide {} of {}", index, self.total);
        }
        self
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> SlidePhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, SlidePhase::Transitioning { .. })
    }

    pub fn hint_hidden(&self) -> bool {
        self.hint_hidden
    }

    pub fn hook(&self, index: usize) -> Option<&EnterHook> {
        self.hooks.get(&index)
    }

    /// Effects for the initial page state
    pub fn start(&mut self, now_ms: f64) -> Vec<SlideEffect> {
        if self.total == 0 {
            return Vec::new();
        }
        let mut effects = vec![
            SlideEffect::SetTotal(self.total),
            SlideEffect::Activate(self.current),
            SlideEffect::MarkIndicator(self.current),
            SlideEffect::SetCounter(self.current + 1),
        ];
        self.run_enter_hook(self.current, now_ms, &mut effects);
        effects
    }

    /// Move to `target` if the controller is idle and the target is valid
    ///
    /// Due timers are fired first, so a request landing exactly on the
    /// settle instant is accepted.
    pub fn request_transition(
        &mut self,
        target: usize,
        direction: Direction,
        now_ms: f64,
    ) -> Vec<SlideEffect> {
        let mut effects = self.advance(now_ms);

        if self.is_transitioning() || target == self.current || target >= self.total {
            log::debug!(
                "Rejected transition {} -> {} ({:?})",
                self.current,
                target,
                self.phase
            );
            return effects;
        }

        let from = self.current;
        let settles_at = now_ms + self.settle_ms;
        self.phase = SlidePhase::Transitioning { settles_at };
        self.current = target;

        effects.push(SlideEffect::Transition {
            from,
            to: target,
            direction,
        });
        effects.push(SlideEffect::MarkIndicator(target));
        effects.push(SlideEffect::SetCounter(target + 1));

        if from == 0 && !self.hint_hidden {
            self.hint_hidden = true;
            effects.push(SlideEffect::HideHint);
        }

        self.run_enter_hook(target, now_ms, &mut effects);
        self.timers.schedule(settles_at, SlideTimer::Settle);

        log::debug!("Slide {} -> {} ({:?})", from, target, direction);
        effects
    }

    /// Advance one slide unless already at the last
    pub fn next(&mut self, now_ms: f64) -> Vec<SlideEffect> {
        if self.current + 1 < self.total {
            self.request_transition(self.current + 1, Direction::Forward, now_ms)
        } else {
            self.advance(now_ms)
        }
    }

    /// Go back one slide unless already at the first
    pub fn previous(&mut self, now_ms: f64) -> Vec<SlideEffect> {
        if self.current > 0 {
            self.request_transition(self.current - 1, Direction::Backward, now_ms)
        } else {
            self.advance(now_ms)
        }
    }

    /// Jump straight to `target` (indicator click)
    pub fn go_to(&mut self, target: usize, now_ms: f64) -> Vec<SlideEffect> {
        let direction = Direction::between(self.current, target);
        self.request_transition(target, direction, now_ms)
    }

    /// Fire every timer due at `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> Vec<SlideEffect> {
        self.timers
            .drain_due(now_ms)
            .into_iter()
            .map(|timer| match timer {
                SlideTimer::Settle => {
                    self.phase = SlidePhase::Idle;
                    SlideEffect::Settled
                }
                SlideTimer::Reveal(target) => SlideEffect::Reveal(target),
            })
            .collect()
    }

    fn run_enter_hook(&mut self, index: usize, now_ms: f64, effects: &mut Vec<SlideEffect>) {
        let Some(hook) = self.hooks.get_mut(&index) else {
            return;
        };
        for step in hook.fire() {
            match step {
                HookStep::Conceal(target) => effects.push(SlideEffect::Conceal(target)),
                HookStep::Reveal { target, delay_ms } => {
                    self.timers
                        .schedule(now_ms + delay_ms, SlideTimer::Reveal(target));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn transitioned(effects: &[SlideEffect]) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, SlideEffect::Transition { .. }))
    }

    fn reveals(effects: &[SlideEffect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, SlideEffect::Reveal(_)))
            .count()
    }

    #[test]
    fn test_start_shows_first_slide() {
        let mut slides = SlideController::new(5);
        let effects = slides.start(0.0);
        assert_eq!(
            effects,
            vec![
                SlideEffect::SetTotal(5),
                SlideEffect::Activate(0),
                SlideEffect::MarkIndicator(0),
                SlideEffect::SetCounter(1),
            ]
        );
    }

    #[test]
    fn test_next_then_settle() {
        let mut slides = SlideController::new(5);
        slides.start(0.0);

        let effects = slides.next(1000.0);
        assert_eq!(slides.current(), 1);
        assert!(slides.is_transitioning());
        assert!(slides.hint_hidden());
        assert_eq!(
            effects,
            vec![
                SlideEffect::Transition {
                    from: 0,
                    to: 1,
                    direction: Direction::Forward
                },
                SlideEffect::MarkIndicator(1),
                SlideEffect::SetCounter(2),
                SlideEffect::HideHint,
            ]
        );

        // Second request before the settle delay is rejected
        assert!(slides.next(1200.0).is_empty());
        assert_eq!(slides.current(), 1);

        assert!(slides.advance(1649.0).is_empty());
        assert!(slides.is_transitioning());
        assert_eq!(slides.advance(1650.0), vec![SlideEffect::Settled]);
        assert_eq!(slides.phase(), SlidePhase::Idle);
    }

    #[test]
    fn test_request_at_settle_instant_is_accepted() {
        let mut slides = SlideController::new(3);
        slides.next(0.0);
        let effects = slides.next(SETTLE_DELAY_MS);
        assert_eq!(effects[0], SlideEffect::Settled);
        assert!(transitioned(&effects));
        assert_eq!(slides.current(), 2);
    }

    #[test]
    fn test_bounds_are_noops() {
        let mut slides = SlideController::new(3);
        assert!(slides.previous(0.0).is_empty());
        assert_eq!(slides.current(), 0);

        slides.go_to(2, 0.0);
        slides.advance(1000.0);
        assert!(slides.next(2000.0).is_empty());
        assert_eq!(slides.current(), 2);
    }

    #[test]
    fn test_same_and_out_of_range_targets_ignored() {
        let mut slides = SlideController::new(3);
        assert!(slides.request_transition(0, Direction::Forward, 0.0).is_empty());
        assert!(slides.request_transition(3, Direction::Forward, 0.0).is_empty());
        assert!(slides.request_transition(usize::MAX, Direction::Backward, 0.0).is_empty());
        assert!(!slides.is_transitioning());
        assert!(!slides.hint_hidden());
    }

    #[test]
    fn test_hint_hidden_only_once() {
        let mut slides = SlideController::new(3);
        let first = slides.next(0.0);
        assert!(first.contains(&SlideEffect::HideHint));

        slides.previous(1000.0);
        let again = slides.next(2000.0);
        assert!(transitioned(&again));
        assert!(!again.contains(&SlideEffect::HideHint));
    }

    #[test]
    fn test_go_to_infers_direction() {
        let mut slides = SlideController::new(5);
        let effects = slides.go_to(3, 0.0);
        assert!(effects.contains(&SlideEffect::Transition {
            from: 0,
            to: 3,
            direction: Direction::Forward
        }));

        let effects = slides.go_to(1, 1000.0);
        assert!(effects.contains(&SlideEffect::Transition {
            from: 3,
            to: 1,
            direction: Direction::Backward
        }));
    }

    #[test]
    fn test_timeline_hook_reveals_on_schedule() {
        let mut slides = SlideController::new(5).with_hook(1, EnterHook::timeline(3));
        let effects = slides.next(0.0);
        assert!(effects.contains(&SlideEffect::Conceal(RevealTarget::TimelineItem(0))));
        assert_eq!(reveals(&effects), 0);

        assert_eq!(
            slides.advance(200.0),
            vec![SlideEffect::Reveal(RevealTarget::TimelineItem(0))]
        );
        assert_eq!(
            slides.advance(500.0),
            vec![SlideEffect::Reveal(RevealTarget::TimelineItem(1))]
        );
        // Settle (650) fires before the last item (800)
        assert_eq!(
            slides.advance(800.0),
            vec![
                SlideEffect::Settled,
                SlideEffect::Reveal(RevealTarget::TimelineItem(2))
            ]
        );
    }

    #[test]
    fn test_letter_hook_fires_once_across_reentries() {
        let mut slides = SlideController::new(5).with_hook(4, EnterHook::letter(2, true));

        slides.go_to(4, 0.0);
        let first = slides.advance(10_000.0);
        assert_eq!(reveals(&first), 3);

        slides.go_to(0, 20_000.0);
        slides.go_to(4, 30_000.0);
        let second = slides.advance(40_000.0);
        assert_eq!(reveals(&second), 0);
    }

    #[test]
    fn test_hook_out_of_range_ignored() {
        let slides = SlideController::new(2).with_hook(4, EnterHook::letter(2, true));
        assert!(slides.hook(4).is_none());
    }

    #[test]
    fn test_empty_deck_is_inert() {
        let mut slides = SlideController::new(0);
        assert!(slides.start(0.0).is_empty());
        assert!(slides.next(0.0).is_empty());
        assert!(slides.go_to(0, 0.0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_valid_target_settles_after_delay(
            total in 2usize..12,
            target in 1usize..12,
            now in 0.0f64..1e9,
        ) {
            prop_assume!(target < total);
            let mut slides = SlideController::new(total);
            let effects = slides.go_to(target, now);
            prop_assert!(transitioned(&effects));
            prop_assert_eq!(slides.current(), target);
            prop_assert!(slides.is_transitioning());
            prop_assert_eq!(slides.phase(), SlidePhase::Transitioning { settles_at: now + SETTLE_DELAY_MS });
            let settled = slides.advance(now + SETTLE_DELAY_MS);
            prop_assert_eq!(settled, vec![SlideEffect::Settled]);
        }

        #[test]
        fn prop_rejected_requests_change_nothing(
            total in 1usize..12,
            target in 0usize..32,
            busy in any::<bool>(),
        ) {
            let mut slides = SlideController::new(total);
            if busy && total > 1 {
                slides.next(0.0);
            }
            let before = (slides.current(), slides.phase(), slides.hint_hidden());
            let invalid = slides.is_transitioning()
                || target == slides.current()
                || target >= total;
            prop_assume!(invalid);

            let effects = slides.request_transition(target, Direction::Forward, 1.0);
            prop_assert!(effects.is_empty());
            prop_assert_eq!(before, (slides.current(), slides.phase(), slides.hint_hidden()));
        }
    }
}
