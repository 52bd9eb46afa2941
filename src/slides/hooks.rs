//! Slide enter hooks
//!
//! A hook turns "this slide just became active" into a plan of reveal
//! steps. The controller applies concealments at once and schedules each
//! reveal on its timeline.

use crate::consts::*;

/// Element a reveal step acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTarget {
    /// Entry `i` of the staggered list
    TimelineItem(usize),
    /// Line `i` of the letter
    LetterLine(usize),
    /// Letter signature, shown after every line
    Signature,
}

/// What a hook reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    /// Staggered list reveal, replayed on every entry
    Timeline { items: usize },
    /// Line-by-line letter reveal with an optional signature
    Letter { lines: usize, signature: bool },
}

/// One step of a hook plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HookStep {
    /// Hide the target immediately
    Conceal(RevealTarget),
    /// Show the target `delay_ms` after the transition starts
    Reveal { target: RevealTarget, delay_ms: f64 },
}

/// Per-slide enter hook
#[derive(Debug, Clone)]
pub struct EnterHook {
    kind: RevealKind,
    /// Fires at most once per session
    once: bool,
    fired: bool,
}

impl EnterHook {
    /// Staggered reveal of `items` list entries
    pub fn timeline(items: usize) -> Self {
        Self {
            kind: RevealKind::Timeline { items },
            once: false,
            fired: false,
        }
    }

    /// One-shot reveal of `lines` letter lines, then the signature
    pub fn letter(lines: usize, signature: bool) -> Self {
        Self {
            kind: RevealKind::Letter { lines, signature },
            once: true,
            fired: false,
        }
    }

    pub fn kind(&self) -> RevealKind {
        self.kind
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Produce the reveal plan for one entry into the slide
    ///
    /// A one-shot hook that already fired yields an empty plan.
    pub fn fire(&mut self) -> Vec<HookStep> {
        if self.once && self.fired {
            return Vec::new();
        }
        self.fired = true;

        match self.kind {
            RevealKind::Timeline { items } => {
                let mut steps: Vec<HookStep> = (0..items)
                    .map(|i| HookStep::Conceal(RevealTarget::TimelineItem(i)))
                    .collect();
                steps.extend((0..items).map(|i| HookStep::Reveal {
                    target: RevealTarget::TimelineItem(i),
                    delay_ms: TIMELINE_BASE_MS + i as f64 * TIMELINE_STEP_MS,
                }));
                steps
            }
            RevealKind::Letter { lines, signature } => {
                let mut steps: Vec<HookStep> = (0..lines)
                    .map(|i| HookStep::Reveal {
                        target: RevealTarget::LetterLine(i),
                        delay_ms: LETTER_BASE_MS + i as f64 * LETTER_STEP_MS,
                    })
                    .collect();
                if signature {
                    steps.push(HookStep::Reveal {
                        target: RevealTarget::Signature,
                        delay_ms: LETTER_BASE_MS
                            + lines as f64 * LETTER_STEP_MS
                            + SIGNATURE_PAUSE_MS,
                    });
                }
                steps
            }
        }
    }
}
