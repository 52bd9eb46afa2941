//! Slide navigation
//!
//! The controller never touches the DOM. Every operation returns the
//! [`SlideEffect`]s the page should apply, and timers are driven by the
//! caller through [`SlideController::advance`].

pub mod controller;
pub mod hooks;
pub mod input;
pub mod timeline;

pub use controller::{Direction, SlideController, SlideEffect, SlidePhase};
pub use hooks::{EnterHook, HookStep, RevealKind, RevealTarget};
pub use input::{NavIntent, SwipeTracker, WheelGate, indicator_target, key_intent};
pub use timeline::Timeline;
