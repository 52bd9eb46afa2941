//! Petal Slides - a swipeable slideshow with falling petals
//!
//! Core modules:
//! - `slides`: Slide controller state machine, enter hooks, input adapters
//! - `petals`: Falling petal simulation and its drawing seam
//! - `countdown`: Elapsed-time counters
//! - `confetti`: Surprise confetti burst
//! - `settings`: Page configuration
//! - `platform`: DOM bindings (wasm32 only)
//! - `renderer`: Canvas 2D drawing (wasm32 only)

pub mod confetti;
pub mod countdown;
pub mod petals;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod slides;

pub use petals::{Petal, PetalField, PetalSurface};
pub use settings::Settings;
pub use slides::{Direction, NavIntent, SlideController, SlideEffect};

/// Timing and geometry constants
pub mod consts {
    /// Time a slide transition needs before new requests are accepted (ms)
    pub const SETTLE_DELAY_MS: f64 = 650.0;

    /// Minimum horizontal swipe distance (CSS px)
    pub const MIN_SWIPE: f32 = 50.0;
    /// Wheel delta needed to navigate
    pub const WHEEL_THRESHOLD: f64 = 30.0;
    /// Only one wheel navigation per window (ms)
    pub const WHEEL_LOCK_MS: f64 = 800.0;

    /// Staggered list reveal: first item delay and per-item step (ms)
    pub const TIMELINE_BASE_MS: f64 = 200.0;
    pub const TIMELINE_STEP_MS: f64 = 300.0;
    /// Letter reveal: first line delay, per-line step, signature pause (ms)
    pub const LETTER_BASE_MS: f64 = 300.0;
    pub const LETTER_STEP_MS: f64 = 400.0;
    pub const SIGNATURE_PAUSE_MS: f64 = 300.0;

    /// Viewports narrower than this get the small petal batch
    pub const NARROW_VIEWPORT: f32 = 500.0;
    pub const PETALS_NARROW: usize = 15;
    pub const PETALS_WIDE: usize = 25;
    /// Distance past the bottom edge before a petal is recycled
    pub const PETAL_MARGIN: f32 = 20.0;
    /// Extra spawn height above the top edge
    pub const PETAL_SPAWN_BAND: f32 = 100.0;
    /// Horizontal wobble amplitude (px)
    pub const WOBBLE_AMPLITUDE: f32 = 0.5;

    /// Countdown refresh period (ms)
    pub const COUNTDOWN_PERIOD_MS: i32 = 1000;
}

/// Number of petals for a viewport of the given width
#[inline]
pub fn petal_count_for_width(width: f32) -> usize {
    if width < consts::NARROW_VIEWPORT {
        consts::PETALS_NARROW
    } else {
        consts::PETALS_WIDE
    }
}
