//! Page settings
//!
//! Read once at startup from an inline JSON block; never written back.
//!
//! ```html
//! <script id="slides-config" type="application/json">
//!   { "letter_slide": 5, "confetti_count": 80 }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::confetti::{CONFETTI_COUNT, CONFETTI_LIFETIME_MS};
use crate::consts::*;
use crate::countdown::{CountdownTarget, LocalDateTime};

/// Slideshow settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Slides ===
    /// Settle delay after a transition (ms)
    pub settle_ms: f64,
    /// Slide that replays the staggered list reveal
    pub timeline_slide: Option<usize>,
    /// Slide that plays the one-shot letter reveal
    pub letter_slide: Option<usize>,

    // === Input ===
    /// Minimum horizontal swipe (px)
    pub swipe_threshold: f32,
    /// Wheel delta needed to navigate
    pub wheel_threshold: f64,
    /// One wheel navigation per window (ms)
    pub wheel_lock_ms: f64,

    // === Counters ===
    pub countdowns: Vec<CountdownTarget>,

    // === Effects ===
    /// Falling petals on the background canvas
    pub petals: bool,
    /// Pieces per confetti burst
    pub confetti_count: usize,
    /// Confetti container lifetime (ms)
    pub confetti_lifetime_ms: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            settle_ms: SETTLE_DELAY_MS,
            timeline_slide: Some(1),
            letter_slide: Some(4),

            swipe_threshold: MIN_SWIPE,
            wheel_threshold: WHEEL_THRESHOLD,
            wheel_lock_ms: WHEEL_LOCK_MS,

            countdowns: vec![
                CountdownTarget::new(
                    "january",
                    LocalDateTime {
                        year: 2025,
                        month: 1,
                        day: 2,
                        hour: 17,
                        minute: 0,
                        second: 0,
                    },
                ),
                CountdownTarget::new(
                    "october",
                    LocalDateTime {
                        year: 2025,
                        month: 10,
                        day: 11,
                        hour: 19,
                        minute: 0,
                        second: 0,
                    },
                ),
            ],

            petals: true,
            confetti_count: CONFETTI_COUNT,
            confetti_lifetime_ms: CONFETTI_LIFETIME_MS,
        }
    }
}

impl Settings {
    /// Element id of the inline config block
    pub const CONFIG_ELEMENT_ID: &'static str = "slides-config";

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed slide settings: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp values that would break timing
    fn sanitized(mut self) -> Self {
        self.settle_ms = self.settle_ms.max(0.0);
        self.wheel_lock_ms = self.wheel_lock_ms.max(0.0);
        self.swipe_threshold = self.swipe_threshold.max(0.0);
        self.wheel_threshold = self.wheel_threshold.max(0.0);
        self
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => {
                log::info!("Loaded slide settings from #{}", Self::CONFIG_ELEMENT_ID);
                Self::from_json(&json)
            }
            _ => {
                log::info!("Using default slide settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
