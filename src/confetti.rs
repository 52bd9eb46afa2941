//! Surprise confetti burst

use rand::Rng;

/// Emoji a confetti piece can show
pub const CONFETTI_EMOJI: [&str; 10] = [
    "❤️", "💕", "💖", "💗", "✨", "🥰", "💘", "💝", "🌹", "💐",
];

/// Default number of pieces per burst
pub const CONFETTI_COUNT: usize = 60;
/// Container is removed after this long (ms)
pub const CONFETTI_LIFETIME_MS: i32 = 5000;

/// One falling piece, described in CSS units
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub emoji: &'static str,
    /// Horizontal start, percent of the viewport width
    pub left_pct: f32,
    pub font_size_px: f32,
    pub duration_s: f32,
    pub delay_s: f32,
}

impl ConfettiPiece {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            emoji: CONFETTI_EMOJI[rng.random_range(0..CONFETTI_EMOJI.len())],
            left_pct: rng.random_range(0.0..100.0),
            font_size_px: rng.random_range(10.0..26.0),
            duration_s: rng.random_range(2.0..4.0),
            delay_s: rng.random_range(0.0..1.5),
        }
    }

    /// Inline style properties to set on the piece
    pub fn style(&self) -> [(&'static str, String); 4] {
        [
            ("left", format!("{}%", self.left_pct)),
            ("font-size", format!("{}px", self.font_size_px)),
            ("animation-duration", format!("{}s", self.duration_s)),
            ("animation-delay", format!("{}s", self.delay_s)),
        ]
    }
}

/// A whole burst of `count` pieces
pub fn burst<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<ConfettiPiece> {
    (0..count).map(|_| ConfettiPiece::random(rng)).collect()
}
