//! A single petal and its palette

use glam::Vec2;
use rand::Rng;

use crate::consts::{PETAL_MARGIN, PETAL_SPAWN_BAND, WOBBLE_AMPLITUDE};

/// Petal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetalColor {
    Pink,
    LightPink,
    Rose,
    SoftPink,
    Gold,
}

/// Every color a petal can be sampled from
pub const PALETTE: [PetalColor; 5] = [
    PetalColor::Pink,
    PetalColor::LightPink,
    PetalColor::Rose,
    PetalColor::SoftPink,
    PetalColor::Gold,
];

impl PetalColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PetalColor::Pink => (233, 30, 99),
            PetalColor::LightPink => (244, 143, 177),
            PetalColor::Rose => (255, 96, 144),
            PetalColor::SoftPink => (255, 128, 171),
            PetalColor::Gold => (255, 215, 0),
        }
    }

    /// CSS fill style at the given opacity
    pub fn css(&self, alpha: f32) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({}, {}, {}, {})", r, g, b, alpha)
    }
}

/// One decorative petal
#[derive(Debug, Clone, PartialEq)]
pub struct Petal {
    pub pos: Vec2,
    pub size: f32,
    /// Drift per frame (x sideways, y downward)
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per frame
    pub rotation_speed: f32,
    pub opacity: f32,
    pub color: PetalColor,
    /// Sideways oscillation phase (radians)
    pub wobble: f32,
    pub wobble_speed: f32,
}

impl Petal {
    /// Fresh petal just above the top edge of a `width`-wide viewport
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..width.max(1.0)),
                -PETAL_MARGIN - (PETAL_SPAWN_BAND - rng.random_range(0.0..PETAL_SPAWN_BAND)),
            ),
            size: rng.random_range(4.0..12.0),
            vel: Vec2::new(rng.random_range(-0.4..0.4), rng.random_range(0.3..1.5)),
            rotation: rng.random_range(0.0..360.0),
            rotation_speed: rng.random_range(-1.0..1.0),
            opacity: rng.random_range(0.1..0.4),
            color: PALETTE[rng.random_range(0..PALETTE.len())],
            wobble: rng.random_range(0.0..std::f32::consts::TAU),
            wobble_speed: rng.random_range(0.01..0.03),
        }
    }

    /// Move one frame; returns true once the petal has fallen out of a
    /// viewport of the given height
    pub fn step(&mut self, height: f32) -> bool {
        self.wobble += self.wobble_speed;
        self.pos.x += self.vel.x + self.wobble.sin() * WOBBLE_AMPLITUDE;
        self.pos.y += self.vel.y;
        self.rotation += self.rotation_speed;
        self.pos.y > height + PETAL_MARGIN
    }

    /// Rotation in radians, for drawing
    pub fn rotation_radians(&self) -> f32 {
        self.rotation.to_radians()
    }

    pub fn fill_style(&self) -> String {
        self.color.css(self.opacity)
    }
}
