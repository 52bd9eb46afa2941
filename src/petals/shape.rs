//! Petal silhouette
//!
//! A heart/teardrop outline made of two cubic Bézier segments, in the
//! petal's local frame (origin at the petal position, +y down).

use glam::Vec2;

/// A cubic Bézier segment continuing from the previous point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub end: Vec2,
}

/// Closed petal outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalPath {
    pub start: Vec2,
    pub segments: [CubicSegment; 2],
}

impl PetalPath {
    /// Outline for a petal of the given size
    pub fn new(size: f32) -> Self {
        let s = size;
        let notch = Vec2::new(0.0, s * 0.3);
        Self {
            start: notch,
            segments: [
                CubicSegment {
                    ctrl1: Vec2::new(-s * 0.5, -s * 0.3),
                    ctrl2: Vec2::new(-s, s * 0.1),
                    end: Vec2::new(0.0, s),
                },
                CubicSegment {
                    ctrl1: Vec2::new(s, s * 0.1),
                    ctrl2: Vec2::new(s * 0.5, -s * 0.3),
                    end: notch,
                },
            ],
        }
    }

    /// Point on segment `index` at parameter `t` in [0, 1]
    pub fn point(&self, index: usize, t: f32) -> Vec2 {
        let p0 = if index == 0 {
            self.start
        } else {
            self.segments[index - 1].end
        };
        let seg = &self.segments[index];
        let u = 1.0 - t;
        p0 * (u * u * u)
            + seg.ctrl1 * (3.0 * u * u * t)
            + seg.ctrl2 * (3.0 * u * t * t)
            + seg.end * (t * t * t)
    }
}
