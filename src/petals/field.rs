//! The petal field: a fixed batch of petals recycled forever

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::petal::Petal;
use super::shape::PetalPath;
use crate::petal_count_for_width;

/// Something petals can be drawn on
pub trait PetalSurface {
    /// Match the viewport size
    fn set_size(&mut self, width: f32, height: f32);
    /// Wipe the whole surface
    fn clear(&mut self);
    /// Fill `path` translated to `pos` and rotated by `rotation` radians
    fn fill_petal(&mut self, pos: Vec2, rotation: f32, alpha: f32, path: &PetalPath, fill: &str);
}

/// Owns every petal and advances them once per display frame
#[derive(Debug, Clone)]
pub struct PetalField {
    petals: Vec<Petal>,
    width: f32,
    height: f32,
    rng: Pcg32,
    running: bool,
}

impl PetalField {
    pub fn new(seed: u64) -> Self {
        Self {
            petals: Vec::new(),
            width: 0.0,
            height: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            running: true,
        }
    }

    /// Size the surface and populate the batch
    ///
    /// Unlike later resets, initial petals are spread over the whole
    /// viewport height so the screen is not empty on load.
    pub fn initialize<S: PetalSurface + ?Sized>(&mut self, surface: &mut S, width: f32, height: f32) {
        self.resize(surface, width, height);

        let count = petal_count_for_width(width);
        self.petals = (0..count)
            .map(|_| {
                let mut petal = Petal::spawn(&mut self.rng, width);
                petal.pos.y = self.rng.random_range(0.0..height.max(1.0));
                petal
            })
            .collect();

        log::info!("Petal field: {} petals on {}x{}", count, width, height);
    }

    /// Resize the surface only; petals keep their positions
    pub fn resize<S: PetalSurface + ?Sized>(&mut self, surface: &mut S, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        surface.set_size(width, height);
    }

    /// Advance every petal one frame, recycling those that fell out
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        for petal in &mut self.petals {
            if petal.step(self.height) {
                *petal = Petal::spawn(&mut self.rng, self.width);
            }
        }
    }

    /// Clear the surface and draw every petal
    pub fn render<S: PetalSurface + ?Sized>(&self, surface: &mut S) {
        if !self.running {
            return;
        }
        surface.clear();
        for petal in &self.petals {
            let path = PetalPath::new(petal.size);
            surface.fill_petal(
                petal.pos,
                petal.rotation_radians(),
                petal.opacity,
                &path,
                &petal.fill_style(),
            );
        }
    }

    /// Stop animating; `tick` and `render` become no-ops
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Petal field stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn petals(&self) -> &[Petal] {
        &self.petals
    }

    /// Mutable access for scripted scenes and tests
    pub fn petals_mut(&mut self) -> &mut [Petal] {
        &mut self.petals
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Records draw calls instead of painting
    #[derive(Default)]
    struct RecordingSurface {
        size: (f32, f32),
        clears: usize,
        fills: Vec<(Vec2, f32, String)>,
    }

    impl PetalSurface for RecordingSurface {
        fn set_size(&mut self, width: f32, height: f32) {
            self.size = (width, height);
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.fills.clear();
        }

        fn fill_petal(&mut self, pos: Vec2, _rotation: f32, alpha: f32, _path: &PetalPath, fill: &str) {
            self.fills.push((pos, alpha, fill.to_string()));
        }
    }

    #[test]
    fn test_batch_size_depends_on_width() {
        let mut surface = RecordingSurface::default();
        let mut field = PetalField::new(1);
        field.initialize(&mut surface, 480.0, 800.0);
        assert_eq!(field.petals().len(), 15);

        field.initialize(&mut surface, 1024.0, 768.0);
        assert_eq!(field.petals().len(), 25);
        assert_eq!(surface.size, (1024.0, 768.0));
    }

    #[test]
    fn test_initial_spread_covers_viewport() {
        let mut surface = RecordingSurface::default();
        let mut field = PetalField::new(3);
        field.initialize(&mut surface, 1024.0, 768.0);
        assert!(field.petals().iter().all(|p| (0.0..768.0).contains(&p.pos.y)));
    }

    #[test]
    fn test_resize_keeps_petals() {
        let mut surface = RecordingSurface::default();
        let mut field = PetalField::new(5);
        field.initialize(&mut surface, 1024.0, 768.0);
        let before = field.petals().to_vec();

        field.resize(&mut surface, 400.0, 300.0);
        assert_eq!(field.petals(), &before[..]);
        assert_eq!(field.size(), (400.0, 300.0));
        assert_eq!(surface.size, (400.0, 300.0));
    }

    #[test]
    fn test_fallen_petal_is_fully_reset() {
        let mut surface = RecordingSurface::default();
        let mut field = PetalField::new(11);
        field.initialize(&mut surface, 1024.0, 600.0);

        let old = field.petals()[0].clone();
        {
            let petal = &mut field.petals_mut()[0];
            petal.pos.y = 625.0;
        }
        field.tick();

        let fresh = &field.petals()[0];
        assert!(fresh.pos.y < -20.0);
        assert_ne!(fresh.size, old.size);
        assert_ne!(fresh.vel, old.vel);
        assert_ne!(fresh.opacity, old.opacity);
    }

    #[test]
    fn test_render_clears_then_draws_each() {
        let mut surface = RecordingSurface::default();
        let mut field = PetalField::new(9);
        field.initialize(&mut surface, 480.0, 800.0);
        field.tick();
        field.render(&mut surface);

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.fills.len(), 15);
        let (pos, alpha, fill) = &surface.fills[0];
        assert_eq!(*pos, field.petals()[0].pos);
        assert!(fill.starts_with("rgba("));
        assert!(fill.ends_with(&format!("{})", alpha)));
    }

    #[test]
    fn test_stop_freezes_field() {
        let mut surface = RecordingSurface::default();
        let mut field = PetalField::new(4);
        field.initialize(&mut surface, 1024.0, 768.0);
        field.stop();
        assert!(!field.is_running());

        let before = field.petals().to_vec();
        field.tick();
        field.render(&mut surface);
        assert_eq!(field.petals(), &before[..]);
        assert_eq!(surface.clears, 0);
    }

    proptest! {
        #[test]
        fn prop_petals_never_sink_far(seed in any::<u64>(), frames in 1usize..2000) {
            let mut surface = RecordingSurface::default();
            let mut field = PetalField::new(seed);
            field.initialize(&mut surface, 640.0, 360.0);
            for _ in 0..frames {
                field.tick();
            }
            prop_assert_eq!(field.petals().len(), 25);
            for petal in field.petals() {
                prop_assert!(petal.pos.y <= 360.0 + 20.0);
                prop_assert!(petal.pos.y >= -120.0);
            }
        }
    }
}
