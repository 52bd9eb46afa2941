//! `PetalSurface` backed by a 2D canvas context

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::petals::{PetalPath, PetalSurface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas; `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }
}

impl PetalSurface for CanvasSurface {
    fn set_size(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_petal(&mut self, pos: Vec2, rotation: f32, alpha: f32, path: &PetalPath, fill: &str) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(pos.x as f64, pos.y as f64);
        let _ = ctx.rotate(rotation as f64);
        ctx.set_global_alpha(alpha as f64);

        ctx.begin_path();
        ctx.move_to(path.start.x as f64, path.start.y as f64);
        for seg in &path.segments {
            ctx.bezier_curve_to(
                seg.ctrl1.x as f64,
                seg.ctrl1.y as f64,
                seg.ctrl2.x as f64,
                seg.ctrl2.y as f64,
                seg.end.x as f64,
                seg.end.y as f64,
            );
        }
        ctx.set_fill_style_str(fill);
        ctx.fill();

        ctx.restore();
    }
}
