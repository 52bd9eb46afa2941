//! Canvas 2D rendering for the petal field

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasSurface;
