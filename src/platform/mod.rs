//! Platform layer
//!
//! DOM handles for the slideshow markup. Every optional element is an
//! `Option`, and applying an effect to a missing element does nothing.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{SlideDom, html_elements};
