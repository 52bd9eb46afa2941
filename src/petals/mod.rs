//! Falling petal simulation
//!
//! Pure and seedable: the field only knows its viewport size, and drawing
//! goes through the [`PetalSurface`] trait.

pub mod field;
pub mod petal;
pub mod shape;

pub use field::{PetalField, PetalSurface};
pub use petal::{PALETTE, Petal, PetalColor};
pub use shape::{CubicSegment, PetalPath};
