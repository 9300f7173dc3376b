//! Theme system: palettes and the semantic styles built on them.
//!
//! - `palette`: Dark and light color sets
//! - `styles`: Style and block builders taking a [`Palette`]

pub mod palette;
pub mod styles;

pub use palette::Palette;
