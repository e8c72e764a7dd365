//! Destructible terrain for BARRAGE.
//!
//! Height-field generation (random or from named presets),
//! interpolated height queries, and crater deformation.

pub use barrage_core as core;

pub mod height_field;
pub mod presets;

// Re-export key types for convenience.
pub use height_field::{GenParams, HeightField};
pub use presets::preset_control_points;
