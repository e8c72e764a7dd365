//! Named terrain profiles as control-point tables.
//!
//! Each profile is a short polyline over [0, 1100]; round setup resamples
//! it to the full height-field resolution.

use barrage_core::constants::{TERRAIN_MAX_Y, TERRAIN_MIN_Y, TERRAIN_SAMPLES, WORLD_WIDTH};
use barrage_core::enums::TerrainPreset;

use crate::height_field::HeightField;

/// Control points for a named profile.
pub fn preset_control_points(preset: TerrainPreset) -> &'static [(f64, f64)] {
    match preset {
        TerrainPreset::Flat => &[(0.0, 550.0), (1100.0, 550.0)],
        TerrainPreset::Hills => &[
            (0.0, 540.0),
            (100.0, 500.0),
            (200.0, 520.0),
            (300.0, 480.0),
            (400.0, 490.0),
            (500.0, 460.0),
            (600.0, 500.0),
            (700.0, 470.0),
            (800.0, 540.0),
            (900.0, 500.0),
            (1000.0, 530.0),
            (1100.0, 510.0),
        ],
        TerrainPreset::Mountain => &[
            (0.0, 560.0),
            (200.0, 500.0),
            (400.0, 360.0),
            (550.0, 260.0),
            (700.0, 360.0),
            (900.0, 500.0),
            (1100.0, 560.0),
        ],
        // Terraced basin: plateaus at the edges stepping down to a flat floor.
        TerrainPreset::Valley => &[
            (0.0, 380.0),
            (100.0, 380.0),
            (120.0, 420.0),
            (200.0, 420.0),
            (220.0, 480.0),
            (300.0, 480.0),
            (320.0, 550.0),
            (400.0, 550.0),
            (450.0, 580.0),
            (650.0, 580.0),
            (700.0, 550.0),
            (780.0, 550.0),
            (800.0, 480.0),
            (880.0, 480.0),
            (900.0, 420.0),
            (980.0, 420.0),
            (1000.0, 380.0),
            (1100.0, 380.0),
        ],
    }
}

/// Build a height field from a named preset at the default resolution.
pub fn build_preset(preset: TerrainPreset) -> HeightField {
    HeightField::from_control_points(
        preset_control_points(preset),
        TERRAIN_SAMPLES,
        WORLD_WIDTH,
        TERRAIN_MIN_Y,
        TERRAIN_MAX_Y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_build() {
        for preset in [
            TerrainPreset::Flat,
            TerrainPreset::Hills,
            TerrainPreset::Mountain,
            TerrainPreset::Valley,
        ] {
            let field = build_preset(preset);
            assert_eq!(field.len(), TERRAIN_SAMPLES);
            for i in 0..field.len() {
                let y = field.sample_y(i);
                assert!(
                    (TERRAIN_MIN_Y..=TERRAIN_MAX_Y).contains(&y),
                    "{preset:?} sample {i} = {y} out of band"
                );
            }
        }
    }

    #[test]
    fn test_flat_preset_is_flat() {
        let field = build_preset(TerrainPreset::Flat);
        for x in [0.0, 137.0, 550.0, 1099.9] {
            assert!((field.height_at(x) - 550.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mountain_peaks_at_center() {
        let field = build_preset(TerrainPreset::Mountain);
        // Smaller y = higher ground.
        let peak = field.height_at(550.0);
        assert!(peak < field.height_at(100.0));
        assert!(peak < field.height_at(1000.0));
        assert!((peak - 260.0).abs() < 10.0);
    }

    #[test]
    fn test_control_points_strictly_increasing_x() {
        for preset in [
            TerrainPreset::Flat,
            TerrainPreset::Hills,
            TerrainPreset::Mountain,
            TerrainPreset::Valley,
        ] {
            let pts = preset_control_points(preset);
            for w in pts.windows(2) {
                assert!(w[0].0 < w[1].0, "{preset:?} control points not ordered");
            }
        }
    }
}
