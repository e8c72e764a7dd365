//! HeightField: the destructible ground as evenly spaced elevation samples.
//!
//! Screen coordinates throughout: y grows downward, so "raising" a sample's
//! y value digs the ground lower. Samples cover [0, width] at fixed spacing;
//! height anywhere in between comes from linear interpolation, so the
//! surface is continuous by construction.

use rand::Rng;

use barrage_core::constants::*;
use barrage_core::types::Position;

/// Parameters for procedural generation.
#[derive(Debug, Clone)]
pub struct GenParams {
    pub samples: usize,
    pub width: f64,
    /// Starting ground level for the random walk.
    pub base_level: f64,
    /// Band the walk is confined to.
    pub walk_min_y: f64,
    pub walk_max_y: f64,
    /// Peak-to-peak amplitude of one walk step.
    pub roughness: f64,
    pub smoothing_passes: u32,
    /// Hard band any sample is clamped into after mutation.
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            samples: TERRAIN_SAMPLES,
            width: WORLD_WIDTH,
            base_level: BASE_TERRAIN_LEVEL,
            walk_min_y: WALK_MIN_Y,
            walk_max_y: WALK_MAX_Y,
            roughness: TERRAIN_ROUGHNESS,
            smoothing_passes: SMOOTHING_PASSES,
            min_y: TERRAIN_MIN_Y,
            max_y: TERRAIN_MAX_Y,
        }
    }
}

/// The ground: elevation samples at fixed horizontal spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    spacing: f64,
    heights: Vec<f64>,
    /// Hard clamp band for deformation.
    min_y: f64,
    max_y: f64,
}

impl HeightField {
    /// Build from raw sample heights. Panics if fewer than 2 samples
    /// (a height field needs at least one segment).
    pub fn from_heights(width: f64, heights: Vec<f64>, min_y: f64, max_y: f64) -> Self {
        assert!(heights.len() >= 2, "height field needs at least 2 samples");
        let spacing = width / (heights.len() - 1) as f64;
        Self {
            spacing,
            heights,
            min_y,
            max_y,
        }
    }

    /// Generate random terrain: bounded random walk plus smoothing.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &GenParams) -> Self {
        let mut heights = Vec::with_capacity(params.samples);
        let mut level = params.base_level;
        for _ in 0..params.samples {
            heights.push(level);
            let step = (rng.gen::<f64>() - 0.5) * params.roughness;
            level = (level + step).clamp(params.walk_min_y, params.walk_max_y);
        }

        // Neighbor-averaging passes. In-place and sequential: earlier
        // samples in a pass already hold their smoothed value, which is
        // fine — the goal is plausible ground, not a strict box filter.
        for _ in 0..params.smoothing_passes {
            for i in 1..heights.len() - 1 {
                heights[i] = (heights[i - 1] + heights[i] + heights[i + 1]) / 3.0;
            }
        }

        Self::from_heights(params.width, heights, params.min_y, params.max_y)
    }

    /// Resample a control-point profile to evenly spaced samples.
    ///
    /// Control points must have strictly increasing x. Samples beyond the
    /// last control point continue along the last segment's slope.
    pub fn from_control_points(
        points: &[(f64, f64)],
        samples: usize,
        width: f64,
        min_y: f64,
        max_y: f64,
    ) -> Self {
        assert!(points.len() >= 2, "profile needs at least 2 control points");
        let spacing = width / (samples - 1) as f64;
        let mut heights = Vec::with_capacity(samples);

        for i in 0..samples {
            let x = i as f64 * spacing;

            // Find the segment this x falls in; past the end, keep the
            // last segment and let the lerp extrapolate.
            let mut j = 0;
            while j < points.len() - 2 && points[j + 1].0 < x {
                j += 1;
            }
            let (x1, y1) = points[j];
            let (x2, y2) = points[j + 1];
            let span = x2 - x1;
            let t = if span != 0.0 { (x - x1) / span } else { 0.0 };
            let y = y1 + (y2 - y1) * t;
            heights.push(y.clamp(min_y, max_y));
        }

        Self::from_heights(width, heights, min_y, max_y)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Horizontal distance between adjacent samples.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// World width covered by the field.
    pub fn width(&self) -> f64 {
        self.spacing * (self.heights.len() - 1) as f64
    }

    /// The x coordinate of sample `i`.
    pub fn sample_x(&self, i: usize) -> f64 {
        i as f64 * self.spacing
    }

    /// Raw sample height.
    pub fn sample_y(&self, i: usize) -> f64 {
        self.heights[i]
    }

    /// Ground height at an arbitrary x. Queries outside [0, width]
    /// clamp to the nearest edge sample rather than fail.
    pub fn height_at(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, self.width());
        let index = ((x / self.spacing) as usize).min(self.heights.len() - 2);

        let x1 = self.sample_x(index);
        let y1 = self.heights[index];
        let y2 = self.heights[index + 1];

        y1 + (x - x1) * (y2 - y1) / self.spacing
    }

    /// Carve a crater centered at `impact_x`: every sample within
    /// `radius` is pushed down by a cosine falloff of `strength`,
    /// then clamped to the valid band. Zero radius/strength is a no-op,
    /// and samples farther than `radius` are never touched.
    pub fn deform(&mut self, impact_x: f64, radius: f64, strength: f64) {
        if radius <= 0.0 || strength <= 0.0 {
            return;
        }

        for i in 0..self.heights.len() {
            let dist = (self.sample_x(i) - impact_x).abs();
            if dist < radius {
                // Smooth lip: full strength at the center, zero at the rim.
                let drop = (dist / radius * std::f64::consts::FRAC_PI_2).cos() * strength;
                self.heights[i] = (self.heights[i] + drop).clamp(self.min_y, self.max_y);
            }
        }
    }

    /// Terrain polyline for rendering/snapshots.
    pub fn points(&self) -> Vec<Position> {
        self.heights
            .iter()
            .enumerate()
            .map(|(i, &y)| Position::new(self.sample_x(i), y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat(level: f64) -> HeightField {
        HeightField::from_heights(
            WORLD_WIDTH,
            vec![level; TERRAIN_SAMPLES],
            TERRAIN_MIN_Y,
            TERRAIN_MAX_Y,
        )
    }

    #[test]
    fn test_generate_within_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let params = GenParams::default();
        let field = HeightField::generate(&mut rng, &params);

        assert_eq!(field.len(), params.samples);
        for i in 0..field.len() {
            let y = field.sample_y(i);
            assert!(
                (params.walk_min_y..=params.walk_max_y).contains(&y),
                "sample {i} = {y} escaped the walk band"
            );
        }
    }

    #[test]
    fn test_generate_deterministic_per_seed() {
        let params = GenParams::default();
        let a = HeightField::generate(&mut ChaCha8Rng::seed_from_u64(3), &params);
        let b = HeightField::generate(&mut ChaCha8Rng::seed_from_u64(3), &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_height_continuous_at_midpoints() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let field = HeightField::generate(&mut rng, &GenParams::default());

        for i in 0..field.len() - 1 {
            let mid_x = (field.sample_x(i) + field.sample_x(i + 1)) / 2.0;
            let expected = (field.sample_y(i) + field.sample_y(i + 1)) / 2.0;
            assert!(
                (field.height_at(mid_x) - expected).abs() < 1e-9,
                "midpoint of segment {i} not the average of its endpoints"
            );
        }
    }

    #[test]
    fn test_height_query_clamps_out_of_bounds() {
        let field = flat(550.0);
        assert_eq!(field.height_at(-100.0), field.sample_y(0));
        assert_eq!(field.height_at(field.width() + 100.0), 550.0);
    }

    #[test]
    fn test_deform_is_local() {
        let mut field = flat(550.0);
        let before = field.clone();
        field.deform(500.0, 40.0, 18.0);

        for i in 0..field.len() {
            let dist = (field.sample_x(i) - 500.0).abs();
            if dist >= 40.0 {
                assert_eq!(
                    field.sample_y(i),
                    before.sample_y(i),
                    "sample {i} outside the radius changed"
                );
            } else {
                assert!(
                    field.sample_y(i) > before.sample_y(i),
                    "sample {i} inside the radius did not drop"
                );
            }
        }
    }

    #[test]
    fn test_deform_deepest_at_center() {
        let mut field = flat(550.0);
        field.deform(550.0, 44.0, 18.0);
        // x = 550 is exactly sample 50 at default spacing (11.0).
        let center = field.height_at(550.0);
        let rim = field.height_at(550.0 - 33.0);
        assert!(center > rim, "crater must be deepest at the impact point");
        assert!((center - (550.0 + 18.0)).abs() < 1e-9);
    }

    #[test]
    fn test_deform_clamps_to_band() {
        let mut field = flat(TERRAIN_MAX_Y - 1.0);
        for _ in 0..100 {
            field.deform(550.0, 60.0, 18.0);
        }
        for i in 0..field.len() {
            assert!(field.sample_y(i) <= TERRAIN_MAX_Y);
        }
    }

    #[test]
    fn test_deform_zero_is_noop() {
        let mut field = flat(550.0);
        let before = field.clone();
        field.deform(500.0, 0.0, 18.0);
        field.deform(500.0, 40.0, 0.0);
        assert_eq!(field, before);
    }

    #[test]
    fn test_from_control_points_resamples() {
        // A single ramp from (0, 500) to (1100, 560).
        let field = HeightField::from_control_points(
            &[(0.0, 500.0), (1100.0, 560.0)],
            TERRAIN_SAMPLES,
            WORLD_WIDTH,
            TERRAIN_MIN_Y,
            TERRAIN_MAX_Y,
        );
        assert!((field.height_at(0.0) - 500.0).abs() < 1e-9);
        assert!((field.height_at(550.0) - 530.0).abs() < 1e-9);
        assert!((field.height_at(1100.0) - 560.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_control_points_extrapolates_last_slope() {
        // Control points stop short of the world edge; the tail keeps
        // the last segment's slope (then clamps to the band).
        let field = HeightField::from_control_points(
            &[(0.0, 500.0), (550.0, 500.0), (825.0, 520.0)],
            TERRAIN_SAMPLES,
            WORLD_WIDTH,
            TERRAIN_MIN_Y,
            TERRAIN_MAX_Y,
        );
        // Slope past x=825 is 20/275 per unit x.
        let expected = 520.0 + (1100.0 - 825.0) * (20.0 / 275.0);
        assert!((field.height_at(1100.0) - expected).abs() < 1e-6);
    }
}
