//! Procedural starfield: a deterministic cloud of points scattered above the
//! horizon, faded in and out by the environment.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generation settings for [`Starfield::generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldParams {
    pub count: u32,
    /// Edge length of the horizontal square the stars cover. Heights span
    /// `[0, spread / 2)`.
    pub spread: f32,
    /// Point size in pixels.
    pub point_size: f32,
    pub seed: u64,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: 10_000,
            spread: 15_000.0,
            point_size: 2.0,
            seed: 0x5eed_57a2,
        }
    }
}

/// One star, uploaded as a per-instance attribute.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct StarVertex {
    pub position: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<StarVertex>,
    pub point_size: f32,
    /// Linear RGB.
    pub color: Vec3,
    /// Stars start invisible until the first environment update.
    pub opacity: f32,
}

impl Starfield {
    /// Scatter `params.count` stars. Deterministic for a given seed.
    pub fn generate(params: &StarfieldParams) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let half_height = params.spread * 0.5;
        let stars = (0..params.count)
            .map(|_| {
                let x = (rng.random::<f32>() - 0.5) * params.spread;
                let y = rng.random::<f32>() * half_height;
                let z = (rng.random::<f32>() - 0.5) * params.spread;
                StarVertex {
                    position: [x, y, z],
                }
            })
            .collect();

        Self {
            stars,
            point_size: params.point_size,
            color: Vec3::ONE,
            opacity: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    /// Uniform for the star pass; `viewport` converts point size to clip space.
    pub fn to_uniform(&self, viewport: (u32, u32)) -> StarfieldUniform {
        StarfieldUniform {
            color: self.color.to_array(),
            opacity: self.opacity,
            point_size: self.point_size,
            viewport_width: viewport.0.max(1) as f32,
            viewport_height: viewport.1.max(1) as f32,
            _padding: 0.0,
        }
    }
}

/// GPU-side star block, 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct StarfieldUniform {
    pub color: [f32; 3],
    pub opacity: f32,
    pub point_size: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub _padding: f32,
}

static_assertions::const_assert_eq!(std::mem::size_of::<StarfieldUniform>(), 32);
static_assertions::const_assert_eq!(std::mem::size_of::<StarVertex>(), 12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_count() {
        let field = Starfield::generate(&StarfieldParams::default());
        assert_eq!(field.len(), 10_000);
        assert!(!field.is_empty());
    }

    #[test]
    fn test_stars_inside_volume() {
        let params = StarfieldParams::default();
        let field = Starfield::generate(&params);
        let half = params.spread * 0.5;
        for (i, star) in field.stars.iter().enumerate() {
            let [x, y, z] = star.position;
            assert!((-half..half).contains(&x), "star {i} x = {x}");
            assert!((-half..half).contains(&z), "star {i} z = {z}");
            assert!((0.0..half).contains(&y), "star {i} y = {y}");
        }
    }

    #[test]
    fn test_stars_cover_all_quadrants() {
        let field = Starfield::generate(&StarfieldParams::default());
        let mut quadrants = [0u32; 4];
        for star in &field.stars {
            let [x, _, z] = star.position;
            quadrants[usize::from(x >= 0.0) | (usize::from(z >= 0.0) << 1)] += 1;
        }
        for (i, count) in quadrants.iter().enumerate() {
            assert!(*count > 2000, "quadrant {i} has only {count} stars");
        }
    }

    #[test]
    fn test_same_seed_same_stars() {
        let params = StarfieldParams {
            count: 500,
            ..Default::default()
        };
        let a = Starfield::generate(&params);
        let b = Starfield::generate(&params);
        assert_eq!(a.stars, b.stars);

        let c = Starfield::generate(&StarfieldParams { seed: 9, ..params });
        assert_ne!(a.stars, c.stars);
    }

    #[test]
    fn test_starts_invisible() {
        let field = Starfield::generate(&StarfieldParams {
            count: 1,
            ..Default::default()
        });
        assert_eq!(field.opacity, 0.0);
        assert_eq!(field.to_uniform((0, 0)).viewport_width, 1.0);
    }
}
