// terrain.rs - Ground surface queries
//
// The ground is a square centered on the origin. With a non-zero amplitude
// it rolls gently as a product of sines; with zero amplitude it is flat.

use crate::config::TerrainConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    size: f32,
    amplitude: f32,
    frequency: f32,
}

impl Terrain {
    pub fn new(config: &TerrainConfig) -> Self {
        Self {
            size: config.size,
            amplitude: config.amplitude,
            frequency: config.frequency,
        }
    }

    /// Whether (x, z) lies on the ground square
    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let half = self.size * 0.5;
        x.abs() <= half && z.abs() <= half
    }

    /// Ground height at (x, z); 0.0 off the ground square
    #[inline]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        if !self.contains(x, z) { return 0.0; }
        self.amplitude * (x * self.frequency).sin() * (z * self.frequency).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn terrain(amplitude: f32) -> Terrain {
        Terrain::new(&TerrainConfig { size: 20.0, amplitude, frequency: 0.5, color: "#000".into() })
    }

    #[test]
    fn flat_terrain_is_zero_everywhere() {
        let t = terrain(0.0);
        assert_eq!(t.height_at(3.0, -4.0), 0.0);
        assert_eq!(t.height_at(-9.9, 9.9), 0.0);
    }

    #[test]
    fn rolling_terrain_is_bounded() {
        let t = terrain(0.8);
        assert_relative_eq!(t.height_at(std::f32::consts::PI, 0.0), 0.8, epsilon = 1e-5);
        for i in -10..=10 {
            let h = t.height_at(i as f32, i as f32 * 0.7);
            assert!(h.abs() <= 0.8 + 1e-6);
        }
    }

    #[test]
    fn outside_is_flat() {
        let t = terrain(0.8);
        assert!(!t.contains(10.5, 0.0));
        assert_eq!(t.height_at(10.5, 0.0), 0.0);
    }
}
