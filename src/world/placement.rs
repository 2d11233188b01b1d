// placement.rs - Procedural entity placement
//
// Uniform scatter inside a horizontal square centered on the origin.
// Called once per world; the resulting layout never changes.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Tree,
    Bush,
    Bird,
    Orb,
}

/// How the y coordinate of a placed entity is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalRule {
    Fixed(f32),
    /// Uniform in [lo, hi]
    Range(f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vec3,
    /// Animation offset in [0, 2π)
    pub phase: f32,
}

/// Scatter `count` entities of `kind` with x and z uniform in [-extent/2, extent/2].
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    kind: EntityKind,
    count: usize,
    extent: f32,
    height: VerticalRule,
) -> Result<Vec<Entity>> {
    if !extent.is_finite() || extent < 0.0 {
        return Err(WorldError::InvalidPlacement(format!("{kind:?} extent {extent} must be finite and >= 0")));
    }
    if let VerticalRule::Range(lo, hi) = height {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(WorldError::InvalidPlacement(format!("{kind:?} height range {lo}..{hi}")));
        }
    }

    let half = extent * 0.5;
    let entities = (0..count)
        .map(|_| {
            let x = rng.gen_range(-half..=half);
            let z = rng.gen_range(-half..=half);
            let y = match height {
                VerticalRule::Fixed(y) => y,
                VerticalRule::Range(lo, hi) => rng.gen_range(lo..=hi),
            };
            Entity {
                kind,
                position: Vec3::new(x, y, z),
                phase: rng.gen_range(0.0..TAU),
            }
        })
        .collect();

    log::debug!("scattered {count} {kind:?} over extent {extent}");
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn returns_exact_count_within_extent() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(count, extent) in &[(0, 10.0), (1, 0.0), (50, 40.0), (200, 3.5)] {
            let entities = scatter(&mut rng, EntityKind::Tree, count, extent, VerticalRule::Fixed(0.0)).unwrap();
            assert_eq!(entities.len(), count);
            for e in &entities {
                assert!(e.position.x.abs() <= extent / 2.0);
                assert!(e.position.z.abs() <= extent / 2.0);
                assert_eq!(e.position.y, 0.0);
                assert_eq!(e.kind, EntityKind::Tree);
            }
        }
    }

    #[test]
    fn height_range_is_respected() {
        let mut rng = StdRng::seed_from_u64(11);
        let birds = scatter(&mut rng, EntityKind::Bird, 100, 30.0, VerticalRule::Range(6.0, 10.0)).unwrap();
        assert!(birds.iter().all(|b| (6.0..=10.0).contains(&b.position.y)));
        assert!(birds.iter().all(|b| (0.0..TAU).contains(&b.phase)));
    }

    #[test]
    fn same_seed_same_layout() {
        let a = scatter(&mut StdRng::seed_from_u64(3), EntityKind::Bush, 20, 40.0, VerticalRule::Fixed(0.0)).unwrap();
        let b = scatter(&mut StdRng::seed_from_u64(3), EntityKind::Bush, 20, 40.0, VerticalRule::Fixed(0.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(scatter(&mut rng, EntityKind::Orb, 3, -1.0, VerticalRule::Fixed(1.0)).is_err());
        assert!(scatter(&mut rng, EntityKind::Orb, 3, f32::NAN, VerticalRule::Fixed(1.0)).is_err());
        assert!(scatter(&mut rng, EntityKind::Orb, 3, 4.0, VerticalRule::Range(2.0, 1.0)).is_err());
    }
}
