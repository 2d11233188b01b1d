// prop.rs - Scene props and their per-frame pose
//
// Every placed entity becomes one Prop variant. `Prop::pose` is the single
// dispatch point from static layout to animated pose.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::{BobConfig, FlightConfig};
use crate::sim::{flight_circle, flight_heading, oscillate};
use crate::world::{Entity, EntityKind, Terrain};

/// Shared animation inputs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    pub time: f32,
    pub spin: f32,
    pub flight: (f32, f32),
    pub bob: (f32, f32),
}

impl Motion {
    pub fn new(time: f32, spin: f32, flight: &FlightConfig, bob: &BobConfig) -> Self {
        Self {
            time,
            spin,
            flight: (flight.radius, flight.speed),
            bob: (bob.amplitude, bob.frequency),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    Tree { position: Vec3, yaw: f32, scale: f32 },
    Bush { position: Vec3, yaw: f32, scale: f32 },
    Bird { anchor: Vec3, phase: f32 },
    /// `media` indexes the configured media table
    Orb { position: Vec3, phase: f32, media: usize },
}

impl Prop {
    /// Build a prop from a placed entity. Vegetation rests on the terrain;
    /// orbs are numbered in placement order.
    pub fn from_entity(entity: &Entity, terrain: &Terrain, media: usize) -> Self {
        let Entity { kind, position, phase } = *entity;
        // Phase doubles as a stable per-entity variation
        let variation = phase / TAU;
        let grounded = position + Vec3::Y * terrain.height_at(position.x, position.z);
        match kind {
            EntityKind::Tree => Prop::Tree { position: grounded, yaw: phase, scale: 0.8 + 0.6 * variation },
            EntityKind::Bush => Prop::Bush { position: grounded, yaw: phase, scale: 0.5 + 0.5 * variation },
            EntityKind::Bird => Prop::Bird { anchor: position, phase },
            EntityKind::Orb => Prop::Orb { position, phase, media },
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Prop::Tree { .. } => EntityKind::Tree,
            Prop::Bush { .. } => EntityKind::Bush,
            Prop::Bird { .. } => EntityKind::Bird,
            Prop::Orb { .. } => EntityKind::Orb,
        }
    }

    pub fn pose(&self, motion: &Motion) -> Pose {
        match *self {
            Prop::Tree { position, yaw, scale } | Prop::Bush { position, yaw, scale } => {
                Pose { position, rotation_y: yaw, scale }
            }
            Prop::Bird { anchor, phase } => {
                let (radius, speed) = motion.flight;
                Pose {
                    position: flight_circle(anchor, motion.time, phase, radius, speed),
                    rotation_y: flight_heading(motion.time, phase, speed),
                    scale: 1.0,
                }
            }
            Prop::Orb { position, phase, .. } => {
                let (amplitude, frequency) = motion.bob;
                Pose {
                    position: position + Vec3::Y * oscillate(motion.time, phase, amplitude, frequency),
                    rotation_y: motion.spin,
                    scale: 1.0,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use approx::assert_abs_diff_eq;

    fn motion(time: f32) -> Motion {
        Motion::new(time, 0.7, &FlightConfig::default(), &BobConfig::default())
    }

    fn flat() -> Terrain {
        Terrain::new(&TerrainConfig::default())
    }

    fn entity(kind: EntityKind, position: Vec3, phase: f32) -> Entity {
        Entity { kind, position, phase }
    }

    #[test]
    fn vegetation_is_static() {
        let tree = Prop::from_entity(&entity(EntityKind::Tree, Vec3::new(1.0, 0.0, 2.0), 1.0), &flat(), 0);
        assert_eq!(tree.kind(), EntityKind::Tree);
        assert_eq!(tree.pose(&motion(0.0)), tree.pose(&motion(42.0)));
    }

    #[test]
    fn vegetation_rests_on_rolling_terrain() {
        let terrain = Terrain::new(&TerrainConfig { amplitude: 1.0, frequency: 0.5, ..TerrainConfig::default() });
        let bush = Prop::from_entity(&entity(EntityKind::Bush, Vec3::new(std::f32::consts::PI, 0.0, 0.0), 0.0), &terrain, 0);
        assert_abs_diff_eq!(bush.pose(&motion(0.0)).position.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn orb_bobs_around_base() {
        let base = Vec3::new(0.0, 1.5, -3.0);
        let orb = Prop::from_entity(&entity(EntityKind::Orb, base, 0.3), &flat(), 2);
        assert!(matches!(orb, Prop::Orb { media: 2, .. }));
        for i in 0..50 {
            let pose = orb.pose(&motion(i as f32 * 0.1));
            assert_abs_diff_eq!(pose.position.x, base.x);
            assert!((pose.position.y - base.y).abs() <= 0.2 + 1e-6);
            assert_eq!(pose.rotation_y, 0.7);
        }
    }

    #[test]
    fn bird_circles_anchor() {
        let anchor = Vec3::new(4.0, 8.0, 4.0);
        let bird = Prop::from_entity(&entity(EntityKind::Bird, anchor, 1.2), &flat(), 0);
        let a = bird.pose(&motion(1.0)).position;
        let b = bird.pose(&motion(2.0)).position;
        assert_ne!(a, b);
        assert_abs_diff_eq!(a.distance(anchor), FlightConfig::default().radius, epsilon = 1e-5);
        assert_eq!(a.y, anchor.y);
    }

    #[test]
    fn same_time_same_pose() {
        let bird = Prop::Bird { anchor: Vec3::ZERO, phase: 0.5 };
        assert_eq!(bird.pose(&motion(3.3)), bird.pose(&motion(3.3)));
    }
}
