// config.rs - World configuration table
//
// Loaded once when the world is created and never mutated afterwards.
// Top-level sections missing from a JSON override keep their defaults.

use std::sync::OnceLock;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};
use crate::world::VerticalRule;

// Sample memories: (embedded media id, orb color)
const SAMPLE_MEDIA: &[(&str, &str)] = &[
    ("aqz-KE-bpKQ", "#ffb3c6"),
    ("eRsGyueVLvQ", "#a0c4ff"),
    ("YE7VzlLtp-4", "#caffbf"),
    ("TLkA0RELQ1g", "#fdffb6"),
    ("WhWc3b3KhnY", "#bdb2ff"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub count: usize,
    pub extent: f32,
    pub height: VerticalRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub radius: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BobConfig {
    pub amplitude: f32,
    pub frequency: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub position: Vec3,
    /// Viewer distance below which walking into the portal enters the world
    pub entry_threshold: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub size: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub trees: PlacementConfig,
    pub bushes: PlacementConfig,
    pub birds: PlacementConfig,
    /// Orb count is taken from `media`; `count` is ignored here
    pub orbs: PlacementConfig,
    pub flight: FlightConfig,
    pub bob: BobConfig,
    /// Radians per second
    pub spin_rate: f32,
    pub portal: PortalConfig,
    pub activation_radius: f32,
    pub terrain: TerrainConfig,
    pub media: Vec<MediaItem>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self { count: 0, extent: 40.0, height: VerticalRule::Fixed(0.0) }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self { radius: 2.0, speed: 0.5 }
    }
}

impl Default for BobConfig {
    fn default() -> Self {
        Self { amplitude: 0.2, frequency: 1.5 }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self { position: Vec3::new(0.0, 0.0, -5.0), entry_threshold: 1.0 }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self { size: 60.0, amplitude: 0.0, frequency: 0.15, color: "#6a994e".into() }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            trees: PlacementConfig { count: 40, extent: 40.0, height: VerticalRule::Fixed(0.0) },
            bushes: PlacementConfig { count: 60, extent: 40.0, height: VerticalRule::Fixed(0.0) },
            birds: PlacementConfig { count: 12, extent: 30.0, height: VerticalRule::Range(6.0, 10.0) },
            orbs: PlacementConfig { count: 0, extent: 16.0, height: VerticalRule::Range(1.2, 2.0) },
            flight: FlightConfig::default(),
            bob: BobConfig::default(),
            spin_rate: 0.5,
            portal: PortalConfig::default(),
            activation_radius: 1.5,
            terrain: TerrainConfig::default(),
            media: SAMPLE_MEDIA
                .iter()
                .map(|&(id, color)| MediaItem { id: id.into(), color: color.into() })
                .collect(),
        }
    }
}

impl WorldConfig {
    /// Shared default table, built on first use
    pub fn defaults() -> &'static WorldConfig {
        static DEFAULTS: OnceLock<WorldConfig> = OnceLock::new();
        DEFAULTS.get_or_init(WorldConfig::default)
    }

    /// Parse a JSON override; missing sections keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.portal.entry_threshold > 0.0) {
            return Err(WorldError::Config("portal entry threshold must be positive".into()));
        }
        if !(self.activation_radius > 0.0) {
            return Err(WorldError::Config("activation radius must be positive".into()));
        }
        if !(self.terrain.size > 0.0) {
            return Err(WorldError::Config("terrain size must be positive".into()));
        }
        for (name, placement) in [("trees", &self.trees), ("bushes", &self.bushes), ("birds", &self.birds), ("orbs", &self.orbs)] {
            if !placement.extent.is_finite() || placement.extent < 0.0 {
                return Err(WorldError::Config(format!("{name} extent must be finite and >= 0")));
            }
            match placement.height {
                VerticalRule::Fixed(y) if !y.is_finite() => {
                    return Err(WorldError::Config(format!("{name} height must be finite")));
                }
                VerticalRule::Range(lo, hi) if !lo.is_finite() || !hi.is_finite() || lo > hi => {
                    return Err(WorldError::Config(format!("{name} height range {lo}..{hi} must be finite and ordered")));
                }
                _ => {}
            }
        }
        let animation = [
            ("flight radius", self.flight.radius),
            ("flight speed", self.flight.speed),
            ("bob amplitude", self.bob.amplitude),
            ("bob frequency", self.bob.frequency),
            ("spin rate", self.spin_rate),
        ];
        if let Some((name, _)) = animation.iter().find(|(_, value)| !value.is_finite()) {
            return Err(WorldError::Config(format!("{name} must be finite")));
        }
        if !self.portal.position.is_finite() {
            return Err(WorldError::Config("portal position must be finite".into()));
        }
        if self.media.iter().any(|m| m.id.trim().is_empty()) {
            return Err(WorldError::Config("media ids must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WorldConfig::defaults();
        assert!(config.validate().is_ok());
        assert_eq!(config.media.len(), SAMPLE_MEDIA.len());
        assert_eq!(config.portal.position, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(config.bob.amplitude, 0.2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WorldConfig::from_json(r#"{ "activation_radius": 3.0, "trees": { "count": 5 } }"#)
            .unwrap();
        assert_eq!(config.activation_radius, 3.0);
        assert_eq!(config.trees.count, 5);
        assert_eq!(config.bushes.count, 60);
        assert_eq!(config.media.len(), SAMPLE_MEDIA.len());
    }

    #[test]
    fn vertical_rule_from_json() {
        let config = WorldConfig::from_json(r#"{ "birds": { "height": { "range": [2.0, 3.0] } } }"#)
            .unwrap();
        assert_eq!(config.birds.height, VerticalRule::Range(2.0, 3.0));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            WorldConfig::from_json(r#"{ "activation_radius": 0.0 }"#),
            Err(WorldError::Config(_))
        ));
        assert!(matches!(
            WorldConfig::from_json(r##"{ "media": [{ "id": " ", "color": "#fff" }] }"##),
            Err(WorldError::Config(_))
        ));
        assert!(matches!(WorldConfig::from_json("not json"), Err(WorldError::ConfigParse(_))));
    }

    #[test]
    fn rejects_inverted_height_range() {
        let err = WorldConfig::from_json(r#"{ "birds": { "height": { "range": [3.0, 2.0] } } }"#).unwrap_err();
        assert!(matches!(err, WorldError::Config(ref m) if m.contains("birds")));

        let mut config = WorldConfig::default();
        config.orbs.height = VerticalRule::Range(f32::NAN, 2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_animation() {
        let mut config = WorldConfig::default();
        config.bob.frequency = f32::INFINITY;
        assert!(matches!(config.validate(), Err(WorldError::Config(_))));

        let mut config = WorldConfig::default();
        config.flight.radius = f32::NAN;
        assert!(config.validate().is_err());
    }
}
