use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for island generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapGenConfig {
    /// RNG seed for deterministic generation.
    pub seed: u64,
    /// Outermost ring generated around the origin.
    pub radius: u32,
    /// Rings 0..=land_radius are land.
    pub land_radius: u32,
    /// Rings of beach outside the land.
    pub beach_width: u32,
    /// Rings of shallow water outside the beach; everything beyond is deep.
    pub shallow_width: u32,
    /// Hexagon circumradius in world units.
    pub hex_size: f64,
    /// Chance that a hexagon on or outside the coastline shifts one ring in or out.
    pub coast_jitter: f64,
    pub wood_chance: f64,
    pub rock_chance: f64,
    pub meat_chance: f64,
    /// Chance of a rock deposit on a beach hexagon.
    pub beach_rock_chance: f64,
    pub resource_amount_min: u32,
    pub resource_amount_max: u32,
    /// Wood placed next to the origin if the scatter left none there.
    pub starter_wood: u32,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            radius: 12,
            land_radius: 7,
            beach_width: 1,
            shallow_width: 2,
            hex_size: 1.0,
            coast_jitter: 0.3,
            wood_chance: 0.18,
            rock_chance: 0.08,
            meat_chance: 0.06,
            beach_rock_chance: 0.1,
            resource_amount_min: 30,
            resource_amount_max: 60,
            starter_wood: 40,
        }
    }
}

impl MapGenConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
