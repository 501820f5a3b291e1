use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{DEFAULT_NEIGHBOR_DISTANCE, ResourceLedger};

/// Gameplay tuning shared by movement, strategies, and the starter layout.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World units a minion walks per reference frame.
    pub minion_speed: f64,
    /// Frame length the speed is expressed against.
    pub reference_frame_ms: f64,
    /// Distance under which a waypoint counts as reached.
    pub arrival_epsilon: f64,
    /// How often each minion's strategy re-evaluates.
    pub decision_interval_ms: f64,
    pub harvest_ms: f64,
    /// Work animation replays during one harvest.
    pub harvest_swings: u32,
    pub harvest_amount: u32,
    /// Largest package a builder hauls in one trip.
    pub max_carry: u32,
    pub neighbor_distance: f64,
    /// Stock of the starter warehouse.
    pub starting_stock: ResourceLedger,
    pub minion_count: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            minion_speed: 0.06,
            reference_frame_ms: 16.67,
            arrival_epsilon: 0.05,
            decision_interval_ms: 250.0,
            harvest_ms: 2000.0,
            harvest_swings: 4,
            harvest_amount: 10,
            max_carry: 10,
            neighbor_distance: DEFAULT_NEIGHBOR_DISTANCE,
            starting_stock: ResourceLedger::new(50, 30, 10),
            minion_count: 3,
        }
    }
}

impl GameConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Frame time relative to the reference frame.
    pub fn frame_ratio(&self, delta_ms: f64) -> f64 {
        if self.reference_frame_ms <= 0.0 {
            return 1.0;
        }
        delta_ms / self.reference_frame_ms
    }
}
