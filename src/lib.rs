pub mod config;
pub mod ecs;
pub mod error;
pub mod id;
pub mod minion;
pub mod model;
pub mod timer;
pub mod visuals;
pub mod worldgen;

#[cfg(test)]
mod testutil;

pub use config::GameConfig;
pub use error::{BuildingError, ConfigError, PlacementError, SlotError};
pub use id::{BuildingId, HexId, IdGenerator};
pub use model::{
    Base, Blueprint, Building, BuildingShape, BuildingState, HexCoord, HexMap, Hexagon, Package,
    ResourceKind, ResourceLedger, Terrain, WorldPoint,
};
pub use worldgen::MapGenConfig;
