use thiserror::Error;

use crate::id::BuildingId;
use crate::model::{HexCoord, ResourceLedger};

/// Rejected claim on a resource slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("resource slot is already occupied")]
    Occupied,
    #[error("resource slot is depleted")]
    Depleted,
}

/// Invalid operation on a building's construction ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildingError {
    #[error("{0} is already finished")]
    AlreadyFinished(BuildingId),
    #[error("{0} has not been placed on a working site")]
    NotPlaced(BuildingId),
    #[error("{0} does not exist")]
    UnknownBuilding(BuildingId),
}

/// Reasons a blueprint cannot be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("not enough resources, missing {missing:?}")]
    Unaffordable { missing: ResourceLedger },
    #[error("hexagon {0} is not on the map")]
    OffMap(HexCoord),
    #[error("hexagon {0} is not buildable terrain")]
    NotWalkable(HexCoord),
    #[error("hexagon {0} is already taken by another building")]
    Overlaps(HexCoord),
    #[error("footprint does not touch the base")]
    Disconnected,
}

/// Configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
