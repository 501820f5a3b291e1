pub mod base;
pub mod building;
pub mod geometry;
pub mod hexagon;
pub mod map;
pub mod resource;

pub use base::{Base, DEFAULT_NEIGHBOR_DISTANCE};
pub use building::{Blueprint, Building, BuildingKind, BuildingShape, BuildingState, Delivery};
pub use geometry::{HexCoord, WorldPoint};
pub use hexagon::{Hexagon, ResourceSlot, Terrain};
pub use map::HexMap;
pub use resource::{Package, ResourceKind, ResourceLedger};
