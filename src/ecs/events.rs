use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

use crate::id::{BuildingId, HexId};
use crate::model::{ResourceKind, WorldPoint};

/// A minion reached the last waypoint of its route.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct MinionArrived {
    pub entity: Entity,
    pub hexagon: HexId,
}

/// A harvested package reached a warehouse. `anchor` is where the HUD counter
/// animation should start.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ResourceDelivered {
    pub anchor: WorldPoint,
    pub kind: ResourceKind,
    pub amount: u32,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingFinished {
    pub building: BuildingId,
}
