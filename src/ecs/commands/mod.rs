pub mod applicator;

use bevy_ecs::message::Message;

use crate::model::{Blueprint, ResourceKind, WorldPoint};

pub use applicator::{apply_player_commands, place_building};

/// A player intent from the HUD or input layer.
///
/// Written via `Messages<PlayerCommand>` (or `send_command`). The
/// applicator in `FramePhase::PreUpdate` drains and applies them in order.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum PlayerCommand {
    /// Place a blueprint at the hexagon under a picked ground point.
    PlaceBuilding { blueprint: Blueprint, point: WorldPoint },
    /// Every minion starts hauling construction material.
    Build,
    /// Every minion starts gathering `kind`.
    Gather(ResourceKind),
    /// Every minion drops its order and idles.
    Stop,
}
