//! Per-frame systems, one module per `FramePhase`.

pub mod buildings;
pub mod movement;
pub mod strategy;
pub mod timers;

use bevy_app::App;

use crate::ecs::events::{BuildingFinished, ResourceDelivered};
use crate::minion::StrategyEvent;

pub use buildings::{BuildingModel, BuildingVisuals, sync_building_visuals};
pub use movement::move_minions;
pub use strategy::run_strategies;
pub use timers::tick_orders;

/// Register every frame system.
pub fn add_frame_systems(app: &mut App) {
    timers::add_timer_systems(app);
    movement::add_movement_systems(app);
    strategy::add_strategy_systems(app);
    buildings::add_building_systems(app);
}

/// Split strategy events into their message types.
pub(crate) fn publish_strategy_events(events: Vec<StrategyEvent>) -> (Vec<ResourceDelivered>, Vec<BuildingFinished>) {
    let mut delivered = Vec::new();
    let mut finished = Vec::new();
    for event in events {
        match event {
            StrategyEvent::ResourceDelivered { anchor, kind, amount } => {
                delivered.push(ResourceDelivered { anchor, kind, amount });
            }
            StrategyEvent::BuildingFinished { building } => {
                finished.push(BuildingFinished { building });
            }
        }
    }
    (delivered, finished)
}
