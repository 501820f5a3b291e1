use bevy_ecs::message::Messages;
use bevy_ecs::world::World;

use crate::config::GameConfig;
use crate::ecs::events::{BuildingFinished, ResourceDelivered};
use crate::ecs::systems::{BuildingVisuals, publish_strategy_events};
use crate::error::PlacementError;
use crate::id::BuildingId;
use crate::minion::{Minion, MinionController, MinionHandle, Orders, StrategyCtx, WorkingStrategy};
use crate::model::{Base, Blueprint, BuildingState, WorldPoint};
use crate::visuals::Visuals;

use super::PlayerCommand;

/// Place `blueprint` on the hexagon nearest to `point`.
///
/// Checks the pooled warehouse stock and the footprint, then leaves the new
/// building waiting for a minion. Its model appears as a ghost and is
/// retagged by `sync_building_visuals` from then on.
pub fn place_building(world: &mut World, blueprint: Blueprint, point: WorldPoint) -> Result<BuildingId, PlacementError> {
    let id = {
        let mut base = world.resource_mut::<Base>();
        let anchor = base.map().coord_at(point);
        base.place(blueprint, anchor)?
    };
    acquire_ghost_model(world, id);
    Ok(id)
}

fn acquire_ghost_model(world: &mut World, id: BuildingId) {
    let Some(mut visuals) = world.remove_resource::<Visuals>() else {
        return;
    };
    let placed = {
        let base = world.resource::<Base>();
        base.building(id).cloned().map(|b| (b, base.map().hex_size()))
    };
    if let Some((building, hex_size)) = placed {
        world
            .get_resource_or_insert_with(BuildingVisuals::default)
            .acquire(visuals.backend_mut(), &building, hex_size, BuildingState::Prebuild);
    }
    world.insert_resource(visuals);
}

/// Exclusive system that drains all pending `PlayerCommand` messages and
/// applies them.
///
/// Runs in `FramePhase::PreUpdate`, after message rotation.
pub fn apply_player_commands(world: &mut World) {
    let commands: Vec<PlayerCommand> = {
        let Some(mut messages) = world.get_resource_mut::<Messages<PlayerCommand>>() else {
            return;
        };
        messages.drain().collect()
    };
    if commands.is_empty() {
        return;
    }

    for command in commands {
        match command {
            PlayerCommand::PlaceBuilding { blueprint, point } => {
                match place_building(world, blueprint, point) {
                    Ok(building) => tracing::info!(%building, ?blueprint, "building placed"),
                    Err(err) => tracing::warn!(?blueprint, x = point.x, y = point.y, %err, "placement rejected"),
                }
            }
            PlayerCommand::Build => reassign(world, || Some(WorkingStrategy::build())),
            PlayerCommand::Gather(kind) => reassign(world, || Some(WorkingStrategy::gather(kind))),
            PlayerCommand::Stop => reassign(world, || None),
        }
    }
}

/// Dispose every minion's order and give it the one `make` returns.
fn reassign(world: &mut World, make: impl Fn() -> Option<WorkingStrategy>) {
    let Some(config) = world.get_resource::<GameConfig>().cloned() else {
        return;
    };
    let Some(mut base) = world.remove_resource::<Base>() else {
        tracing::error!("base missing while applying player command");
        return;
    };
    let Some(mut visuals) = world.remove_resource::<Visuals>() else {
        world.insert_resource(base);
        tracing::error!("visuals missing while applying player command");
        return;
    };

    let mut events = Vec::new();
    let mut query = world.query::<(&mut Minion, &mut MinionController, &mut Orders)>();
    for (mut minion, mut controller, mut orders) in query.iter_mut(world) {
        let mut handle = MinionHandle::new(&mut minion, &mut controller);
        let mut ctx = StrategyCtx {
            base: &mut base,
            visuals: visuals.backend_mut(),
            config: &config,
            events: &mut events,
        };
        match make() {
            Some(strategy) => orders.assign(strategy, &mut handle, &mut ctx),
            None => orders.clear(&mut handle, &mut ctx),
        }
    }

    world.insert_resource(base);
    world.insert_resource(visuals);
    if !events.is_empty() {
        let (delivered, finished) = publish_strategy_events(events);
        if let Some(mut messages) = world.get_resource_mut::<Messages<ResourceDelivered>>() {
            messages.write_batch(delivered);
        }
        if let Some(mut messages) = world.get_resource_mut::<Messages<BuildingFinished>>() {
            messages.write_batch(finished);
        }
    }
}
