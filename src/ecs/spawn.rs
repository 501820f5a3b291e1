use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::config::GameConfig;
use crate::minion::{Minion, MinionController, Orders};
use crate::model::{Base, HexCoord};
use crate::visuals::{CLIP_IDLE, MINION_ASSET, Visuals};

/// Spawn an idle minion on the walkable hexagon at `coord`, with its visual.
/// Returns `None` if `coord` is not part of the base.
pub fn spawn_minion(world: &mut World, name: impl Into<String>, coord: HexCoord) -> Option<Entity> {
    let (hexagon, center) = {
        let base = world.resource::<Base>();
        let hexagon = base.hex_at(coord)?;
        (hexagon, base.center(hexagon)?)
    };
    let interval = world.resource::<GameConfig>().decision_interval_ms;

    let mut minion = Minion::new(name, hexagon, center);
    if let Some(mut visuals) = world.get_resource_mut::<Visuals>() {
        let backend = visuals.backend_mut();
        let handle = backend.instantiate_asset(MINION_ASSET);
        backend.position_visual(handle, center);
        backend.play_animation(handle, CLIP_IDLE, true, 1.0);
        minion.visual = Some(handle);
    }

    let entity = world
        .spawn((minion, MinionController::new(), Orders::new(interval)))
        .id();
    tracing::debug!(?entity, %coord, "minion spawned");
    Some(entity)
}

/// Spawn `count` minions on the origin hexagon.
pub fn spawn_starter_minions(world: &mut World, count: u32) -> Vec<Entity> {
    (0..count)
        .filter_map(|i| spawn_minion(world, format!("minion-{}", i + 1), HexCoord::ORIGIN))
        .collect()
}
