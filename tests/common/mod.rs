#![allow(dead_code)]

use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_ecs::schedule::ExecutorKind;

use hex_colony::ecs::{build_app_with_base, spawn_minion};
use hex_colony::minion::{Minion, Orders};
use hex_colony::model::{DEFAULT_NEIGHBOR_DISTANCE, Terrain};
use hex_colony::worldgen::build_starter_base;
use hex_colony::{
    Base, Blueprint, BuildingId, BuildingShape, GameConfig, HexCoord, HexMap, Hexagon, IdGenerator, ResourceKind,
    ResourceLedger,
};

pub const WOOD_AT: HexCoord = HexCoord { q: 0, r: 1 };

/// Land disc of radius 5 with the given resource slots.
pub fn land_map(resources: &[(HexCoord, ResourceKind, u32)]) -> HexMap {
    let mut map = HexMap::new(1.0);
    let mut ids = IdGenerator::new();
    for coord in HexCoord::ORIGIN.spiral(5) {
        let mut hexagon = Hexagon::new(ids.next_hex(), coord, 1.0, Terrain::Land);
        if let Some(&(_, kind, amount)) = resources.iter().find(|(c, _, _)| *c == coord) {
            hexagon = hexagon.with_resource(kind, amount);
        }
        map.insert(hexagon);
    }
    map
}

/// Starter flower and warehouse over `land_map`. Returns the warehouse id.
pub fn starter_base(resources: &[(HexCoord, ResourceKind, u32)], stock: ResourceLedger) -> (Base, BuildingId) {
    let layout = build_starter_base(land_map(resources), DEFAULT_NEIGHBOR_DISTANCE, stock).unwrap();
    (layout.base, layout.warehouse)
}

/// A finished Triangle at (-4,0) that does not touch the starter layout.
pub const ISLAND: HexCoord = HexCoord { q: -4, r: 0 };

pub fn add_island(base: &mut Base) -> BuildingId {
    base.add_finished(
        Blueprint::Extension(BuildingShape::Triangle),
        ISLAND,
        ResourceLedger::default(),
    )
    .unwrap()
}

pub fn fast_config() -> GameConfig {
    GameConfig {
        minion_speed: 0.5,
        harvest_ms: 100.0,
        harvest_swings: 2,
        decision_interval_ms: 16.67,
        ..GameConfig::default()
    }
}

/// App over `base` with one minion per coordinate.
pub fn test_app(base: Base, config: GameConfig, minions: &[HexCoord]) -> (App, Vec<Entity>) {
    let mut app = build_app_with_base(base, config, ExecutorKind::SingleThreaded);
    let entities = minions
        .iter()
        .enumerate()
        .map(|(i, &coord)| spawn_minion(app.world_mut(), format!("worker-{i}"), coord).unwrap())
        .collect();
    (app, entities)
}

pub fn base(app: &App) -> &Base {
    app.world().resource::<Base>()
}

pub fn warehouse_stock(app: &App, warehouse: BuildingId, kind: ResourceKind) -> u32 {
    base(app)
        .building(warehouse)
        .and_then(|w| w.stock())
        .map_or(0, |s| s.get(kind))
}

pub fn slot_amount(app: &App, coord: HexCoord) -> u32 {
    let base = base(app);
    base.hex_at(coord)
        .and_then(|id| base.slot(id))
        .map_or(0, |slot| slot.amount())
}

pub fn state_of(app: &App, entity: Entity) -> Option<&'static str> {
    app.world()
        .get::<Orders>(entity)
        .and_then(Orders::strategy)
        .map(|s| s.state_name())
}

pub fn minion(app: &App, entity: Entity) -> &Minion {
    app.world().get::<Minion>(entity).unwrap()
}
