use crate::config::GameConfig;
use crate::id::{BuildingId, HexId, IdGenerator};
use crate::minion::{Minion, MinionController, MinionHandle, StrategyCtx, StrategyEvent, WorkingStrategy};
use crate::model::*;
use crate::visuals::{HeadlessVisuals, MINION_ASSET, VisualBackend};
use crate::worldgen::build_starter_base;

// ---------------------------------------------------------------------------
// Base fixtures
// ---------------------------------------------------------------------------

/// Land disc of `radius` around the origin with the given resource slots.
pub fn land_map(radius: u32, resources: &[(HexCoord, ResourceKind, u32)]) -> HexMap {
    let mut map = HexMap::new(1.0);
    let mut ids = IdGenerator::new();
    for coord in HexCoord::ORIGIN.spiral(radius) {
        let mut hexagon = Hexagon::new(ids.next_hex(), coord, 1.0, Terrain::Land);
        if let Some(&(_, kind, amount)) = resources.iter().find(|(c, _, _)| *c == coord) {
            hexagon = hexagon.with_resource(kind, amount);
        }
        map.insert(hexagon);
    }
    map
}

/// Flower at the origin plus a warehouse at (2,0) holding `stock`.
pub fn starter_base(
    resources: &[(HexCoord, ResourceKind, u32)],
    stock: ResourceLedger,
) -> (Base, BuildingId) {
    let map = land_map(5, resources);
    let layout = build_starter_base(map, DEFAULT_NEIGHBOR_DISTANCE, stock)
        .unwrap_or_else(|err| panic!("starter layout failed: {err}"));
    (layout.base, layout.warehouse)
}

/// Fast settings so strategy tests finish in a few hundred frames.
pub fn fast_config() -> GameConfig {
    GameConfig {
        minion_speed: 0.5,
        harvest_ms: 100.0,
        harvest_swings: 2,
        decision_interval_ms: 16.67,
        ..GameConfig::default()
    }
}

/// `stock(kind) + received(kind) + incoming(kind)` for one warehouse and
/// one building.
pub fn ledger_sum(base: &Base, warehouse: BuildingId, building: BuildingId, kind: ResourceKind) -> u32 {
    let stock = base
        .building(warehouse)
        .and_then(|w| w.stock())
        .map_or(0, |s| s.get(kind));
    let b = base.building(building).unwrap_or_else(|| panic!("{building} missing"));
    stock + b.received().get(kind) + b.incoming().get(kind)
}

// ---------------------------------------------------------------------------
// Strategy harness
// ---------------------------------------------------------------------------

/// Drives strategies without an ECS world, in the same order the frame
/// schedule does: timers, movement, arrivals, decisions.
pub struct StrategyHarness {
    pub base: Base,
    pub visuals: HeadlessVisuals,
    pub config: GameConfig,
    pub events: Vec<StrategyEvent>,
    pub minions: Vec<(Minion, MinionController)>,
}

impl StrategyHarness {
    pub fn new(base: Base, config: GameConfig) -> Self {
        Self {
            base,
            visuals: HeadlessVisuals::new(),
            config,
            events: Vec::new(),
            minions: Vec::new(),
        }
    }

    pub fn add_minion(&mut self, at: HexCoord) -> usize {
        let hexagon = self
            .base
            .hex_at(at)
            .unwrap_or_else(|| panic!("{at} is not walkable"));
        let center = self.base.center(hexagon).unwrap_or_default();
        let mut minion = Minion::new(format!("minion-{}", self.minions.len()), hexagon, center);
        let visual = self.visuals.instantiate_asset(MINION_ASSET);
        minion.visual = Some(visual);
        self.minions.push((minion, MinionController::new()));
        self.minions.len() - 1
    }

    pub fn hexagon_of(&self, idx: usize) -> HexId {
        self.minions[idx].0.hexagon
    }

    pub fn with<R>(&mut self, idx: usize, f: impl FnOnce(&mut MinionHandle<'_>, &mut StrategyCtx<'_>) -> R) -> R {
        let (minion, controller) = &mut self.minions[idx];
        let mut handle = MinionHandle::new(minion, controller);
        let mut ctx = StrategyCtx {
            base: &mut self.base,
            visuals: &mut self.visuals,
            config: &self.config,
            events: &mut self.events,
        };
        f(&mut handle, &mut ctx)
    }

    pub fn apply(&mut self, idx: usize, strategy: &mut WorkingStrategy) {
        self.with(idx, |m, ctx| strategy.apply(m, ctx));
    }

    pub fn dispose(&mut self, idx: usize, strategy: &mut WorkingStrategy) {
        self.with(idx, |m, ctx| strategy.dispose(m, ctx));
    }

    /// One full frame for one minion.
    pub fn frame(&mut self, idx: usize, strategy: &mut WorkingStrategy) {
        let delta = self.config.reference_frame_ms;
        let step = self.config.minion_speed;
        let epsilon = self.config.arrival_epsilon;
        self.with(idx, |m, ctx| {
            strategy.tick(delta, m, ctx);
            let outcome = m.advance(ctx.visuals, step, epsilon);
            if outcome.arrived {
                strategy.on_arrived(m, ctx);
            }
            strategy.apply(m, ctx);
        });
    }

    /// Run frames until `done` holds, panicking after `limit`.
    pub fn run_until(
        &mut self,
        idx: usize,
        strategy: &mut WorkingStrategy,
        limit: usize,
        mut done: impl FnMut(&WorkingStrategy, &Self) -> bool,
    ) -> usize {
        for frame in 0..limit {
            if done(strategy, self) {
                return frame;
            }
            self.frame(idx, strategy);
        }
        panic!(
            "condition not reached after {limit} frames (state {})",
            strategy.state_name()
        );
    }
}
