//! Per-minion work orders.
//!
//! Each strategy is an explicit state enum plus the data that state needs.
//! The owner drives it through four entry points: `apply` on the decision
//! cadence, `on_arrived` when the minion finishes a route, `tick` every frame
//! for strategy-local timers, and `dispose` when the order is withdrawn.
//! None of them return errors; failures become a log line and a state
//! transition, usually back to idle.

pub mod build;
pub mod resource;

use crate::config::GameConfig;
use crate::id::BuildingId;
use crate::model::{Base, ResourceKind, WorldPoint};
use crate::visuals::VisualBackend;

use super::MinionHandle;

pub use build::{BuildState, BuildStrategy};
pub use resource::{ResourceState, ResourceStrategy};

/// Something the HUD should hear about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrategyEvent {
    /// A package reached a warehouse. `anchor` is where the counter pops up.
    ResourceDelivered {
        anchor: WorldPoint,
        kind: ResourceKind,
        amount: u32,
    },
    BuildingFinished {
        building: BuildingId,
    },
}

/// Shared state a strategy may touch during one call.
pub struct StrategyCtx<'a> {
    pub base: &'a mut Base,
    pub visuals: &'a mut dyn VisualBackend,
    pub config: &'a GameConfig,
    pub events: &'a mut Vec<StrategyEvent>,
}

#[derive(Debug, Clone)]
pub enum WorkingStrategy {
    Resource(ResourceStrategy),
    Build(BuildStrategy),
}

impl WorkingStrategy {
    pub fn gather(kind: ResourceKind) -> Self {
        Self::Resource(ResourceStrategy::new(kind))
    }

    pub fn build() -> Self {
        Self::Build(BuildStrategy::new())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Resource(_) => "resource",
            Self::Build(_) => "build",
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Resource(s) => s.state().as_str(),
            Self::Build(s) => s.state().as_str(),
        }
    }

    /// Decision tick.
    pub fn apply(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        match self {
            Self::Resource(s) => s.apply(minion, ctx),
            Self::Build(s) => s.apply(minion, ctx),
        }
    }

    /// The minion reached the end of its route.
    pub fn on_arrived(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        match self {
            Self::Resource(s) => s.on_arrived(minion, ctx),
            Self::Build(s) => s.on_arrived(minion, ctx),
        }
    }

    /// Per-frame timers.
    pub fn tick(&mut self, delta_ms: f64, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        match self {
            Self::Resource(s) => s.tick(delta_ms, minion, ctx),
            Self::Build(_) => {}
        }
    }

    /// Undo every reservation this strategy holds. Safe to call twice.
    pub fn dispose(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        match self {
            Self::Resource(s) => s.dispose(minion, ctx),
            Self::Build(s) => s.dispose(minion, ctx),
        }
    }
}
