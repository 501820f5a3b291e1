pub mod controller;
pub mod strategy;

use bevy_ecs::component::Component;

use crate::id::HexId;
use crate::model::{Base, WorldPoint};
use crate::timer::Timer;
use crate::visuals::{CLIP_IDLE, CLIP_WALK, VisualBackend, VisualHandle};

pub use controller::{MinionController, StepOutcome, Waypoint};
pub use strategy::{StrategyCtx, StrategyEvent, WorkingStrategy};

/// A worker unit standing on (or walking between) walkable hexagons.
///
/// `hexagon` is the last waypoint fully reached. It never changes mid-transit.
#[derive(Component, Debug, Clone)]
pub struct Minion {
    pub name: String,
    pub position: WorldPoint,
    pub hexagon: HexId,
    pub visual: Option<VisualHandle>,
    /// Model of the package being hauled, if any.
    pub carried_visual: Option<VisualHandle>,
}

impl Minion {
    pub fn new(name: impl Into<String>, hexagon: HexId, position: WorldPoint) -> Self {
        Self {
            name: name.into(),
            position,
            hexagon,
            visual: None,
            carried_visual: None,
        }
    }
}

/// Result of asking a minion to walk somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Already standing on the target; no arrival will follow.
    AlreadyThere,
    /// Walking; a `MinionArrived` follows on a later frame.
    Moving,
    /// No path over the base graph.
    Unreachable,
}

/// Mutable view of one minion handed to strategies.
pub struct MinionHandle<'a> {
    pub minion: &'a mut Minion,
    pub controller: &'a mut MinionController,
}

impl<'a> MinionHandle<'a> {
    pub fn new(minion: &'a mut Minion, controller: &'a mut MinionController) -> Self {
        Self { minion, controller }
    }

    pub fn name(&self) -> &str {
        &self.minion.name
    }

    pub fn hexagon(&self) -> HexId {
        self.minion.hexagon
    }

    pub fn position(&self) -> WorldPoint {
        self.minion.position
    }

    /// Route to `target` over the base graph, replacing any active route.
    pub fn move_to(&mut self, base: &Base, visuals: &mut dyn VisualBackend, target: HexId) -> MoveOutcome {
        let from = self.minion.hexagon;
        let Some(path) = base.get_path_from_to(from, target) else {
            tracing::warn!(minion = %self.minion.name, %from, to = %target, "no path");
            self.controller.stop();
            return MoveOutcome::Unreachable;
        };

        let mut route: Vec<Waypoint> = path
            .into_iter()
            .filter_map(|hexagon| base.center(hexagon).map(|point| Waypoint { point, hexagon }))
            .collect();
        // Interrupted mid-step: walk back onto the current hexagon first.
        if route.is_empty()
            && let Some(center) = base.center(from)
            && center != self.minion.position
        {
            route.push(Waypoint {
                point: center,
                hexagon: from,
            });
        }

        if route.is_empty() {
            self.controller.stop();
            return MoveOutcome::AlreadyThere;
        }
        tracing::debug!(minion = %self.minion.name, %from, to = %target, steps = route.len(), "moving");
        self.controller.move_to(route);
        self.play(visuals, CLIP_WALK, true);
        MoveOutcome::Moving
    }

    /// One movement frame: step along the route, record reached hexagons and
    /// keep the visuals on the minion.
    pub fn advance(&mut self, visuals: &mut dyn VisualBackend, step: f64, epsilon: f64) -> StepOutcome {
        if !self.controller.is_moving() {
            return StepOutcome::default();
        }
        let outcome = self.controller.update(&mut self.minion.position, step, epsilon);
        if let Some(hexagon) = outcome.reached {
            self.minion.hexagon = hexagon;
        }
        for handle in [self.minion.visual, self.minion.carried_visual].into_iter().flatten() {
            visuals.position_visual(handle, self.minion.position);
        }
        if outcome.arrived {
            self.play(visuals, CLIP_IDLE, true);
        }
        outcome
    }

    pub fn stop(&mut self, visuals: &mut dyn VisualBackend) {
        if self.controller.is_moving() {
            self.controller.stop();
            self.play(visuals, CLIP_IDLE, true);
        }
    }

    pub fn play(&self, visuals: &mut dyn VisualBackend, clip: &str, looped: bool) {
        if let Some(handle) = self.minion.visual {
            visuals.play_animation(handle, clip, looped, 1.0);
        }
    }

    /// Show a carried package. No-op if one is already shown.
    pub fn attach_carry(&mut self, visuals: &mut dyn VisualBackend, asset: &str) {
        if self.minion.carried_visual.is_some() {
            return;
        }
        let handle = visuals.instantiate_asset(asset);
        visuals.position_visual(handle, self.minion.position);
        self.minion.carried_visual = Some(handle);
    }

    pub fn detach_carry(&mut self, visuals: &mut dyn VisualBackend) {
        if let Some(handle) = self.minion.carried_visual.take() {
            visuals.dispose_visual(handle);
        }
    }
}

/// The order a minion is following and its decision cadence.
#[derive(Component, Debug)]
pub struct Orders {
    strategy: Option<WorkingStrategy>,
    decision: Timer,
    decision_due: bool,
}

impl Orders {
    pub fn new(decision_interval_ms: f64) -> Self {
        Self {
            strategy: None,
            decision: Timer::every(decision_interval_ms),
            decision_due: false,
        }
    }

    pub fn strategy(&self) -> Option<&WorkingStrategy> {
        self.strategy.as_ref()
    }

    pub fn strategy_mut(&mut self) -> Option<&mut WorkingStrategy> {
        self.strategy.as_mut()
    }

    pub fn is_idle(&self) -> bool {
        self.strategy.is_none()
    }

    /// Dispose the current strategy and follow `strategy` from the next
    /// decision pass.
    pub fn assign(&mut self, strategy: WorkingStrategy, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        self.clear(minion, ctx);
        tracing::debug!(minion = %minion.name(), strategy = strategy.name(), "strategy assigned");
        self.strategy = Some(strategy);
        self.decision.reset();
        self.decision_due = true;
    }

    /// Dispose the current strategy, leaving the minion idle.
    pub fn clear(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        if let Some(mut old) = self.strategy.take() {
            old.dispose(minion, ctx);
        }
        self.decision_due = false;
    }

    /// Count down the decision cadence.
    pub fn tick_decision(&mut self, delta_ms: f64) {
        if self.strategy.is_some() && self.decision.tick(delta_ms) > 0 {
            self.decision_due = true;
        }
    }

    /// Consume a pending decision pass.
    pub fn take_decision(&mut self) -> bool {
        std::mem::take(&mut self.decision_due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blueprint, BuildingShape, HexCoord, ResourceLedger};
    use crate::testutil::{StrategyHarness, fast_config, starter_base};

    #[test]
    fn move_to_detached_hexagon_is_unreachable() {
        let (mut base, _) = starter_base(&[], ResourceLedger::ZERO);
        let island = HexCoord::new(-4, 0);
        base.add_finished(Blueprint::Extension(BuildingShape::Triangle), island, ResourceLedger::ZERO)
            .unwrap();
        let mut h = StrategyHarness::new(base, fast_config());
        let idx = h.add_minion(HexCoord::ORIGIN);
        let target = h.base.hex_at(island).unwrap();

        let outcome = h.with(idx, |m, ctx| m.move_to(ctx.base, ctx.visuals, target));
        assert_eq!(outcome, MoveOutcome::Unreachable);
        assert!(!h.minions[idx].1.is_moving());
        assert_eq!(h.hexagon_of(idx), h.base.hex_at(HexCoord::ORIGIN).unwrap());
    }

    #[test]
    fn move_to_own_hexagon_is_already_there() {
        let (base, _) = starter_base(&[], ResourceLedger::ZERO);
        let mut h = StrategyHarness::new(base, fast_config());
        let idx = h.add_minion(HexCoord::ORIGIN);
        let here = h.hexagon_of(idx);

        let outcome = h.with(idx, |m, ctx| m.move_to(ctx.base, ctx.visuals, here));
        assert_eq!(outcome, MoveOutcome::AlreadyThere);
    }
}
