use crate::id::{BuildingId, HexId};
use crate::minion::{MinionHandle, MoveOutcome};
use crate::model::{Building, Package, ResourceKind};
use crate::timer::{Repeat, Scheduler, Timer};
use crate::visuals::{CLIP_IDLE, CLIP_WORK};

use super::{StrategyCtx, StrategyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceState {
    Idle,
    TravelingToResource,
    AtResource,
    EndGenerating,
    TravelingToWarehouse,
    AtWarehouse,
}

impl ResourceState {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceState::Idle => "idle",
            ResourceState::TravelingToResource => "traveling_to_resource",
            ResourceState::AtResource => "at_resource",
            ResourceState::EndGenerating => "end_generating",
            ResourceState::TravelingToWarehouse => "traveling_to_warehouse",
            ResourceState::AtWarehouse => "at_warehouse",
        }
    }
}

/// Gather one resource kind: claim a slot, harvest it, haul the package to
/// the nearest warehouse, repeat.
#[derive(Debug, Clone)]
pub struct ResourceStrategy {
    kind: ResourceKind,
    state: ResourceState,
    /// Slot this minion has occupied.
    slot: Option<HexId>,
    harvest: Option<Scheduler>,
    /// Harvested package and the slot it came from.
    carried: Option<(Package, HexId)>,
    warehouse: Option<BuildingId>,
}

impl ResourceStrategy {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            state: ResourceState::Idle,
            slot: None,
            harvest: None,
            carried: None,
            warehouse: None,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn state(&self) -> ResourceState {
        self.state
    }

    pub fn claimed_slot(&self) -> Option<HexId> {
        self.slot
    }

    pub fn carried(&self) -> Option<Package> {
        self.carried.map(|(package, _)| package)
    }

    fn transition(&mut self, next: ResourceState, minion: &MinionHandle<'_>) {
        tracing::debug!(
            minion = %minion.name(),
            from = self.state.as_str(),
            to = next.as_str(),
            "resource strategy"
        );
        self.state = next;
    }

    pub fn apply(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        match self.state {
            ResourceState::Idle => self.claim_slot(minion, ctx),
            // No warehouse last time; retry.
            ResourceState::EndGenerating => self.head_to_warehouse(minion, ctx),
            ResourceState::TravelingToResource
            | ResourceState::AtResource
            | ResourceState::TravelingToWarehouse
            | ResourceState::AtWarehouse => {}
        }
    }

    pub fn on_arrived(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        match self.state {
            ResourceState::TravelingToResource => self.start_harvest(minion, ctx),
            ResourceState::TravelingToWarehouse => self.deposit(minion, ctx),
            _ => {}
        }
    }

    pub fn tick(&mut self, delta_ms: f64, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        if self.state != ResourceState::AtResource {
            return;
        }
        let Some(harvest) = self.harvest.as_mut() else {
            return;
        };
        let tick = harvest.tick(delta_ms);
        if tick.fired.get(1).is_some_and(|&swings| swings > 0) {
            minion.play(ctx.visuals, CLIP_WORK, false);
        }
        if tick.completed {
            self.finish_harvest(minion, ctx);
        }
    }

    fn claim_slot(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        let from = minion.hexagon();
        let Some(target) = ctx.base.get_nearest_resource(from, self.kind) else {
            tracing::warn!(minion = %minion.name(), kind = %self.kind, "no resource available");
            return;
        };
        let Some(slot) = ctx.base.slot_mut(target) else {
            return;
        };
        if let Err(err) = slot.occupy() {
            tracing::error!(minion = %minion.name(), hexagon = %target, %err, "slot claim rejected");
            return;
        }
        self.slot = Some(target);

        match minion.move_to(ctx.base, ctx.visuals, target) {
            MoveOutcome::Moving => self.transition(ResourceState::TravelingToResource, minion),
            MoveOutcome::AlreadyThere => self.start_harvest(minion, ctx),
            MoveOutcome::Unreachable => self.release_slot(ctx),
        }
    }

    fn start_harvest(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        self.transition(ResourceState::AtResource, minion);
        let config = ctx.config;
        let swings = config.harvest_swings;
        let swing_ms = config.harvest_ms / f64::from(swings.max(1));
        self.harvest = Some(Scheduler::new(vec![
            Timer::once(config.harvest_ms),
            Timer::new(swing_ms, Repeat::Times(swings)),
        ]));
        minion.play(ctx.visuals, CLIP_WORK, false);
    }

    fn finish_harvest(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        self.harvest = None;
        let Some(source) = self.slot.take() else {
            self.transition(ResourceState::Idle, minion);
            return;
        };
        let extracted = match ctx.base.slot_mut(source) {
            Some(slot) => {
                let amount = slot.extract(ctx.config.harvest_amount);
                slot.release();
                amount
            }
            None => 0,
        };
        if extracted == 0 {
            tracing::warn!(minion = %minion.name(), hexagon = %source, "resource exhausted");
            minion.play(ctx.visuals, CLIP_IDLE, true);
            self.transition(ResourceState::Idle, minion);
            return;
        }

        self.carried = Some((Package::new(self.kind, extracted), source));
        self.transition(ResourceState::EndGenerating, minion);
        minion.attach_carry(ctx.visuals, self.kind.package_asset());
        self.head_to_warehouse(minion, ctx);
    }

    fn head_to_warehouse(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        let Some(warehouse) = ctx.base.get_nearest_warehouse(minion.hexagon()) else {
            tracing::warn!(minion = %minion.name(), "no warehouse for harvested package");
            return;
        };
        let Some(site) = ctx.base.building(warehouse).and_then(Building::working_site) else {
            return;
        };
        self.warehouse = Some(warehouse);
        match minion.move_to(ctx.base, ctx.visuals, site) {
            MoveOutcome::Moving => self.transition(ResourceState::TravelingToWarehouse, minion),
            MoveOutcome::AlreadyThere => self.deposit(minion, ctx),
            MoveOutcome::Unreachable => self.warehouse = None,
        }
    }

    fn deposit(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        self.transition(ResourceState::AtWarehouse, minion);
        let (Some((package, _)), Some(warehouse)) = (self.carried, self.warehouse) else {
            self.transition(ResourceState::Idle, minion);
            return;
        };
        if !ctx.base.deposit_to_warehouse(warehouse, package) {
            tracing::warn!(minion = %minion.name(), %warehouse, "warehouse rejected package");
            self.warehouse = None;
            self.transition(ResourceState::EndGenerating, minion);
            return;
        }

        self.carried = None;
        self.warehouse = None;
        ctx.events.push(StrategyEvent::ResourceDelivered {
            anchor: minion.position(),
            kind: package.kind,
            amount: package.amount,
        });
        minion.detach_carry(ctx.visuals);
        self.transition(ResourceState::Idle, minion);
    }

    fn release_slot(&mut self, ctx: &mut StrategyCtx<'_>) {
        if let Some(id) = self.slot.take()
            && let Some(slot) = ctx.base.slot_mut(id)
        {
            slot.release();
        }
    }

    /// Free the slot, cancel the harvest, return any carried package to the
    /// slot it came from and drop the carry visual.
    pub fn dispose(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        self.release_slot(ctx);
        if let Some(mut harvest) = self.harvest.take() {
            harvest.cancel();
        }
        if let Some((package, source)) = self.carried.take() {
            match ctx.base.slot_mut(source) {
                Some(slot) => slot.restore(package.amount),
                None => tracing::error!(
                    minion = %minion.name(),
                    hexagon = %source,
                    amount = package.amount,
                    "carried package has no slot to return to"
                ),
            }
        }
        self.warehouse = None;
        minion.detach_carry(ctx.visuals);
        minion.stop(ctx.visuals);
        self.state = ResourceState::Idle;
    }
}
