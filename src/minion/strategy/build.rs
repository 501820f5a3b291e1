use crate::id::BuildingId;
use crate::minion::{MinionHandle, MoveOutcome};
use crate::model::{Building, Package};

use super::{StrategyCtx, StrategyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildState {
    #[default]
    Idle,
    TravelingToWarehouse,
    AtWarehouse,
    TravelingToBuilding,
    AtBuilding,
}

impl BuildState {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildState::Idle => "idle",
            BuildState::TravelingToWarehouse => "traveling_to_warehouse",
            BuildState::AtWarehouse => "at_warehouse",
            BuildState::TravelingToBuilding => "traveling_to_building",
            BuildState::AtBuilding => "at_building",
        }
    }
}

/// Haul construction material from the nearest warehouse to the nearest
/// building waiting for a minion, one package per trip.
///
/// The package is pledged as incoming on the building when the trip is
/// planned, and withdrawn from the warehouse only on arrival there. Disposal
/// reverses exactly what has happened so far.
#[derive(Debug, Clone, Default)]
pub struct BuildStrategy {
    state: BuildState,
    working_on: Option<BuildingId>,
    warehouse: Option<BuildingId>,
    package: Option<Package>,
    withdrawn: bool,
}

impl BuildStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn working_on(&self) -> Option<BuildingId> {
        self.working_on
    }

    pub fn package(&self) -> Option<Package> {
        self.package
    }

    /// Whether the package has left the warehouse.
    pub fn is_carrying(&self) -> bool {
        self.withdrawn
    }

    fn transition(&mut self, next: BuildState, minion: &MinionHandle<'_>) {
        tracing::debug!(
            minion = %minion.name(),
            from = self.state.as_str(),
            to = next.as_str(),
            "build strategy"
        );
        self.state = next;
    }

    pub fn apply(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        if self.state == BuildState::Idle {
            self.plan_trip(minion, ctx);
        }
    }

    pub fn on_arrived(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        match self.state {
            BuildState::TravelingToWarehouse => self.withdraw(minion, ctx),
            BuildState::TravelingToBuilding => self.deliver(minion, ctx),
            _ => {}
        }
    }

    fn plan_trip(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        let from = minion.hexagon();
        let Some(building) = ctx.base.get_nearest_building_waiting_for_minion(from) else {
            tracing::warn!(minion = %minion.name(), "no building waiting for a minion");
            return;
        };
        let Some(warehouse) = ctx.base.get_nearest_warehouse(from) else {
            tracing::warn!(minion = %minion.name(), %building, "no warehouse to supply building");
            return;
        };
        let stock = ctx
            .base
            .building(warehouse)
            .and_then(Building::stock)
            .copied()
            .unwrap_or_default();
        let Some(target) = ctx.base.building_mut(building) else {
            return;
        };
        let Some(package) = target.next_package(&stock, ctx.config.max_carry) else {
            tracing::warn!(minion = %minion.name(), %building, %warehouse, "warehouse cannot supply building");
            return;
        };
        if let Err(err) = target.add_incoming_material(package) {
            tracing::error!(minion = %minion.name(), %building, %err, "pledge rejected");
            return;
        }

        self.working_on = Some(building);
        self.warehouse = Some(warehouse);
        self.package = Some(package);
        self.withdrawn = false;
        tracing::debug!(
            minion = %minion.name(),
            %building,
            %warehouse,
            kind = %package.kind,
            amount = package.amount,
            "trip planned"
        );

        let Some(site) = ctx.base.building(warehouse).and_then(Building::working_site) else {
            self.abort(minion, ctx);
            return;
        };
        match minion.move_to(ctx.base, ctx.visuals, site) {
            MoveOutcome::Moving => self.transition(BuildState::TravelingToWarehouse, minion),
            MoveOutcome::AlreadyThere => self.withdraw(minion, ctx),
            MoveOutcome::Unreachable => self.abort(minion, ctx),
        }
    }

    fn withdraw(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        self.transition(BuildState::AtWarehouse, minion);
        let (Some(building), Some(warehouse), Some(package)) = (self.working_on, self.warehouse, self.package)
        else {
            self.abort(minion, ctx);
            return;
        };

        let taken = ctx.base.take_from_warehouse(warehouse, package.kind, package.amount);
        if taken < package.amount {
            // Release the part of the pledge the warehouse could not fill.
            if let Some(target) = ctx.base.building_mut(building) {
                target.restore_incoming_material(Package::new(package.kind, package.amount - taken));
            }
        }
        if taken == 0 {
            tracing::warn!(
                minion = %minion.name(),
                %warehouse,
                kind = %package.kind,
                wanted = package.amount,
                "insufficient warehouse stock"
            );
            self.reset(minion);
            return;
        }
        let package = Package::new(package.kind, taken);
        self.package = Some(package);
        self.withdrawn = true;
        minion.attach_carry(ctx.visuals, package.kind.package_asset());

        let Some(site) = ctx.base.building(building).and_then(Building::working_site) else {
            self.abort(minion, ctx);
            return;
        };
        match minion.move_to(ctx.base, ctx.visuals, site) {
            MoveOutcome::Moving => self.transition(BuildState::TravelingToBuilding, minion),
            MoveOutcome::AlreadyThere => self.deliver(minion, ctx),
            MoveOutcome::Unreachable => self.abort(minion, ctx),
        }
    }

    fn deliver(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        self.transition(BuildState::AtBuilding, minion);
        minion.detach_carry(ctx.visuals);
        let (Some(building), Some(package)) = (self.working_on, self.package) else {
            self.abort(minion, ctx);
            return;
        };

        match ctx.base.deliver(building, package) {
            Ok(delivery) => {
                if delivery.surplus > 0 {
                    self.return_to_warehouse(Package::new(package.kind, delivery.surplus), minion, ctx);
                }
                if delivery.finished {
                    ctx.events.push(StrategyEvent::BuildingFinished { building });
                }
            }
            Err(err) => {
                tracing::error!(minion = %minion.name(), %building, %err, "delivery rejected");
                if let Some(target) = ctx.base.building_mut(building) {
                    target.restore_incoming_material(package);
                }
                self.return_to_warehouse(package, minion, ctx);
            }
        }
        self.reset(minion);
    }

    fn return_to_warehouse(&self, package: Package, minion: &MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        let Some(warehouse) = self.warehouse else {
            return;
        };
        if !ctx.base.deposit_to_warehouse(warehouse, package) {
            tracing::error!(
                minion = %minion.name(),
                %warehouse,
                kind = %package.kind,
                amount = package.amount,
                "could not return package to warehouse"
            );
        }
    }

    /// Undo the pledge, and the withdrawal if it happened, then go idle.
    fn abort(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        if let Some(package) = self.package {
            if let Some(id) = self.working_on
                && let Some(target) = ctx.base.building_mut(id)
            {
                target.restore_incoming_material(package);
            }
            if self.withdrawn {
                self.return_to_warehouse(package, minion, ctx);
            }
        }
        minion.detach_carry(ctx.visuals);
        self.reset(minion);
    }

    fn reset(&mut self, minion: &MinionHandle<'_>) {
        self.working_on = None;
        self.warehouse = None;
        self.package = None;
        self.withdrawn = false;
        self.transition(BuildState::Idle, minion);
    }

    pub fn dispose(&mut self, minion: &mut MinionHandle<'_>, ctx: &mut StrategyCtx<'_>) {
        self.abort(minion, ctx);
        minion.stop(ctx.visuals);
    }
}
