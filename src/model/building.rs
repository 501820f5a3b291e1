use serde::{Deserialize, Serialize};

use super::geometry::HexCoord;
use super::resource::{Package, ResourceKind, ResourceLedger};
use crate::error::BuildingError;
use crate::id::{BuildingId, HexId};

// ---------------------------------------------------------------------------
// Shapes and blueprints
// ---------------------------------------------------------------------------

/// Footprint layout relative to an anchor hexagon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingShape {
    /// Anchor plus its six neighbors.
    Flower,
    /// Three mutually adjacent hexagons.
    Triangle,
    /// Three hexagons in a straight row.
    Line,
}

impl BuildingShape {
    pub fn footprint(self, anchor: HexCoord) -> Vec<HexCoord> {
        match self {
            BuildingShape::Flower => {
                let mut coords = vec![anchor];
                coords.extend(anchor.neighbors());
                coords
            }
            BuildingShape::Triangle => vec![anchor, anchor.offset(1, 0), anchor.offset(0, 1)],
            BuildingShape::Line => vec![anchor, anchor.offset(1, 0), anchor.offset(2, 0)],
        }
    }
}

/// What the player asks to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blueprint {
    Extension(BuildingShape),
    Warehouse,
}

impl Blueprint {
    pub fn shape(self) -> BuildingShape {
        match self {
            Blueprint::Extension(shape) => shape,
            Blueprint::Warehouse => BuildingShape::Triangle,
        }
    }

    /// Static construction cost.
    pub fn cost(self) -> ResourceLedger {
        match self {
            Blueprint::Extension(BuildingShape::Flower) => ResourceLedger::new(30, 20, 10),
            Blueprint::Extension(BuildingShape::Triangle) => ResourceLedger::new(10, 0, 0),
            Blueprint::Extension(BuildingShape::Line) => ResourceLedger::new(10, 5, 0),
            Blueprint::Warehouse => ResourceLedger::new(20, 10, 0),
        }
    }

    pub fn asset_name(self) -> &'static str {
        match self {
            Blueprint::Extension(BuildingShape::Flower) => "extension_flower",
            Blueprint::Extension(BuildingShape::Triangle) => "extension_triangle",
            Blueprint::Extension(BuildingShape::Line) => "extension_line",
            Blueprint::Warehouse => "warehouse",
        }
    }

    /// Whether the player's pooled stock covers the static cost.
    pub fn can_build(self, pool: &ResourceLedger) -> bool {
        pool.covers(&self.cost())
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingState {
    Prebuild,
    WaitingForMinion,
    UnderConstruction,
    Finished,
}

impl BuildingState {
    /// Cosmetic material tag for the renderer.
    pub fn material_tag(self) -> &'static str {
        match self {
            BuildingState::Prebuild => "ghost",
            BuildingState::WaitingForMinion => "scaffold",
            BuildingState::UnderConstruction => "construction",
            BuildingState::Finished => "solid",
        }
    }
}

/// Variant-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Extension,
    Warehouse { stock: ResourceLedger },
}

/// Result of a delivery to a building's construction ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// Amount credited to `received`.
    pub accepted: u32,
    /// Amount beyond the remaining cost, handed back to the caller.
    pub surplus: u32,
    /// True only on the delivery that completed construction.
    pub finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub blueprint: Blueprint,
    pub kind: BuildingKind,
    pub footprint: Vec<HexCoord>,
    cost: ResourceLedger,
    received: ResourceLedger,
    incoming: ResourceLedger,
    state: BuildingState,
    working_site: Option<HexId>,
}

impl Building {
    /// A fresh Prebuild building at `anchor`.
    pub fn new(id: BuildingId, blueprint: Blueprint, anchor: HexCoord) -> Self {
        let kind = match blueprint {
            Blueprint::Extension(_) => BuildingKind::Extension,
            Blueprint::Warehouse => BuildingKind::Warehouse {
                stock: ResourceLedger::ZERO,
            },
        };
        Self {
            id,
            blueprint,
            kind,
            footprint: blueprint.shape().footprint(anchor),
            cost: blueprint.cost(),
            received: ResourceLedger::ZERO,
            incoming: ResourceLedger::ZERO,
            state: BuildingState::Prebuild,
            working_site: None,
        }
    }

    /// An already-finished building, used for the starter layout.
    pub fn finished(id: BuildingId, blueprint: Blueprint, anchor: HexCoord) -> Self {
        let mut building = Self::new(id, blueprint, anchor);
        building.received = building.cost;
        building.state = BuildingState::Finished;
        building
    }

    pub fn state(&self) -> BuildingState {
        self.state
    }

    pub fn cost(&self) -> ResourceLedger {
        self.cost
    }

    pub fn received(&self) -> ResourceLedger {
        self.received
    }

    pub fn incoming(&self) -> ResourceLedger {
        self.incoming
    }

    pub fn working_site(&self) -> Option<HexId> {
        self.working_site
    }

    pub fn is_finished(&self) -> bool {
        self.state == BuildingState::Finished
    }

    pub fn is_warehouse(&self) -> bool {
        matches!(self.kind, BuildingKind::Warehouse { .. })
    }

    pub fn occupies(&self, coord: HexCoord) -> bool {
        self.footprint.contains(&coord)
    }

    /// Attach to the base at the hexagon minions deliver to.
    /// Prebuild → WaitingForMinion.
    pub fn prepare_to_build_on(&mut self, site: HexId) -> Result<(), BuildingError> {
        if self.state == BuildingState::Finished {
            return Err(BuildingError::AlreadyFinished(self.id));
        }
        self.working_site = Some(site);
        if self.state == BuildingState::Prebuild {
            self.state = BuildingState::WaitingForMinion;
        }
        Ok(())
    }

    /// Record the interaction hexagon of a building that is already part of
    /// the base.
    pub(crate) fn set_working_site(&mut self, site: HexId) {
        self.working_site = Some(site);
    }

    /// Cost still neither delivered nor pledged.
    pub fn outstanding(&self, kind: ResourceKind) -> u32 {
        self.cost
            .get(kind)
            .saturating_sub(self.received.get(kind))
            .saturating_sub(self.incoming.get(kind))
    }

    /// Placed, unfinished, and with some cost nobody has pledged yet.
    pub fn needs_minion(&self) -> bool {
        matches!(
            self.state,
            BuildingState::WaitingForMinion | BuildingState::UnderConstruction
        ) && ResourceKind::ALL.iter().any(|&kind| self.outstanding(kind) > 0)
    }

    /// Choose the next load to haul from a warehouse holding `stock`.
    ///
    /// Only kinds the warehouse can actually supply are considered, in
    /// `ResourceKind::ALL` order, capped at `max_carry` and the stock.
    pub fn next_package(&self, stock: &ResourceLedger, max_carry: u32) -> Option<Package> {
        ResourceKind::ALL.into_iter().find_map(|kind| {
            let amount = self.outstanding(kind).min(max_carry).min(stock.get(kind));
            (amount > 0).then(|| Package::new(kind, amount))
        })
    }

    /// Reserve `package` against double-pledging.
    pub fn add_incoming_material(&mut self, package: Package) -> Result<(), BuildingError> {
        match self.state {
            BuildingState::Prebuild => Err(BuildingError::NotPlaced(self.id)),
            BuildingState::Finished => Err(BuildingError::AlreadyFinished(self.id)),
            BuildingState::WaitingForMinion | BuildingState::UnderConstruction => {
                self.incoming.add(package.kind, package.amount);
                Ok(())
            }
        }
    }

    /// Exactly undo a prior `add_incoming_material` of the same package.
    pub fn restore_incoming_material(&mut self, package: Package) {
        self.incoming.take(package.kind, package.amount);
    }

    /// Convert a pledge into a confirmed delivery and check completion.
    pub fn add_material(&mut self, package: Package) -> Result<Delivery, BuildingError> {
        match self.state {
            BuildingState::Prebuild => return Err(BuildingError::NotPlaced(self.id)),
            BuildingState::Finished => return Err(BuildingError::AlreadyFinished(self.id)),
            BuildingState::WaitingForMinion | BuildingState::UnderConstruction => {}
        }

        self.incoming.take(package.kind, package.amount);
        let remaining = self
            .cost
            .get(package.kind)
            .saturating_sub(self.received.get(package.kind));
        let accepted = package.amount.min(remaining);
        self.received.add(package.kind, accepted);
        self.state = BuildingState::UnderConstruction;

        let finished = self.received.covers(&self.cost);
        if finished {
            self.state = BuildingState::Finished;
        }
        Ok(Delivery {
            accepted,
            surplus: package.amount - accepted,
            finished,
        })
    }

    pub fn stock(&self) -> Option<&ResourceLedger> {
        match &self.kind {
            BuildingKind::Warehouse { stock } => Some(stock),
            BuildingKind::Extension => None,
        }
    }

    pub fn stock_mut(&mut self) -> Option<&mut ResourceLedger> {
        match &mut self.kind {
            BuildingKind::Warehouse { stock } => Some(stock),
            BuildingKind::Extension => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(blueprint: Blueprint) -> Building {
        let mut b = Building::new(BuildingId(1), blueprint, HexCoord::new(3, 0));
        b.prepare_to_build_on(HexId(1)).unwrap();
        b
    }

    #[test]
    fn footprints_are_distinct() {
        for shape in [BuildingShape::Flower, BuildingShape::Triangle, BuildingShape::Line] {
            let fp = shape.footprint(HexCoord::ORIGIN);
            let mut dedup = fp.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(fp.len(), dedup.len(), "{shape:?}");
            assert!((3..=7).contains(&fp.len()));
        }
    }

    #[test]
    fn triangle_is_mutually_adjacent() {
        let fp = BuildingShape::Triangle.footprint(HexCoord::new(2, -1));
        for a in &fp {
            for b in &fp {
                if a != b {
                    assert_eq!(a.distance(*b), 1);
                }
            }
        }
    }

    #[test]
    fn prepare_moves_prebuild_to_waiting() {
        let mut b = Building::new(BuildingId(1), Blueprint::Warehouse, HexCoord::ORIGIN);
        assert_eq!(b.state(), BuildingState::Prebuild);
        assert!(!b.needs_minion());
        b.prepare_to_build_on(HexId(4)).unwrap();
        assert_eq!(b.state(), BuildingState::WaitingForMinion);
        assert_eq!(b.working_site(), Some(HexId(4)));
        assert!(b.needs_minion());
    }

    #[test]
    fn incoming_is_symmetric() {
        let mut b = placed(Blueprint::Extension(BuildingShape::Line));
        let pkg = Package::new(ResourceKind::Wood, 6);
        b.add_incoming_material(pkg).unwrap();
        assert_eq!(b.outstanding(ResourceKind::Wood), 4);
        b.restore_incoming_material(pkg);
        assert_eq!(b.incoming(), ResourceLedger::ZERO);
        assert_eq!(b.outstanding(ResourceKind::Wood), 10);
    }

    #[test]
    fn incoming_rejected_before_placement() {
        let mut b = Building::new(BuildingId(2), Blueprint::Warehouse, HexCoord::ORIGIN);
        let err = b.add_incoming_material(Package::new(ResourceKind::Wood, 1));
        assert_eq!(err, Err(BuildingError::NotPlaced(BuildingId(2))));
    }

    #[test]
    fn finishes_exactly_when_all_costs_met() {
        let mut b = placed(Blueprint::Extension(BuildingShape::Line));
        let wood = Package::new(ResourceKind::Wood, 10);
        let rock = Package::new(ResourceKind::Rock, 5);

        let d = b.add_material(wood).unwrap();
        assert!(!d.finished);
        assert_eq!(b.state(), BuildingState::UnderConstruction);

        let d = b.add_material(rock).unwrap();
        assert!(d.finished);
        assert_eq!(b.state(), BuildingState::Finished);

        let again = b.add_material(rock);
        assert_eq!(again, Err(BuildingError::AlreadyFinished(BuildingId(1))));
    }

    #[test]
    fn surplus_is_returned_not_credited() {
        let mut b = placed(Blueprint::Extension(BuildingShape::Triangle));
        let d = b.add_material(Package::new(ResourceKind::Wood, 14)).unwrap();
        assert_eq!(d.accepted, 10);
        assert_eq!(d.surplus, 4);
        assert_eq!(b.received().wood, 10);
        assert!(d.finished);
    }

    #[test]
    fn next_package_respects_stock_and_carry() {
        let b = placed(Blueprint::Extension(BuildingShape::Flower));
        let stock = ResourceLedger::new(0, 7, 50);
        let pkg = b.next_package(&stock, 10).unwrap();
        assert_eq!(pkg, Package::new(ResourceKind::Rock, 7));
        assert!(b.next_package(&ResourceLedger::ZERO, 10).is_none());
    }

    #[test]
    fn warehouse_has_stock_extension_does_not() {
        let w = Building::new(BuildingId(1), Blueprint::Warehouse, HexCoord::ORIGIN);
        let e = Building::new(
            BuildingId(2),
            Blueprint::Extension(BuildingShape::Flower),
            HexCoord::ORIGIN,
        );
        assert!(w.stock().is_some());
        assert!(e.stock().is_none());
    }

    #[test]
    fn can_build_checks_pool() {
        let pool = ResourceLedger::new(20, 10, 0);
        assert!(Blueprint::Warehouse.can_build(&pool));
        assert!(!Blueprint::Extension(BuildingShape::Flower).can_build(&pool));
    }
}
