use std::collections::BTreeMap;

use bevy_ecs::resource::Resource;
use pathfinding::prelude::dijkstra;

use super::building::{Blueprint, Building, Delivery};
use super::geometry::{HexCoord, WorldPoint};
use super::hexagon::{Hexagon, ResourceSlot};
use super::map::HexMap;
use super::resource::{Package, ResourceKind, ResourceLedger};
use crate::error::{BuildingError, PlacementError};
use crate::id::{BuildingId, HexId, IdGenerator};

/// Hex pitch with a little slack: centers closer than this are neighbors.
pub const DEFAULT_NEIGHBOR_DISTANCE: f64 = 1.75;

/// The player's base: every building, the walkable hexagon set unfolded from
/// finished extensions, and the adjacency graph over that set.
///
/// The graph is rebuilt from scratch whenever the walkable set grows.
#[derive(Resource, Debug, Clone)]
pub struct Base {
    map: HexMap,
    neighbor_distance: f64,
    buildings: BTreeMap<BuildingId, Building>,
    extensions: Vec<BuildingId>,
    walkable: BTreeMap<HexId, Hexagon>,
    by_coord: BTreeMap<HexCoord, HexId>,
    graph: BTreeMap<HexId, Vec<HexId>>,
    building_ids: IdGenerator,
}

impl Base {
    pub fn new(map: HexMap, neighbor_distance: f64) -> Self {
        Self {
            map,
            neighbor_distance,
            buildings: BTreeMap::new(),
            extensions: Vec::new(),
            walkable: BTreeMap::new(),
            by_coord: BTreeMap::new(),
            graph: BTreeMap::new(),
            building_ids: IdGenerator::new(),
        }
    }

    // -- Accessors --

    pub fn map(&self) -> &HexMap {
        &self.map
    }

    pub fn neighbor_distance(&self) -> f64 {
        self.neighbor_distance
    }

    pub fn hex(&self, id: HexId) -> Option<&Hexagon> {
        self.walkable.get(&id)
    }

    pub fn hex_at(&self, coord: HexCoord) -> Option<HexId> {
        self.by_coord.get(&coord).copied()
    }

    pub fn center(&self, id: HexId) -> Option<WorldPoint> {
        self.walkable.get(&id).map(|h| h.center)
    }

    pub fn slot(&self, id: HexId) -> Option<&ResourceSlot> {
        self.walkable.get(&id).and_then(|h| h.resource.as_ref())
    }

    pub fn slot_mut(&mut self, id: HexId) -> Option<&mut ResourceSlot> {
        self.walkable.get_mut(&id).and_then(|h| h.resource.as_mut())
    }

    pub fn walkable(&self) -> impl Iterator<Item = &Hexagon> {
        self.walkable.values()
    }

    pub fn walkable_len(&self) -> usize {
        self.walkable.len()
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(&id)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(&id)
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    /// Finished extensions in the order they were unfolded.
    pub fn extensions(&self) -> &[BuildingId] {
        &self.extensions
    }

    // -- Graph --

    pub fn neighbors(&self, id: HexId) -> &[HexId] {
        self.graph.get(&id).map_or(&[], |v| v.as_slice())
    }

    pub fn are_neighbors(&self, a: HexId, b: HexId) -> bool {
        self.graph
            .get(&a)
            .is_some_and(|neighbors| neighbors.binary_search(&b).is_ok())
    }

    /// Add every hexagon of a finished building to the walkable set and
    /// rebuild the graph. Returns how many hexagons were unfolded.
    pub fn add_extension(&mut self, id: BuildingId) -> Result<usize, BuildingError> {
        let building = self
            .buildings
            .get(&id)
            .ok_or(BuildingError::UnknownBuilding(id))?;
        let footprint = building.footprint.clone();

        let mut unfolded = 0;
        let mut first = None;
        for coord in footprint {
            let Some(hexagon) = self.map.take(coord) else {
                tracing::warn!(building = %id, %coord, "footprint hexagon missing from map");
                continue;
            };
            first.get_or_insert(hexagon.id);
            self.by_coord.insert(coord, hexagon.id);
            self.walkable.insert(hexagon.id, hexagon);
            unfolded += 1;
        }
        self.extensions.push(id);

        if let (Some(site), Some(building)) = (first, self.buildings.get_mut(&id))
            && building.working_site().is_none()
        {
            building.set_working_site(site);
        }

        self.rebuild_graph();
        tracing::info!(building = %id, unfolded, walkable = self.walkable.len(), "extension unfolded");
        Ok(unfolded)
    }

    /// Full O(n²) rebuild: unit edge between any two hexagons whose centers
    /// are closer than the neighbor distance.
    fn rebuild_graph(&mut self) {
        let mut graph: BTreeMap<HexId, Vec<HexId>> =
            self.walkable.keys().map(|&id| (id, Vec::new())).collect();
        let hexes: Vec<(HexId, WorldPoint)> =
            self.walkable.values().map(|h| (h.id, h.center)).collect();

        for (i, &(a, ca)) in hexes.iter().enumerate() {
            for &(b, cb) in &hexes[i + 1..] {
                if ca.distance(cb) < self.neighbor_distance {
                    graph.entry(a).or_default().push(b);
                    graph.entry(b).or_default().push(a);
                }
            }
        }
        for neighbors in graph.values_mut() {
            neighbors.sort();
        }
        self.graph = graph;
    }

    /// Shortest path over the walkable graph.
    ///
    /// Returns the hexagons after `from` up to and including `to`; empty when
    /// `from == to`; `None` when either end is not walkable or they lie in
    /// disconnected components.
    pub fn get_path_from_to(&self, from: HexId, to: HexId) -> Option<Vec<HexId>> {
        if !self.walkable.contains_key(&from) || !self.walkable.contains_key(&to) {
            return None;
        }
        if from == to {
            return Some(Vec::new());
        }
        let (path, _cost) = dijkstra(
            &from,
            |id| {
                self.neighbors(*id)
                    .iter()
                    .map(|&n| (n, 1u32))
                    .collect::<Vec<_>>()
            },
            |id| *id == to,
        )?;
        Some(path.into_iter().skip(1).collect())
    }

    pub fn path_length(&self, from: HexId, to: HexId) -> Option<usize> {
        self.get_path_from_to(from, to).map(|p| p.len())
    }

    // -- Queries --
    //
    // All nearest-* queries rank by path length, running one shortest-path
    // search per candidate. This is the scaling limit of the base.

    /// Nearest walkable hexagon with an available slot of `kind`.
    pub fn get_nearest_resource(&self, from: HexId, kind: ResourceKind) -> Option<HexId> {
        self.walkable
            .values()
            .filter(|h| h.offers(kind))
            .filter_map(|h| self.path_length(from, h.id).map(|len| (len, h.id)))
            .min()
            .map(|(_, id)| id)
    }

    /// Nearest placed, unfinished building with cost nobody has pledged yet.
    pub fn get_nearest_building_waiting_for_minion(&self, from: HexId) -> Option<BuildingId> {
        self.buildings
            .values()
            .filter(|b| b.needs_minion())
            .filter_map(|b| {
                let site = b.working_site()?;
                self.path_length(from, site).map(|len| (len, b.id))
            })
            .min()
            .map(|(_, id)| id)
    }

    /// Nearest finished warehouse, measured to its working site.
    pub fn get_nearest_warehouse(&self, from: HexId) -> Option<BuildingId> {
        self.buildings
            .values()
            .filter(|b| b.is_warehouse() && b.is_finished())
            .filter_map(|b| {
                let site = b.working_site()?;
                self.path_length(from, site).map(|len| (len, b.id))
            })
            .min()
            .map(|(_, id)| id)
    }

    /// Stock summed across finished warehouses.
    pub fn resource_totals(&self) -> ResourceLedger {
        self.buildings
            .values()
            .filter(|b| b.is_finished())
            .filter_map(|b| b.stock())
            .fold(ResourceLedger::ZERO, |acc, stock| acc + *stock)
    }

    // -- Placement --

    /// Footprint of `blueprint` at `anchor` is free, buildable, and touches
    /// the walkable set.
    pub fn can_build_here(&self, blueprint: Blueprint, anchor: HexCoord) -> Result<(), PlacementError> {
        let footprint = blueprint.shape().footprint(anchor);
        for &coord in &footprint {
            if self.by_coord.contains_key(&coord)
                || self
                    .buildings
                    .values()
                    .any(|b| !b.is_finished() && b.occupies(coord))
            {
                return Err(PlacementError::Overlaps(coord));
            }
            let hexagon = self.map.get(coord).ok_or(PlacementError::OffMap(coord))?;
            if !hexagon.terrain.is_buildable() {
                return Err(PlacementError::NotWalkable(coord));
            }
        }
        if self.working_site_for(&footprint).is_none() {
            return Err(PlacementError::Disconnected);
        }
        Ok(())
    }

    /// Lowest-id walkable hexagon within neighbor distance of the footprint.
    fn working_site_for(&self, footprint: &[HexCoord]) -> Option<HexId> {
        let hex_size = self.map.hex_size();
        let centers: Vec<WorldPoint> = footprint.iter().map(|c| c.to_world(hex_size)).collect();
        self.walkable
            .values()
            .find(|h| {
                centers
                    .iter()
                    .any(|c| c.distance(h.center) < self.neighbor_distance)
            })
            .map(|h| h.id)
    }

    /// Validate and place a building, leaving it waiting for a minion.
    pub fn place(&mut self, blueprint: Blueprint, anchor: HexCoord) -> Result<BuildingId, PlacementError> {
        let pool = self.resource_totals();
        if !blueprint.can_build(&pool) {
            return Err(PlacementError::Unaffordable {
                missing: pool.shortfall(&blueprint.cost()),
            });
        }
        self.can_build_here(blueprint, anchor)?;
        let footprint = blueprint.shape().footprint(anchor);
        let site = self
            .working_site_for(&footprint)
            .ok_or(PlacementError::Disconnected)?;

        let id = self.building_ids.next_building();
        let mut building = Building::new(id, blueprint, anchor);
        if let Err(err) = building.prepare_to_build_on(site) {
            tracing::error!(building = %id, %err, "fresh building rejected its working site");
        }
        self.buildings.insert(id, building);
        tracing::debug!(building = %id, ?blueprint, %anchor, site = %site, "building placed");
        Ok(id)
    }

    /// Insert an already-finished building and unfold it immediately.
    /// Used for the starter layout; bypasses cost and connectivity checks.
    pub fn add_finished(
        &mut self,
        blueprint: Blueprint,
        anchor: HexCoord,
        stock: ResourceLedger,
    ) -> Result<BuildingId, BuildingError> {
        let id = self.building_ids.next_building();
        let mut building = Building::finished(id, blueprint, anchor);
        if let Some(s) = building.stock_mut() {
            *s = stock;
        }
        self.buildings.insert(id, building);
        self.add_extension(id)?;
        Ok(id)
    }

    // -- Resource flow --

    /// Deliver a package to a building's ledger; unfolds it when finished.
    pub fn deliver(&mut self, id: BuildingId, package: Package) -> Result<Delivery, BuildingError> {
        let building = self
            .buildings
            .get_mut(&id)
            .ok_or(BuildingError::UnknownBuilding(id))?;
        let delivery = building.add_material(package)?;
        if delivery.finished {
            tracing::info!(building = %id, blueprint = ?building.blueprint, "building finished");
            self.add_extension(id)?;
        }
        Ok(delivery)
    }

    /// Withdraw from a warehouse, clamped to its stock. Zero for anything
    /// that is not a finished warehouse.
    pub fn take_from_warehouse(&mut self, id: BuildingId, kind: ResourceKind, amount: u32) -> u32 {
        self.buildings
            .get_mut(&id)
            .filter(|b| b.is_finished())
            .and_then(|b| b.stock_mut())
            .map_or(0, |stock| stock.take(kind, amount))
    }

    /// Add to a warehouse's stock. Returns false if `id` is not a finished
    /// warehouse.
    pub fn deposit_to_warehouse(&mut self, id: BuildingId, package: Package) -> bool {
        match self
            .buildings
            .get_mut(&id)
            .filter(|b| b.is_finished())
            .and_then(|b| b.stock_mut())
        {
            Some(stock) => {
                stock.add(package.kind, package.amount);
                true
            }
            None => false,
        }
    }
}
