use std::collections::BTreeMap;

use super::geometry::{HexCoord, WorldPoint};
use super::hexagon::Hexagon;

/// All hexagons not yet subsumed into the base, keyed by coordinate.
///
/// BTreeMap for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct HexMap {
    hex_size: f64,
    cells: BTreeMap<HexCoord, Hexagon>,
}

impl HexMap {
    pub fn new(hex_size: f64) -> Self {
        Self {
            hex_size,
            cells: BTreeMap::new(),
        }
    }

    pub fn hex_size(&self) -> f64 {
        self.hex_size
    }

    /// Insert a hexagon. Panics if the coordinate is already present.
    pub fn insert(&mut self, hexagon: Hexagon) {
        let coord = hexagon.coord;
        let prev = self.cells.insert(coord, hexagon);
        assert!(prev.is_none(), "duplicate hexagon at {coord}");
    }

    pub fn get(&self, coord: HexCoord) -> Option<&Hexagon> {
        self.cells.get(&coord)
    }

    pub fn get_mut(&mut self, coord: HexCoord) -> Option<&mut Hexagon> {
        self.cells.get_mut(&coord)
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Remove a hexagon, handing ownership to the caller (the base).
    pub fn take(&mut self, coord: HexCoord) -> Option<Hexagon> {
        self.cells.remove(&coord)
    }

    /// Map coordinate under a ground point.
    pub fn coord_at(&self, point: WorldPoint) -> HexCoord {
        HexCoord::from_world(point, self.hex_size)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hexagon> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::HexId;
    use crate::model::Terrain;

    #[test]
    fn take_removes_cell() {
        let mut map = HexMap::new(1.0);
        map.insert(Hexagon::new(HexId(1), HexCoord::ORIGIN, 1.0, Terrain::Land));
        assert!(map.contains(HexCoord::ORIGIN));
        let taken = map.take(HexCoord::ORIGIN).unwrap();
        assert_eq!(taken.id, HexId(1));
        assert!(map.is_empty());
        assert!(map.take(HexCoord::ORIGIN).is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate hexagon")]
    fn duplicate_insert_panics() {
        let mut map = HexMap::new(1.0);
        map.insert(Hexagon::new(HexId(1), HexCoord::ORIGIN, 1.0, Terrain::Land));
        map.insert(Hexagon::new(HexId(2), HexCoord::ORIGIN, 1.0, Terrain::Land));
    }

    #[test]
    fn coord_at_uses_hex_size() {
        let map = HexMap::new(2.0);
        let p = HexCoord::new(1, 1).to_world(2.0);
        assert_eq!(map.coord_at(p), HexCoord::new(1, 1));
    }
}
