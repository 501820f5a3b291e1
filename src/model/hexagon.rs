use serde::{Deserialize, Serialize};

use super::geometry::{HexCoord, WorldPoint};
use super::resource::ResourceKind;
use crate::error::SlotError;
use crate::id::HexId;

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Land,
    Beach,
    Water,
    DeepWater,
}

impl Terrain {
    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Land => "land",
            Terrain::Beach => "beach",
            Terrain::Water => "water",
            Terrain::DeepWater => "deep_water",
        }
    }

    /// Whether a building footprint may cover this terrain.
    pub fn is_buildable(self) -> bool {
        matches!(self, Terrain::Land | Terrain::Beach)
    }
}

// ---------------------------------------------------------------------------
// ResourceSlot
// ---------------------------------------------------------------------------

/// Per-hexagon resource deposit with an exclusive gathering claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSlot {
    pub kind: ResourceKind,
    amount: u32,
    occupied: bool,
}

impl ResourceSlot {
    pub fn new(kind: ResourceKind, amount: u32) -> Self {
        Self {
            kind,
            amount,
            occupied: false,
        }
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Not occupied and not exhausted.
    pub fn is_available(&self) -> bool {
        !self.occupied && self.amount > 0
    }

    pub fn occupy(&mut self) -> Result<(), SlotError> {
        if self.occupied {
            return Err(SlotError::Occupied);
        }
        if self.amount == 0 {
            return Err(SlotError::Depleted);
        }
        self.occupied = true;
        Ok(())
    }

    pub fn release(&mut self) {
        self.occupied = false;
    }

    /// Remove up to `amount` from the deposit. Returns what was extracted.
    pub fn extract(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.amount);
        self.amount -= taken;
        taken
    }

    /// Put back a package that was extracted but never delivered.
    pub fn restore(&mut self, amount: u32) {
        self.amount = self.amount.saturating_add(amount);
    }
}

// ---------------------------------------------------------------------------
// Hexagon
// ---------------------------------------------------------------------------

/// A single map cell. Equality is by coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hexagon {
    pub id: HexId,
    pub coord: HexCoord,
    pub center: WorldPoint,
    pub terrain: Terrain,
    pub resource: Option<ResourceSlot>,
}

impl Hexagon {
    pub fn new(id: HexId, coord: HexCoord, hex_size: f64, terrain: Terrain) -> Self {
        Self {
            id,
            coord,
            center: coord.to_world(hex_size),
            terrain,
            resource: None,
        }
    }

    pub fn with_resource(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.resource = Some(ResourceSlot::new(kind, amount));
        self
    }

    /// True if this hexagon holds an available slot of `kind`.
    pub fn offers(&self, kind: ResourceKind) -> bool {
        self.resource
            .as_ref()
            .is_some_and(|slot| slot.kind == kind && slot.is_available())
    }
}

impl PartialEq for Hexagon {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Hexagon {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_tracks_occupancy_and_amount() {
        let mut slot = ResourceSlot::new(ResourceKind::Wood, 10);
        assert!(slot.is_available());
        slot.occupy().unwrap();
        assert!(!slot.is_available());
        assert_eq!(slot.occupy(), Err(SlotError::Occupied));
        slot.release();
        assert!(slot.is_available());
    }

    #[test]
    fn depleted_slot_rejects_claim() {
        let mut slot = ResourceSlot::new(ResourceKind::Rock, 5);
        assert_eq!(slot.extract(10), 5);
        assert!(!slot.is_available());
        assert_eq!(slot.occupy(), Err(SlotError::Depleted));
        slot.restore(5);
        assert!(slot.is_available());
    }

    #[test]
    fn hexagons_compare_by_coord() {
        let a = Hexagon::new(HexId(1), HexCoord::new(1, 2), 1.0, Terrain::Land);
        let b = Hexagon::new(HexId(9), HexCoord::new(1, 2), 1.0, Terrain::Beach);
        let c = Hexagon::new(HexId(1), HexCoord::new(2, 1), 1.0, Terrain::Land);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn offers_matches_kind_and_availability() {
        let hex = Hexagon::new(HexId(1), HexCoord::ORIGIN, 1.0, Terrain::Land)
            .with_resource(ResourceKind::Meat, 3);
        assert!(hex.offers(ResourceKind::Meat));
        assert!(!hex.offers(ResourceKind::Wood));
    }
}
