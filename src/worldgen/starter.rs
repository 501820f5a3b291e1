use crate::error::BuildingError;
use crate::id::BuildingId;
use crate::model::{Base, Blueprint, BuildingShape, HexCoord, HexMap, ResourceLedger};

/// Anchor of the starter warehouse, just outside the origin flower.
pub const STARTER_WAREHOUSE_ANCHOR: HexCoord = HexCoord { q: 2, r: 0 };

/// A base with the session's pre-built buildings unfolded.
#[derive(Debug, Clone)]
pub struct StarterLayout {
    pub base: Base,
    pub extension: BuildingId,
    pub warehouse: BuildingId,
}

/// Unfold a Flower extension at the origin and a stocked warehouse next to
/// it. Both bypass cost and connectivity checks.
pub fn build_starter_base(
    map: HexMap,
    neighbor_distance: f64,
    starting_stock: ResourceLedger,
) -> Result<StarterLayout, BuildingError> {
    let mut base = Base::new(map, neighbor_distance);
    let extension = base.add_finished(
        Blueprint::Extension(BuildingShape::Flower),
        HexCoord::ORIGIN,
        ResourceLedger::ZERO,
    )?;
    let warehouse = base.add_finished(Blueprint::Warehouse, STARTER_WAREHOUSE_ANCHOR, starting_stock)?;
    tracing::info!(walkable = base.walkable_len(), stock = ?starting_stock, "starter base ready");
    Ok(StarterLayout {
        base,
        extension,
        warehouse,
    })
}
