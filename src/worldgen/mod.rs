pub mod config;
pub mod starter;
pub mod terrain;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::id::IdGenerator;
use crate::model::{HexCoord, HexMap, Hexagon, ResourceKind, ResourceSlot, Terrain};

pub use config::MapGenConfig;
pub use starter::{StarterLayout, build_starter_base};

/// Generate the island: concentric terrain rings with resource slots.
///
/// Hexagon ids follow spiral order, so the origin is always `HexId(1)`.
pub fn generate_map(config: &MapGenConfig) -> HexMap {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut ids = IdGenerator::new();
    let mut map = HexMap::new(config.hex_size);

    for coord in HexCoord::ORIGIN.spiral(config.radius) {
        let ring = coord.distance(HexCoord::ORIGIN);
        let terrain = if ring == 0 {
            Terrain::Land
        } else {
            terrain::roll_terrain(ring, config, &mut rng)
        };
        let mut hexagon = Hexagon::new(ids.next_hex(), coord, config.hex_size, terrain);
        if ring > 0
            && let Some((kind, amount)) = terrain::roll_resource(terrain, config, &mut rng)
        {
            hexagon = hexagon.with_resource(kind, amount);
        }
        map.insert(hexagon);
    }

    ensure_starter_wood(&mut map, config.starter_wood);
    tracing::debug!(seed = config.seed, hexagons = map.len(), "island generated");
    map
}

/// Guarantee a Wood slot next to the origin so gathering can start at once.
fn ensure_starter_wood(map: &mut HexMap, amount: u32) {
    if amount == 0 {
        return;
    }
    let ring = HexCoord::ORIGIN.neighbors();
    if ring
        .iter()
        .filter_map(|&c| map.get(c))
        .any(|h| h.resource.as_ref().is_some_and(|s| s.kind == ResourceKind::Wood))
    {
        return;
    }
    let target = ring
        .iter()
        .filter_map(|&c| map.get(c))
        .find(|h| h.terrain.is_buildable() && h.resource.is_none())
        .or_else(|| ring.iter().filter_map(|&c| map.get(c)).find(|h| h.terrain.is_buildable()))
        .map(|h| h.coord);
    if let Some(coord) = target
        && let Some(hexagon) = map.get_mut(coord)
    {
        hexagon.resource = Some(ResourceSlot::new(ResourceKind::Wood, amount));
    }
}
