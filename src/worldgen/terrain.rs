use rand::Rng;

use super::config::MapGenConfig;
use crate::model::{ResourceKind, Terrain};

/// Terrain for a hexagon `ring` steps from the origin, before jitter.
pub fn terrain_for_ring(ring: u32, config: &MapGenConfig) -> Terrain {
    let beach_end = config.land_radius + config.beach_width;
    let shallow_end = beach_end + config.shallow_width;
    if ring <= config.land_radius {
        Terrain::Land
    } else if ring <= beach_end {
        Terrain::Beach
    } else if ring <= shallow_end {
        Terrain::Water
    } else {
        Terrain::DeepWater
    }
}

/// Terrain with coastline jitter. The interior stays solid land.
pub fn roll_terrain<R: Rng + ?Sized>(ring: u32, config: &MapGenConfig, rng: &mut R) -> Terrain {
    if ring < config.land_radius || !rng.random_bool(config.coast_jitter.clamp(0.0, 1.0)) {
        return terrain_for_ring(ring, config);
    }
    let shifted = if rng.random_bool(0.5) {
        ring.saturating_sub(1)
    } else {
        ring + 1
    };
    terrain_for_ring(shifted, config)
}

/// Maybe a deposit for a hexagon of this terrain.
pub fn roll_resource<R: Rng + ?Sized>(
    terrain: Terrain,
    config: &MapGenConfig,
    rng: &mut R,
) -> Option<(ResourceKind, u32)> {
    let kind = match terrain {
        Terrain::Land => {
            let roll: f64 = rng.random();
            if roll < config.wood_chance {
                ResourceKind::Wood
            } else if roll < config.wood_chance + config.rock_chance {
                ResourceKind::Rock
            } else if roll < config.wood_chance + config.rock_chance + config.meat_chance {
                ResourceKind::Meat
            } else {
                return None;
            }
        }
        Terrain::Beach => {
            if rng.random::<f64>() < config.beach_rock_chance {
                ResourceKind::Rock
            } else {
                return None;
            }
        }
        Terrain::Water | Terrain::DeepWater => return None,
    };
    let min = config.resource_amount_min.min(config.resource_amount_max);
    let max = config.resource_amount_max.max(min);
    Some((kind, rng.random_range(min..=max)))
}
