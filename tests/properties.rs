mod common;

use proptest::prelude::*;

use common::{fast_config, starter_base, test_app, warehouse_stock};
use hex_colony::ecs::test_helpers::run_frames;
use hex_colony::ecs::{PlayerCommand, place_building, send_command};
use hex_colony::model::DEFAULT_NEIGHBOR_DISTANCE;
use hex_colony::worldgen::{build_starter_base, generate_map};
use hex_colony::{Base, Blueprint, BuildingShape, HexCoord, HexId, MapGenConfig, ResourceKind, ResourceLedger};

/// Generated island with the starter layout plus finished triangles at
/// `anchors`.
fn grown_base(seed: u64, anchors: &[(i32, i32)]) -> Base {
    let config = MapGenConfig {
        seed,
        radius: 8,
        land_radius: 6,
        ..MapGenConfig::default()
    };
    let layout = build_starter_base(generate_map(&config), DEFAULT_NEIGHBOR_DISTANCE, ResourceLedger::default()).unwrap();
    let mut base = layout.base;
    for &(q, r) in anchors {
        base.add_finished(
            Blueprint::Extension(BuildingShape::Triangle),
            HexCoord::new(q, r),
            ResourceLedger::default(),
        )
        .unwrap();
    }
    base
}

fn walkable_ids(base: &Base) -> Vec<HexId> {
    base.walkable().map(|h| h.id).collect()
}

proptest! {
    #[test]
    fn prop_graph_is_symmetric(
        seed in any::<u64>(),
        anchors in prop::collection::vec((-4i32..=4, -4i32..=4), 0..6),
    ) {
        let base = grown_base(seed, &anchors);
        for a in walkable_ids(&base) {
            for &b in base.neighbors(a) {
                prop_assert_ne!(a, b);
                prop_assert!(base.neighbors(b).contains(&a), "{a} -> {b} is one-way");
            }
        }
    }

    #[test]
    fn prop_paths_step_between_neighbors(
        seed in any::<u64>(),
        anchors in prop::collection::vec((-4i32..=4, -4i32..=4), 0..6),
        picks in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
    ) {
        let base = grown_base(seed, &anchors);
        let ids = walkable_ids(&base);
        let from = ids[picks.0.index(ids.len())];
        let to = ids[picks.1.index(ids.len())];

        // Random triangles may float free of the starter layout.
        if let Some(path) = base.get_path_from_to(from, to) {
            prop_assert_eq!(path.is_empty(), from == to);
            let mut prev = from;
            for &step in &path {
                prop_assert!(base.are_neighbors(prev, step));
                prev = step;
            }
            prop_assert_eq!(prev, to);
            let back = base.get_path_from_to(to, from);
            prop_assert_eq!(back.map(|p| p.len()), Some(path.len()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_stopping_a_builder_conserves_wood(frames in 0u32..400) {
        let (base, warehouse) = starter_base(&[], ResourceLedger::new(40, 0, 0));
        let (mut app, _) = test_app(base, fast_config(), &[HexCoord::ORIGIN]);
        let building = place_building(
            app.world_mut(),
            Blueprint::Extension(BuildingShape::Triangle),
            HexCoord::new(-3, 0).to_world(1.0),
        )
        .unwrap();
        send_command(&mut app, PlayerCommand::Build);
        run_frames(&mut app, frames);
        send_command(&mut app, PlayerCommand::Stop);
        run_frames(&mut app, 1);

        let base = common::base(&app);
        let site = base.building(building).unwrap();
        let stock = warehouse_stock(&app, warehouse, ResourceKind::Wood);
        prop_assert!(site.incoming().is_zero());
        prop_assert_eq!(stock + site.received().wood, 40);
    }
}
