mod common;

use bevy_ecs::message::Messages;

use common::{add_island, fast_config, starter_base, state_of, test_app, warehouse_stock};
use hex_colony::ecs::test_helpers::{run_frames, run_until};
use hex_colony::ecs::{BuildingFinished, PlayerCommand, place_building, send_command};
use hex_colony::{Blueprint, BuildingShape, BuildingState, HexCoord, ResourceKind, ResourceLedger};

const TRIANGLE: Blueprint = Blueprint::Extension(BuildingShape::Triangle);

fn west() -> HexCoord {
    HexCoord::new(-3, 0)
}

#[test]
fn triangle_is_built_from_warehouse_stock() {
    let (base, warehouse) = starter_base(&[], ResourceLedger::new(10, 0, 0));
    let walkable_before = base.walkable_len();
    let (mut app, _) = test_app(base, fast_config(), &[HexCoord::ORIGIN]);
    let building = place_building(app.world_mut(), TRIANGLE, west().to_world(1.0)).unwrap();
    send_command(&mut app, PlayerCommand::Build);

    let frames = run_until(&mut app, 5_000, |app| {
        common::base(app).building(building).is_some_and(|b| b.is_finished())
    });
    assert!(frames.is_some(), "triangle never finished");

    let messages = app.world().resource::<Messages<BuildingFinished>>();
    let mut cursor = messages.get_cursor();
    assert_eq!(cursor.read(messages).map(|m| m.building).collect::<Vec<_>>(), vec![building]);

    let base = common::base(&app);
    let built = base.building(building).unwrap();
    assert_eq!(built.state(), BuildingState::Finished);
    assert_eq!(built.received().wood, 10);
    assert!(built.incoming().is_zero());
    assert_eq!(warehouse_stock(&app, warehouse, ResourceKind::Wood), 0);
    assert_eq!(base.walkable_len(), walkable_before + 3);
}

#[test]
fn stop_while_hauling_restores_warehouse() {
    let (base, warehouse) = starter_base(&[], ResourceLedger::new(50, 0, 0));
    let (mut app, minions) = test_app(base, fast_config(), &[HexCoord::ORIGIN]);
    let building = place_building(app.world_mut(), TRIANGLE, west().to_world(1.0)).unwrap();
    send_command(&mut app, PlayerCommand::Build);

    let frames = run_until(&mut app, 2_000, |app| {
        state_of(app, minions[0]) == Some("traveling_to_building")
    });
    assert!(frames.is_some());
    assert_eq!(warehouse_stock(&app, warehouse, ResourceKind::Wood), 40);

    send_command(&mut app, PlayerCommand::Stop);
    run_frames(&mut app, 1);

    let base = common::base(&app);
    let site = base.building(building).unwrap();
    assert_eq!(warehouse_stock(&app, warehouse, ResourceKind::Wood), 50);
    assert!(site.incoming().is_zero());
    assert!(site.received().is_zero());
    assert_eq!(site.state(), BuildingState::WaitingForMinion);
}

#[test]
fn two_builders_finish_two_sites() {
    let (base, warehouse) = starter_base(&[], ResourceLedger::new(50, 0, 0));
    let (mut app, _) = test_app(base, fast_config(), &[HexCoord::ORIGIN, HexCoord::ORIGIN]);
    let first = place_building(app.world_mut(), TRIANGLE, west().to_world(1.0)).unwrap();
    let second = place_building(app.world_mut(), TRIANGLE, HexCoord::new(0, -3).to_world(1.0)).unwrap();
    send_command(&mut app, PlayerCommand::Build);

    let frames = run_until(&mut app, 10_000, |app| {
        let base = common::base(app);
        [first, second]
            .iter()
            .all(|&id| base.building(id).is_some_and(|b| b.is_finished()))
    });
    assert!(frames.is_some(), "sites not finished");
    assert_eq!(warehouse_stock(&app, warehouse, ResourceKind::Wood), 30);
}

#[test]
fn unaffordable_placement_is_rejected() {
    let (base, _) = starter_base(&[], ResourceLedger::new(5, 0, 0));
    let (mut app, _) = test_app(base, fast_config(), &[]);
    send_command(
        &mut app,
        PlayerCommand::PlaceBuilding {
            blueprint: TRIANGLE,
            point: west().to_world(1.0),
        },
    );
    run_frames(&mut app, 1);

    assert!(common::base(&app).buildings().all(|b| b.is_finished()));
}

#[test]
fn placement_command_accepts_affordable_site() {
    let (base, _) = starter_base(&[], ResourceLedger::new(10, 0, 0));
    let (mut app, _) = test_app(base, fast_config(), &[]);
    send_command(
        &mut app,
        PlayerCommand::PlaceBuilding {
            blueprint: TRIANGLE,
            point: west().to_world(1.0),
        },
    );
    run_frames(&mut app, 1);

    let base = common::base(&app);
    let waiting: Vec<_> = base.buildings().filter(|b| !b.is_finished()).collect();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].state(), BuildingState::WaitingForMinion);
    assert!(waiting[0].working_site().is_some());
}

#[test]
fn received_only_grows_and_finish_fires_once() {
    let (base, _) = starter_base(&[], ResourceLedger::new(40, 30, 10));
    let (mut app, _) = test_app(base, fast_config(), &[HexCoord::ORIGIN, HexCoord::ORIGIN]);
    let building = place_building(
        app.world_mut(),
        Blueprint::Extension(BuildingShape::Line),
        HexCoord::new(-4, 0).to_world(1.0),
    )
    .unwrap();
    send_command(&mut app, PlayerCommand::Build);

    let mut cursor = app.world().resource::<Messages<BuildingFinished>>().get_cursor();
    let mut finished = 0;
    let mut last = ResourceLedger::default();
    for _ in 0..5_000 {
        run_frames(&mut app, 1);
        let received = common::base(&app).building(building).unwrap().received();
        for kind in ResourceKind::ALL {
            assert!(received.get(kind) >= last.get(kind), "{kind:?} went down");
        }
        last = received;
        let messages = app.world().resource::<Messages<BuildingFinished>>();
        finished += cursor.read(messages).filter(|m| m.building == building).count();
    }

    assert_eq!(finished, 1);
    assert_eq!(last, ResourceLedger::new(10, 5, 0));
}

#[test]
fn site_beside_detached_extension_gets_no_builder() {
    let (mut base, warehouse) = starter_base(&[], ResourceLedger::new(50, 0, 0));
    add_island(&mut base);
    // Touches only the island, so its working site is there.
    let stranded = base.place(TRIANGLE, HexCoord::new(-5, 2)).unwrap();
    let site = base.building(stranded).and_then(|b| b.working_site()).unwrap();
    let origin = base.hex_at(HexCoord::ORIGIN).unwrap();
    assert_eq!(base.get_path_from_to(origin, site), None);

    let (mut app, minions) = test_app(base, fast_config(), &[HexCoord::ORIGIN]);
    send_command(&mut app, PlayerCommand::Build);
    run_frames(&mut app, 120);

    assert_eq!(state_of(&app, minions[0]), Some("idle"));
    let building = common::base(&app).building(stranded).unwrap();
    assert_eq!(building.state(), BuildingState::WaitingForMinion);
    assert!(building.incoming().is_zero());
    assert_eq!(warehouse_stock(&app, warehouse, ResourceKind::Wood), 50);
}
