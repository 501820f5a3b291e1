use bevy_app::App;
use bevy_ecs::message::{MessageRegistry, Messages};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};
use bevy_ecs::world::World;

use super::clock::FrameClock;
use super::commands::{PlayerCommand, apply_player_commands};
use super::events::{BuildingFinished, MinionArrived, ResourceDelivered};
use super::schedule::{FramePhase, FrameTick, configure_frame_schedule};
use super::spawn::spawn_starter_minions;
use super::systems::{BuildingVisuals, add_frame_systems};
use crate::config::GameConfig;
use crate::error::BuildingError;
use crate::model::{Base, ResourceLedger};
use crate::visuals::Visuals;
use crate::worldgen::{MapGenConfig, build_starter_base, generate_map};

/// Build a headless game: generated island, starter base, starter minions,
/// and the frame schedule, using the single-threaded executor.
///
/// Manual frame control:
/// ```no_run
/// # use hex_colony::ecs::{advance_frame, build_game_app};
/// # use hex_colony::{GameConfig, MapGenConfig};
/// let mut app = build_game_app(&MapGenConfig::default(), GameConfig::default()).unwrap();
/// for _ in 0..600 {
///     advance_frame(&mut app, 16.67);
/// }
/// ```
pub fn build_game_app(map_config: &MapGenConfig, config: GameConfig) -> Result<App, BuildingError> {
    build_game_app_with_executor(map_config, config, ExecutorKind::SingleThreaded)
}

/// Build a headless game with a specific executor kind.
///
/// Single-threaded keeps minion iteration order (and therefore slot
/// contention outcomes) identical across runs.
pub fn build_game_app_with_executor(
    map_config: &MapGenConfig,
    config: GameConfig,
    executor: ExecutorKind,
) -> Result<App, BuildingError> {
    let map = generate_map(map_config);
    let layout = build_starter_base(map, config.neighbor_distance, config.starting_stock)?;
    let minion_count = config.minion_count;
    let mut app = build_app_with_base(layout.base, config, executor);
    spawn_starter_minions(app.world_mut(), minion_count);
    Ok(app)
}

/// Build the frame schedule around an existing base. No minions are spawned.
pub fn build_app_with_base(base: Base, config: GameConfig, executor: ExecutorKind) -> App {
    let mut app = App::empty();

    app.insert_resource(base);
    app.insert_resource(config);
    app.insert_resource(FrameClock::default());
    app.insert_resource(Visuals::headless());
    app.insert_resource(BuildingVisuals::default());

    MessageRegistry::register_message::<PlayerCommand>(app.world_mut());
    MessageRegistry::register_message::<MinionArrived>(app.world_mut());
    MessageRegistry::register_message::<ResourceDelivered>(app.world_mut());
    MessageRegistry::register_message::<BuildingFinished>(app.world_mut());

    let mut schedule = configure_frame_schedule(executor);
    schedule.add_systems(
        (bevy_ecs::message::message_update_system, apply_player_commands)
            .chain()
            .in_set(FramePhase::PreUpdate),
    );
    app.add_schedule(schedule);
    add_frame_systems(&mut app);
    app
}

/// Record `delta_ms` of frame time and run one `FrameTick`.
pub fn advance_frame(app: &mut App, delta_ms: f64) {
    app.world_mut().resource_mut::<FrameClock>().begin_frame(delta_ms);
    app.world_mut().run_schedule(FrameTick);
}

/// Queue a player command; it is applied at the start of the next frame.
pub fn send_command(app: &mut App, command: PlayerCommand) {
    app.world_mut()
        .resource_mut::<Messages<PlayerCommand>>()
        .write(command);
}

/// Stock summed across finished warehouses, for the HUD.
pub fn resource_totals(world: &World) -> ResourceLedger {
    world.resource::<Base>().resource_totals()
}
