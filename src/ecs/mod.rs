pub mod app;
pub mod clock;
pub mod commands;
pub mod events;
pub mod schedule;
pub mod spawn;
pub mod systems;
pub mod test_helpers;

pub use app::{
    advance_frame, build_app_with_base, build_game_app, build_game_app_with_executor,
    resource_totals, send_command,
};
pub use clock::FrameClock;
pub use commands::{PlayerCommand, place_building};
pub use events::{BuildingFinished, MinionArrived, ResourceDelivered};
pub use schedule::{FramePhase, FrameTick, configure_frame_schedule};
pub use systems::{BuildingModel, BuildingVisuals};
pub use spawn::{spawn_minion, spawn_starter_minions};
