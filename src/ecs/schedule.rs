use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::finish_frame;

/// Schedule label for one rendered frame.
/// Run via `advance_frame`, which records the frame time first.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameTick;

/// Ordered phases within each frame.
///
/// ```text
/// PreUpdate → Timers → Movement → Strategy → Last
/// ```
///
/// Player commands land in PreUpdate, so a strategy assigned this frame
/// makes its first decision in this frame's Strategy phase. Arrivals written
/// during Movement are read in Strategy of the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FramePhase {
    PreUpdate,
    Timers,
    Movement,
    Strategy,
    Last,
}

/// Build a configured `FrameTick` schedule with phase ordering.
pub fn configure_frame_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(FrameTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            FramePhase::PreUpdate,
            FramePhase::Timers,
            FramePhase::Movement,
            FramePhase::Strategy,
            FramePhase::Last,
        )
            .chain(),
    );
    schedule.add_systems(finish_frame.in_set(FramePhase::Last));
    schedule
}
