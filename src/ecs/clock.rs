use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

/// Frame timing supplied by the host's render loop.
///
/// `advance_frame` stores the frame's delta before the schedule runs;
/// `finish_frame` folds it into the totals in `FramePhase::Last`, so every
/// system in a frame sees the same elapsed time.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameClock {
    pub delta_ms: f64,
    pub elapsed_ms: f64,
    pub frame_count: u64,
}

impl FrameClock {
    pub fn begin_frame(&mut self, delta_ms: f64) {
        self.delta_ms = delta_ms.max(0.0);
    }

    pub fn finish(&mut self) {
        self.elapsed_ms += self.delta_ms;
        self.frame_count += 1;
    }
}

pub fn finish_frame(mut clock: ResMut<FrameClock>) {
    clock.finish();
}
