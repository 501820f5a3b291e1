use bevy_app::App;

use super::app::advance_frame;
use super::clock::FrameClock;

/// Delta used by the helpers: one 60 Hz frame.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Run `n` frames of `FRAME_MS`.
pub fn run_frames(app: &mut App, n: u32) {
    for _ in 0..n {
        advance_frame(app, FRAME_MS);
    }
}

/// Run frames until `done` holds. Returns the number of frames run, or
/// `None` if `limit` was reached first.
pub fn run_until(app: &mut App, limit: u32, mut done: impl FnMut(&App) -> bool) -> Option<u32> {
    for frame in 0..limit {
        if done(app) {
            return Some(frame);
        }
        advance_frame(app, FRAME_MS);
    }
    done(app).then_some(limit)
}

/// Frames run so far.
pub fn frame_count(app: &App) -> u64 {
    app.world().resource::<FrameClock>().frame_count
}
