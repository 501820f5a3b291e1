use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::config::GameConfig;
use crate::ecs::clock::FrameClock;
use crate::ecs::events::MinionArrived;
use crate::ecs::schedule::{FramePhase, FrameTick};
use crate::minion::{Minion, MinionController, MinionHandle};
use crate::visuals::Visuals;

/// Step every walking minion, scaled by frame time.
pub fn move_minions(
    clock: Res<FrameClock>,
    config: Res<GameConfig>,
    mut visuals: ResMut<Visuals>,
    mut minions: Query<(Entity, &mut Minion, &mut MinionController)>,
    mut arrived: MessageWriter<MinionArrived>,
) {
    let step = config.minion_speed * config.frame_ratio(clock.delta_ms);
    for (entity, mut minion, mut controller) in &mut minions {
        if !controller.is_moving() {
            continue;
        }
        let mut handle = MinionHandle::new(&mut minion, &mut controller);
        let outcome = handle.advance(visuals.backend_mut(), step, config.arrival_epsilon);
        if outcome.arrived {
            arrived.write(MinionArrived {
                entity,
                hexagon: handle.hexagon(),
            });
        }
    }
}

pub fn add_movement_systems(app: &mut App) {
    app.add_systems(FrameTick, move_minions.in_set(FramePhase::Movement));
}
