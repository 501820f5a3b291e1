use bevy_app::App;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::config::GameConfig;
use crate::ecs::clock::FrameClock;
use crate::ecs::events::{BuildingFinished, ResourceDelivered};
use crate::ecs::schedule::{FramePhase, FrameTick};
use crate::minion::{Minion, MinionController, MinionHandle, Orders, StrategyCtx};
use crate::model::Base;
use crate::visuals::Visuals;

use super::publish_strategy_events;

/// Count down each minion's decision cadence and its strategy's own timers.
pub fn tick_orders(
    clock: Res<FrameClock>,
    config: Res<GameConfig>,
    mut base: ResMut<Base>,
    mut visuals: ResMut<Visuals>,
    mut minions: Query<(&mut Minion, &mut MinionController, &mut Orders)>,
    mut delivered: MessageWriter<ResourceDelivered>,
    mut finished: MessageWriter<BuildingFinished>,
) {
    let delta = clock.delta_ms;
    let mut events = Vec::new();
    for (mut minion, mut controller, mut orders) in &mut minions {
        orders.tick_decision(delta);
        let Some(strategy) = orders.strategy_mut() else {
            continue;
        };
        let mut handle = MinionHandle::new(&mut minion, &mut controller);
        let mut ctx = StrategyCtx {
            base: &mut base,
            visuals: visuals.backend_mut(),
            config: &config,
            events: &mut events,
        };
        strategy.tick(delta, &mut handle, &mut ctx);
    }
    let (d, f) = publish_strategy_events(events);
    delivered.write_batch(d);
    finished.write_batch(f);
}

pub fn add_timer_systems(app: &mut App) {
    app.add_systems(FrameTick, tick_orders.in_set(FramePhase::Timers));
}
