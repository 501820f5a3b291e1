use bevy_app::App;
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::config::GameConfig;
use crate::ecs::events::{BuildingFinished, MinionArrived, ResourceDelivered};
use crate::ecs::schedule::{FramePhase, FrameTick};
use crate::minion::{Minion, MinionController, MinionHandle, Orders, StrategyCtx};
use crate::model::Base;
use crate::visuals::Visuals;

use super::publish_strategy_events;

/// Deliver this frame's arrivals, then run due decision ticks.
pub fn run_strategies(
    config: Res<GameConfig>,
    mut base: ResMut<Base>,
    mut visuals: ResMut<Visuals>,
    mut arrivals: MessageReader<MinionArrived>,
    mut minions: Query<(&mut Minion, &mut MinionController, &mut Orders)>,
    mut delivered: MessageWriter<ResourceDelivered>,
    mut finished: MessageWriter<BuildingFinished>,
) {
    let mut events = Vec::new();

    let arrived: Vec<MinionArrived> = arrivals.read().copied().collect();
    for arrival in arrived {
        let Ok((mut minion, mut controller, mut orders)) = minions.get_mut(arrival.entity) else {
            continue;
        };
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
        strategy.on_arrived(&mut handle, &mut ctx);
    }

    for (mut minion, mut controller, mut orders) in &mut minions {
        if !orders.take_decision() {
            continue;
        }
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
        strategy.apply(&mut handle, &mut ctx);
    }

    let (d, f) = publish_strategy_events(events);
    delivered.write_batch(d);
    finished.write_batch(f);
}

pub fn add_strategy_systems(app: &mut App) {
    app.add_systems(FrameTick, run_strategies.in_set(FramePhase::Strategy));
}
