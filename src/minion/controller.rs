use std::collections::VecDeque;

use bevy_ecs::component::Component;

use crate::id::HexId;
use crate::model::WorldPoint;

/// A point to walk to and the hexagon it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub point: WorldPoint,
    pub hexagon: HexId,
}

/// What happened during one controller update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    /// Hexagon of the waypoint reached this frame.
    pub reached: Option<HexId>,
    /// The last waypoint was reached and the controller stopped.
    pub arrived: bool,
}

/// Straight-line movement through a FIFO queue of waypoints.
///
/// A waypoint is reached when the remaining distance drops under the
/// epsilon, or grows compared to the previous frame (a large step carried
/// the minion past it). Either way the position snaps onto the waypoint.
#[derive(Component, Debug, Clone, Default)]
pub struct MinionController {
    current: Option<Waypoint>,
    queue: VecDeque<Waypoint>,
    last_distance: Option<f64>,
}

impl MinionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_moving(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<Waypoint> {
        self.current
    }

    /// Final waypoint of the active route.
    pub fn destination(&self) -> Option<Waypoint> {
        self.queue.back().copied().or(self.current)
    }

    /// Waypoints left, including the current one.
    pub fn remaining(&self) -> usize {
        self.queue.len() + usize::from(self.current.is_some())
    }

    /// Replace any active route with `route`.
    pub fn move_to(&mut self, route: impl IntoIterator<Item = Waypoint>) {
        self.stop();
        self.queue.extend(route);
        self.current = self.queue.pop_front();
    }

    pub fn stop(&mut self) {
        self.current = None;
        self.queue.clear();
        self.last_distance = None;
    }

    /// Advance `position` by `step` world units toward the current waypoint.
    pub fn update(&mut self, position: &mut WorldPoint, step: f64, epsilon: f64) -> StepOutcome {
        let Some(target) = self.current else {
            return StepOutcome::default();
        };

        let distance = position.distance(target.point);
        let overshot = self.last_distance.is_some_and(|last| distance > last);
        if distance < epsilon || overshot {
            *position = target.point;
            self.last_distance = None;
            self.current = self.queue.pop_front();
            return StepOutcome {
                reached: Some(target.hexagon),
                arrived: self.current.is_none(),
            };
        }

        let direction = (target.point - *position).normalized();
        *position = *position + direction * step;
        self.last_distance = Some(distance);
        StepOutcome::default()
    }
}
