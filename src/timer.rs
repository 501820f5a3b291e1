//! Tick-driven countdown timers.
//!
//! Nothing here reads a clock: the owner calls `tick(delta_ms)` once per
//! frame and reacts to the returned fire counts. A `Scheduler` groups timers
//! and reports completion exactly once, after every member has finished.

/// How many times a timer fires before it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Times(u32),
    Forever,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    delay_ms: f64,
    remaining_ms: f64,
    repeat: Repeat,
    fired: u32,
    finished: bool,
}

impl Timer {
    pub fn new(delay_ms: f64, repeat: Repeat) -> Self {
        let finished = repeat == Repeat::Times(0);
        Self {
            delay_ms,
            remaining_ms: delay_ms,
            repeat,
            fired: 0,
            finished,
        }
    }

    /// Fires once after `delay_ms`.
    pub fn once(delay_ms: f64) -> Self {
        Self::new(delay_ms, Repeat::Times(1))
    }

    /// Fires every `interval_ms` until stopped.
    pub fn every(interval_ms: f64) -> Self {
        Self::new(interval_ms, Repeat::Forever)
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `delta_ms` and return how many times the timer fired.
    ///
    /// A long frame can fire a repeating timer several times, up to the
    /// repeats left. A zero delay fires at most once per tick.
    pub fn tick(&mut self, delta_ms: f64) -> u32 {
        if self.finished {
            return 0;
        }
        self.remaining_ms -= delta_ms.max(0.0);
        if self.remaining_ms > 0.0 {
            return 0;
        }

        let left = match self.repeat {
            Repeat::Times(n) => n.saturating_sub(self.fired),
            Repeat::Forever => u32::MAX,
        };
        let fires = if self.delay_ms <= 0.0 {
            self.remaining_ms = 0.0;
            1
        } else {
            let due = (-self.remaining_ms / self.delay_ms).floor() + 1.0;
            // Float-to-int casts saturate, so a huge backlog clamps to u32::MAX.
            let fires = (due as u32).min(left);
            self.remaining_ms += self.delay_ms * f64::from(fires);
            fires
        };
        self.fired = self.fired.saturating_add(fires);

        if let Repeat::Times(n) = self.repeat
            && self.fired >= n
        {
            self.finished = true;
            self.remaining_ms = 0.0;
        }
        fires
    }

    /// Finish without firing again.
    pub fn stop(&mut self) {
        self.finished = true;
    }

    /// Start over from the full delay.
    pub fn reset(&mut self) {
        self.remaining_ms = self.delay_ms;
        self.fired = 0;
        self.finished = self.repeat == Repeat::Times(0);
    }
}

/// Fire counts for one scheduler tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchedulerTick {
    /// Fires per timer, in insertion order.
    pub fired: Vec<u32>,
    /// True on the single tick where the last timer finished.
    pub completed: bool,
}

/// Fan-in barrier over a set of timers.
///
/// A scheduler containing a `Repeat::Forever` timer never completes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    completed: bool,
    cancelled: bool,
}

impl Scheduler {
    pub fn new(timers: Vec<Timer>) -> Self {
        Self {
            timers,
            completed: false,
            cancelled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn finished_count(&self) -> usize {
        self.timers.iter().filter(|t| t.is_finished()).count()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn tick(&mut self, delta_ms: f64) -> SchedulerTick {
        if self.completed || self.cancelled {
            return SchedulerTick {
                fired: vec![0; self.timers.len()],
                completed: false,
            };
        }
        let fired = self.timers.iter_mut().map(|t| t.tick(delta_ms)).collect();
        let completed = self.finished_count() == self.timers.len();
        self.completed = completed;
        SchedulerTick { fired, completed }
    }

    /// Stop every timer. A cancelled scheduler never reports completion.
    pub fn cancel(&mut self) {
        for timer in &mut self.timers {
            timer.stop();
        }
        self.cancelled = true;
    }
}
