use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for a frame loop. Checked at the top of every frame;
/// once cancelled, no further frames are scheduled.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Fixed-step pacing: how many logical ticks are due given elapsed time.
/// Leftover time carries over; the backlog is capped so a stall does not
/// turn into a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct TickClock {
    step_ms: f64,
    max_backlog: u32,
    accumulated: f64,
    last: Option<f64>,
}

impl TickClock {
    pub fn new(step_ms: f64, max_backlog: u32) -> Self {
        Self {
            step_ms,
            max_backlog,
            accumulated: 0.0,
            last: None,
        }
    }

    /// Number of ticks to run at time `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last.replace(now_ms) else {
            return 0;
        };

        self.accumulated += (now_ms - last).max(0.0);
        let due = (self.accumulated / self.step_ms).floor();
        self.accumulated -= due * self.step_ms;

        let due = due as u32;
        if due > self.max_backlog {
            self.accumulated = 0.0;
            self.max_backlog
        } else {
            due
        }
    }
}
