/// Decides when a pending line clear is resolved.
///
/// [`GameController`](super::GameController) calls [`schedule`](Self::schedule)
/// after a clearing move and [`tick`](Self::tick) once per frame; the clear is
/// resolved on the tick that returns `true`. Front ends with their own timers
/// can supply another implementation.
pub trait ClearScheduler {
    /// Arms the scheduler to fire after `ticks` calls to [`tick`](Self::tick).
    fn schedule(&mut self, ticks: u32);

    /// Advances by one tick and returns whether the pending clear is due now.
    fn tick(&mut self) -> bool;

    fn is_pending(&self) -> bool;

    /// Drops any pending clear without firing.
    fn cancel(&mut self);
}

/// Counts down a fixed number of ticks.
///
/// Scheduling zero ticks behaves like one: the clear fires on the next tick,
/// so the marked cells are always observable for at least one frame.
///
/// # Example
///
/// ```
/// use blockblast_engine::{ClearScheduler, TickScheduler};
///
/// let mut scheduler = TickScheduler::default();
/// scheduler.schedule(2);
/// assert!(!scheduler.tick());
/// assert!(scheduler.tick());
/// assert!(!scheduler.is_pending());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickScheduler {
    remaining: Option<u32>,
}

impl TickScheduler {
    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        self.remaining
    }
}

impl ClearScheduler for TickScheduler {
    fn schedule(&mut self, ticks: u32) {
        self.remaining = Some(ticks.max(1));
    }

    fn tick(&mut self) -> bool {
        match self.remaining {
            Some(1) => {
                self.remaining = None;
                true
            }
            Some(n) => {
                self.remaining = Some(n - 1);
                false
            }
            None => false,
        }
    }

    fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    fn cancel(&mut self) {
        self.remaining = None;
    }
}
