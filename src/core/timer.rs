//! Self-contained timers - accumulate delta time and decide when to fire.
//! The host loop owns the clock; timers only ever see deltas in seconds.
use std::cell::Cell;
use std::rc::Rc;

/// Countdown timer - fires once after duration
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create inactive countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Create countdown that is already running
    pub fn started(duration: f32) -> Self {
        let mut countdown = Self::new(duration);
        countdown.start();
        countdown
    }

    /// Start countdown
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Tick with delta, returns true if completed
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get progress [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

/// Shared cancellation flag for one scheduled task
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A render waiting out the debounce delay
#[derive(Debug, Clone)]
struct Scheduled {
    countdown: Countdown,
    epoch: u64,
    token: CancelToken,
}

/// A scheduled task whose delay has run out
#[derive(Debug, Clone)]
pub struct Fired {
    /// Epoch the task was tagged with when scheduled
    pub epoch: u64,
    pub token: CancelToken,
}

/// Trailing-edge debounce queue.
///
/// Every `schedule` queues its own countdown tagged with an epoch; the owner
/// decides on firing whether the tag is still current. `cancel_all` trips every
/// pending token so nothing queued before it can run.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: f32,
    pending: Vec<Scheduled>,
}

impl Debouncer {
    pub fn new(delay: f32) -> Self {
        Self {
            delay,
            pending: Vec::new(),
        }
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Queue a task tagged with `epoch`; the returned token cancels just this task
    pub fn schedule(&mut self, epoch: u64) -> CancelToken {
        let token = CancelToken::new();
        self.pending.push(Scheduled {
            countdown: Countdown::started(self.delay),
            epoch,
            token: token.clone(),
        });
        token
    }

    /// Advance every pending countdown; returns the tasks that came due, oldest first.
    /// Cancelled tasks are dropped without being returned.
    pub fn tick(&mut self, delta: f32) -> Vec<Fired> {
        let mut fired = Vec::new();

        self.pending.retain_mut(|task| {
            if task.token.is_cancelled() {
                return false;
            }
            if task.countdown.tick(delta) {
                fired.push(Fired {
                    epoch: task.epoch,
                    token: task.token.clone(),
                });
                return false;
            }
            true
        });

        fired
    }

    /// Cancel and drop everything pending; returns how many were cancelled
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.iter().filter(|t| !t.token.is_cancelled()).count();
        for task in self.pending.drain(..) {
            task.token.cancel();
        }
        count
    }

    /// Tasks still waiting (cancelled ones excluded)
    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|t| !t.token.is_cancelled()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once() {
        let mut timer = Countdown::new(1.0);

        assert!(!timer.tick(0.5)); // Inactive

        timer.start();
        assert!(!timer.tick(0.5)); // In progress
        assert_eq!(timer.progress(), 0.5);

        assert!(timer.tick(0.6)); // Complete
        assert!(!timer.tick(0.1)); // Inactive again
    }

    #[test]
    fn countdown_zero_duration_fires_on_first_tick() {
        let mut timer = Countdown::started(0.0);
        assert!(timer.tick(0.0));
    }

    #[test]
    fn debouncer_fires_after_delay() {
        let mut debouncer = Debouncer::new(0.2);
        debouncer.schedule(1);

        assert!(debouncer.tick(0.1).is_empty());
        let fired = debouncer.tick(0.15);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].epoch, 1);
        assert_eq!(debouncer.pending(), 0);
    }

    #[test]
    fn debouncer_keeps_each_schedule() {
        let mut debouncer = Debouncer::new(0.2);
        debouncer.schedule(1);
        debouncer.tick(0.1);
        debouncer.schedule(2);

        let first = debouncer.tick(0.15);
        assert_eq!(first.iter().map(|f| f.epoch).collect::<Vec<_>>(), vec![1]);

        let second = debouncer.tick(0.1);
        assert_eq!(second.iter().map(|f| f.epoch).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn token_cancels_single_task() {
        let mut debouncer = Debouncer::new(0.2);
        let token = debouncer.schedule(1);
        debouncer.schedule(2);
        token.cancel();

        assert_eq!(debouncer.pending(), 1);
        let fired = debouncer.tick(0.5);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].epoch, 2);
    }

    #[test]
    fn cancel_all_drops_pending() {
        let mut debouncer = Debouncer::new(0.2);
        let a = debouncer.schedule(1);
        let b = debouncer.schedule(2);

        assert_eq!(debouncer.cancel_all(), 2);
        assert!(a.is_cancelled() && b.is_cancelled());
        assert!(debouncer.tick(1.0).is_empty());
    }
}
