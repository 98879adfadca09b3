//! Periodic tick schedule driven by the animation clock.

use comet_core::Interval;
use rand::Rng;

/// Whether the schedule is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    /// Ticks fire when due.
    Active {
        /// Animation clock time of the next tick.
        next_due_ms: u64,
    },
    /// No ticks fire until restarted.
    Stopped,
}

/// A jittered periodic timer.
///
/// The schedule does not own a thread or an OS timer. The frame loop polls it
/// with the current time, so cancelling is just a state change.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    state: ScheduleState,
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSchedule {
    /// A stopped schedule.
    pub fn new() -> Self {
        Self {
            state: ScheduleState::Stopped,
        }
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ScheduleState::Active { .. })
    }

    /// When the next tick is due, if running.
    pub fn next_due_ms(&self) -> Option<u64> {
        match self.state {
            ScheduleState::Active { next_due_ms } => Some(next_due_ms),
            ScheduleState::Stopped => None,
        }
    }

    /// Start (or restart) the schedule, first tick one interval from `now_ms`.
    pub fn start<R: Rng + ?Sized>(&mut self, now_ms: u64, interval: &Interval, rng: &mut R) {
        self.state = ScheduleState::Active {
            next_due_ms: now_ms.saturating_add(interval.sample_ms(rng).max(1)),
        };
    }

    /// Returns `true` when a tick is due at `now_ms`, rescheduling the next one.
    ///
    /// Overdue ticks collapse into a single firing.
    pub fn poll<R: Rng + ?Sized>(&mut self, now_ms: u64, interval: &Interval, rng: &mut R) -> bool {
        match self.state {
            ScheduleState::Active { next_due_ms } if now_ms >= next_due_ms => {
                self.start(now_ms, interval, rng);
                true
            }
            _ => false,
        }
    }

    /// Stop the schedule. Returns whether it was running.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = ScheduleState::Stopped;
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_stopped_schedule_never_fires() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut schedule = TickSchedule::new();
        assert!(!schedule.is_active());
        assert!(!schedule.poll(u64::MAX, &Interval::fixed(1.0), &mut rng));
    }

    #[test]
    fn test_fixed_interval_fires_on_time() {
        let mut rng = StdRng::seed_from_u64(0);
        let interval = Interval::fixed(10.0);
        let mut schedule = TickSchedule::new();
        schedule.start(0, &interval, &mut rng);
        assert_eq!(schedule.next_due_ms(), Some(10_000));

        assert!(!schedule.poll(9_999, &interval, &mut rng));
        assert!(schedule.poll(10_000, &interval, &mut rng));
        assert_eq!(schedule.next_due_ms(), Some(20_000));
    }

    #[test]
    fn test_overdue_ticks_coalesce() {
        let mut rng = StdRng::seed_from_u64(0);
        let interval = Interval::fixed(1.0);
        let mut schedule = TickSchedule::new();
        schedule.start(0, &interval, &mut rng);

        assert!(schedule.poll(60_000, &interval, &mut rng));
        assert!(!schedule.poll(60_000, &interval, &mut rng));
        assert_eq!(schedule.next_due_ms(), Some(61_000));
    }

    #[test]
    fn test_jittered_interval_within_bounds() {
        let interval = Interval::new(3.0, 5.0);
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut schedule = TickSchedule::new();
            schedule.start(1_000, &interval, &mut rng);
            let due = schedule.next_due_ms().expect("active");
            assert!((4_000..=6_000).contains(&due), "due at {due}");
        }
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut schedule = TickSchedule::new();
        schedule.start(0, &Interval::fixed(1.0), &mut rng);
        assert!(schedule.cancel());
        assert!(!schedule.cancel());
        assert_eq!(schedule.state(), ScheduleState::Stopped);
    }
}
