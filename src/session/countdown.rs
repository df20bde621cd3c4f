use std::time::{Duration, Instant};

/// Remaining time of a timed session, recomputed from a fixed deadline on every tick.
#[derive(Clone, Debug)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
    deadline: Option<Instant>,
    running: bool,
}

impl Countdown {
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
            deadline: None,
            running: false,
        }
    }

    /// Arms the deadline. Later calls keep the first deadline.
    /// A total too large to add to `now` leaves a countdown that never expires.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.deadline = now.checked_add(self.total);
    }

    /// Recomputes the remaining time; returns true once the deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        self.remaining = deadline.saturating_duration_since(now);
        self.remaining.is_zero()
    }

    pub fn reset(&mut self) {
        self.remaining = self.total;
        self.deadline = None;
        self.running = false;
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_countdown_never_expires() {
        let mut countdown = Countdown::new(Duration::from_secs(15));
        assert!(!countdown.tick(Instant::now() + Duration::from_secs(60)));
        assert_eq!(countdown.remaining(), Duration::from_secs(15));
    }

    #[test]
    fn test_tick_tracks_deadline() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(30));
        countdown.start(t0);
        assert!(!countdown.tick(t0 + Duration::from_secs(10)));
        assert_eq!(countdown.remaining(), Duration::from_secs(20));
        assert!(countdown.tick(t0 + Duration::from_secs(30)));
        assert_eq!(countdown.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_remaining_saturates_after_deadline() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.start(t0);
        assert!(countdown.tick(t0 + Duration::from_secs(5)));
        assert_eq!(countdown.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_second_start_keeps_deadline() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(30));
        countdown.start(t0);
        countdown.start(t0 + Duration::from_secs(10));
        assert_eq!(countdown.deadline(), Some(t0 + Duration::from_secs(30)));
    }

    #[test]
    fn test_reset_restores_total() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(30));
        countdown.start(t0);
        countdown.tick(t0 + Duration::from_secs(12));
        countdown.reset();
        assert!(!countdown.is_running());
        assert_eq!(countdown.remaining(), countdown.total());
    }

    #[test]
    fn test_unrepresentable_deadline_never_expires() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::MAX);
        countdown.start(t0);
        assert!(countdown.is_running());
        assert_eq!(countdown.deadline(), None);
        assert!(!countdown.tick(t0 + Duration::from_secs(3600)));
        assert_eq!(countdown.remaining(), Duration::MAX);
    }
}
