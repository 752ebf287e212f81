//! The payment window countdown.
//!
//! `Active → Expired`, driven by `tick(now)` against the wall clock. The
//! transition fires exactly once; after that the machine stays `Expired`
//! no matter how often it is ticked.

use crate::utils::format_countdown;
use chrono::{DateTime, Utc};

/// Observable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Active,
    Expired,
}

/// What one tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still inside the window; render the remaining time.
    Remaining {
        /// Whole seconds until the deadline.
        seconds: i64,
    },
    /// The deadline just passed on this tick: disable the pay action and
    /// notify the user. Fires at most once per page instance.
    JustExpired,
    /// The window was already over before this tick.
    Expired,
}

/// Countdown state machine over a fixed wall-clock deadline.
#[derive(Debug, Clone)]
pub struct Countdown {
    deadline: DateTime<Utc>,
    state: CountdownState,
}

impl Countdown {
    /// Create an active countdown ending at `deadline`.
    #[must_use]
    pub fn new(deadline: DateTime<Utc>) -> Self {
        Self {
            deadline,
            state: CountdownState::Active,
        }
    }

    /// The wall-clock deadline.
    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Whether the window is still open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == CountdownState::Active
    }

    /// Advance the machine against the wall clock.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        match self.state {
            CountdownState::Expired => Tick::Expired,
            CountdownState::Active => {
                let remaining = (self.deadline - now).num_seconds();
                if remaining < 0 {
                    self.state = CountdownState::Expired;
                    Tick::JustExpired
                } else {
                    Tick::Remaining { seconds: remaining }
                }
            }
        }
    }

    /// Render the timer: `HH:MM:SS` while active, `EXPIRED` afterwards.
    #[must_use]
    pub fn display(&self, now: DateTime<Utc>) -> String {
        match self.state {
            CountdownState::Expired => "EXPIRED".to_string(),
            CountdownState::Active => {
                format_countdown((self.deadline - now).num_seconds())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn start() -> DateTime<Utc> {
        "2026-08-07T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn remaining_decreases_monotonically() {
        let t0 = start();
        let mut countdown = Countdown::new(t0 + Duration::hours(24));

        let mut last = i64::MAX;
        for minutes in [0, 1, 60, 600, 1439] {
            let tick = countdown.tick(t0 + Duration::minutes(minutes));
            match tick {
                Tick::Remaining { seconds } => {
                    assert!(seconds < last);
                    last = seconds;
                }
                other => panic!("window should be open, got {:?}", other),
            }
        }
    }

    #[test]
    fn renders_modulo_day() {
        let t0 = start();
        let countdown = Countdown::new(t0 + Duration::hours(24));
        // A full 24h window displays as 23:59:59 one second in.
        assert_eq!(countdown.display(t0 + Duration::seconds(1)), "23:59:59");
    }

    #[test]
    fn expiry_fires_once_then_sticks() {
        let t0 = start();
        let mut countdown = Countdown::new(t0 + Duration::seconds(10));

        assert_eq!(
            countdown.tick(t0 + Duration::seconds(10)),
            Tick::Remaining { seconds: 0 }
        );
        assert_eq!(countdown.tick(t0 + Duration::seconds(11)), Tick::JustExpired);
        assert!(!countdown.is_active());
        assert_eq!(countdown.tick(t0 + Duration::seconds(12)), Tick::Expired);
        assert_eq!(countdown.display(t0 + Duration::seconds(13)), "EXPIRED");
    }

    #[test]
    fn an_expired_window_never_reopens() {
        let t0 = start();
        let mut countdown = Countdown::new(t0 + Duration::seconds(1));
        countdown.tick(t0 + Duration::seconds(2));
        assert_eq!(countdown.state(), CountdownState::Expired);

        // Even a tick with an earlier clock cannot reactivate it.
        assert_eq!(countdown.tick(t0), Tick::Expired);
        assert_eq!(countdown.state(), CountdownState::Expired);
    }
}
