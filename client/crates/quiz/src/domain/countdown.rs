//! Countdown State Machine
//!
//! Idle → Running on start, Running → Expired when the last second ticks
//! away, Running → Cancelled on submission or teardown. Ticks outside
//! Running are no-ops, so the timeout fires exactly once.
//!
//! Time is supplied from outside (one `tick` per second); the attempt timer
//! drives it with a tokio interval.

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running { remaining: u32 },
    Expired,
    Cancelled,
}

/// What a start or tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running with this many seconds left
    Remaining(u32),
    /// The timer just expired; reported once
    Expired,
    /// Not running; nothing happened
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    state: TimerState,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    /// Seed the countdown
    ///
    /// A duration of zero or less expires immediately without running.
    pub fn start(&mut self, duration_seconds: i64) -> Tick {
        if self.state != TimerState::Idle {
            return Tick::Ignored;
        }

        if duration_seconds <= 0 {
            self.state = TimerState::Expired;
            return Tick::Expired;
        }

        let remaining = u32::try_from(duration_seconds).unwrap_or(u32::MAX);
        self.state = TimerState::Running { remaining };
        Tick::Remaining(remaining)
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Tick {
        match self.state {
            TimerState::Running { remaining } if remaining > 1 => {
                self.state = TimerState::Running {
                    remaining: remaining - 1,
                };
                Tick::Remaining(remaining - 1)
            }
            TimerState::Running { .. } => {
                self.state = TimerState::Expired;
                Tick::Expired
            }
            _ => Tick::Ignored,
        }
    }

    /// Stop the countdown; returns `false` if it had already expired
    pub fn cancel(&mut self) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Running { .. } => {
                self.state = TimerState::Cancelled;
                true
            }
            TimerState::Cancelled => true,
            TimerState::Expired => false,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        match self.state {
            TimerState::Running { remaining } => remaining,
            _ => 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Expired
    }
}
