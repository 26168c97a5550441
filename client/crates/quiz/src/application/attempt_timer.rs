//! Attempt Timer
//!
//! Drives a [`Countdown`] once per second on a tokio task. Remaining seconds
//! are published through a `watch` channel and the timeout through a
//! oneshot. The [`TimerHandle`] owns the task: cancelling or dropping it
//! aborts the task, and the countdown is marked cancelled under the same
//! lock the task ticks through, so no tick lands after teardown.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::domain::countdown::{Countdown, Tick, TimerState};

const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct AttemptTimer;

impl AttemptTimer {
    /// Start counting down `duration_seconds`
    ///
    /// A duration of zero or less is expired on return; the timeout signal
    /// has already fired and no task is spawned.
    pub fn start(duration_seconds: i64) -> TimerHandle {
        let mut countdown = Countdown::new();
        let first = countdown.start(duration_seconds);

        let (remaining_tx, remaining_rx) = watch::channel(countdown.remaining());
        let (timeout_tx, timeout_rx) = oneshot::channel();
        let countdown = Arc::new(Mutex::new(countdown));

        let task = match first {
            Tick::Remaining(_) => Some(tokio::spawn(run(
                Arc::clone(&countdown),
                remaining_tx,
                timeout_tx,
            ))),
            Tick::Expired | Tick::Ignored => {
                tracing::info!(duration_seconds, "Attempt started with no time left");
                let _ = timeout_tx.send(());
                None
            }
        };

        TimerHandle {
            countdown,
            remaining: remaining_rx,
            timeout: Some(timeout_rx),
            task,
        }
    }
}

async fn run(
    countdown: Arc<Mutex<Countdown>>,
    remaining: watch::Sender<u32>,
    timeout: oneshot::Sender<()>,
) {
    let mut ticks = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        ticks.tick().await;
        let tick = lock(&countdown).tick();

        match tick {
            Tick::Remaining(seconds) => {
                remaining.send_replace(seconds);
            }
            Tick::Expired => {
                remaining.send_replace(0);
                tracing::info!("Attempt timer expired");
                let _ = timeout.send(());
                return;
            }
            Tick::Ignored => return,
        }
    }
}

fn lock(countdown: &Mutex<Countdown>) -> MutexGuard<'_, Countdown> {
    countdown
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owner of a running attempt timer
#[derive(Debug)]
pub struct TimerHandle {
    countdown: Arc<Mutex<Countdown>>,
    remaining: watch::Receiver<u32>,
    timeout: Option<oneshot::Receiver<()>>,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    /// Observe the remaining seconds as they tick down
    pub fn watch_remaining(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    pub fn state(&self) -> TimerState {
        lock(&self.countdown).state()
    }

    pub fn is_expired(&self) -> bool {
        lock(&self.countdown).is_expired()
    }

    /// Wait for the timeout signal
    ///
    /// Returns `true` once the timer has expired and `false` if it was
    /// cancelled first. Safe to use in `tokio::select!`.
    pub async fn expired(&mut self) -> bool {
        if let Some(rx) = self.timeout.as_mut() {
            let fired = rx.await.is_ok();
            self.timeout = None;
            return fired;
        }
        self.is_expired()
    }

    /// Stop the timer; an already expired timer stays expired
    pub fn cancel(&mut self) {
        let cancelled = lock(&self.countdown).cancel();
        if let Some(task) = self.task.take() {
            task.abort();
            if cancelled {
                tracing::debug!("Attempt timer cancelled");
            }
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
