//! Cancellable one-second countdown task.
//!
//! The session controller owns at most one [`Countdown`] at a time; the
//! event loop driving the session forwards each received [`Tick`] into
//! [`crate::session::SessionController::tick`].

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

/// Marker sent once per second while a countdown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Handle to a running countdown task. Dropping the handle aborts the task.
pub struct Countdown {
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Spawn a task that sends one [`Tick`] per second until cancelled or
    /// the receiver is dropped. Requires a running tokio runtime.
    pub fn start() -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately; skip it so the
            // first Tick arrives a full second after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Tick).await.is_err() {
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }

    /// Stop the countdown. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
