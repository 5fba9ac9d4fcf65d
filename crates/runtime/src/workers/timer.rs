//! Deferred continuation for automatic enemy turns.

use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep};

/// A single cancellable deadline owned by the battle worker.
///
/// The worker arms it when a turn lands on an enemy and disarms it when the
/// battle ends. A disarmed timer never completes, so it can sit in a
/// `select!` loop without firing.
#[derive(Debug, Default)]
pub struct EnemyTurnTimer {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl EnemyTurnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the continuation `delay` from now, replacing any earlier one.
    pub fn arm(&mut self, delay: Duration) {
        self.sleep = Some(Box::pin(tokio::time::sleep_until(Instant::now() + delay)));
    }

    /// Cancels a pending continuation. Returns whether one was pending.
    pub fn disarm(&mut self) -> bool {
        self.sleep.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }

    /// Completes when the armed deadline passes, then disarms itself.
    ///
    /// Cancel safe: dropping the future keeps the deadline armed.
    pub async fn fired(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => std::future::pending().await,
        }
    }
}
