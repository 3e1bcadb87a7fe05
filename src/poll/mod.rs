//! Owned, cancellable polling tasks.
//!
//! Each view's refresh loop runs as a tokio task bound to a watch-channel
//! shutdown signal. Cancellation is deterministic: after `stop` resolves,
//! no further ticks fire for that loop. Dropping the handle also shuts the
//! loop down.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to one polling loop.
pub struct PollHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn new(shutdown: watch::Sender<bool>, task: JoinHandle<()>) -> Self {
        PollHandle { shutdown, task }
    }

    /// Signal the loop to stop without waiting for it.
    pub fn cancel(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Cancel and wait for the loop to finish.
    pub async fn stop(self) {
        self.cancel();
        let _ = self.task.await;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn a loop calling `tick` every `period` until cancelled.
///
/// The first tick fires after one full period. Async loops (anything that
/// awaits inside the tick) write their own select loop and wrap it in a
/// `PollHandle` instead.
pub fn spawn_interval<F>(period: Duration, mut tick: F) -> PollHandle
where
    F: FnMut() + Send + 'static,
{
    let (tx, mut rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Swallow the immediate first tick so the seeded batch gets a full
        // period on display before the first refresh.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => tick(),
                changed = rx.changed() => {
                    if changed.is_err() || *rx.borrow() {
                        break;
                    }
                }
            }
        }
    });
    PollHandle::new(tx, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_on_period() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let handle = spawn_interval(Duration::from_secs(10), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let handle = spawn_interval(Duration::from_secs(5), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(12)).await;
        handle.stop().await;
        let after_stop = counter.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_shuts_loop_down() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let handle = spawn_interval(Duration::from_secs(5), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        drop(handle);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
