use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// A named periodic task with explicit start/stop.
///
/// The tick body is awaited to completion before the next tick is
/// considered, so executions never overlap; a tick that overruns its
/// period delays the following one (`MissedTickBehavior::Delay`).
/// `stop` prevents future ticks but does not interrupt one in flight.
pub struct RecurringTask {
    name: &'static str,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RecurringTask {
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, task: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        debug!(task = name, "tick");
                        task().await;
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!(task = name, "recurring task stopped");
        });

        info!(task = name, period_secs = period.as_secs(), "recurring task started");
        RecurringTask {
            name,
            shutdown,
            handle,
        }
    }

    /// Requests a stop. Future ticks are cancelled; an in-flight tick
    /// runs to completion.
    pub fn stop(&self) {
        debug!(task = self.name, "stop requested");
        let _ = self.shutdown.send(true);
    }

    /// Stops the task and waits for the loop (including any in-flight
    /// tick) to finish.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn stop_prevents_future_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let task = {
            let count = count.clone();
            RecurringTask::spawn("test", Duration::from_millis(10), move || {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        tokio::time::sleep(Duration::from_millis(35)).await;
        task.shutdown().await;
        let after_stop = count.load(Ordering::SeqCst);
        assert!(after_stop >= 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn slow_ticks_do_not_overlap() {
        let running = Arc::new(AtomicUsize::new(0));
        let overlapped = Arc::new(AtomicUsize::new(0));
        let task = {
            let running = running.clone();
            let overlapped = overlapped.clone();
            RecurringTask::spawn("slow", Duration::from_millis(5), move || {
                let running = running.clone();
                let overlapped = overlapped.clone();
                async move {
                    if running.fetch_add(1, Ordering::SeqCst) > 0 {
                        overlapped.fetch_add(1, Ordering::SeqCst);
                    }
                    // Tick body longer than the period.
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                }
            })
        };

        tokio::time::sleep(Duration::from_millis(80)).await;
        task.shutdown().await;
        assert_eq!(overlapped.load(Ordering::SeqCst), 0);
    }
}
