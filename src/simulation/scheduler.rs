//! Turn scheduling
//!
//! [`TurnDriver`] is the "fire one turn" seam. The wall-clock
//! [`IntervalScheduler`] calls it on a tokio interval; tests and the
//! headless runner call it directly.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::resolve::turn::TurnReport;

/// Something that can resolve one turn atomically
pub trait TurnDriver: Send + Sync {
    fn fire_turn(&self) -> TurnReport;
}

/// Fire `turns` turns back to back, without a timer
pub fn run_turns<D: TurnDriver + ?Sized>(driver: &D, turns: u64) -> Vec<TurnReport> {
    (0..turns).map(|_| driver.fire_turn()).collect()
}

/// Fires turns on a fixed period from a background tokio task
pub struct IntervalScheduler;

impl IntervalScheduler {
    /// Start ticking; the first turn fires one period from now
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<D>(driver: Arc<D>, period: Duration) -> SchedulerHandle
    where
        D: TurnDriver + ?Sized + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            // A late tick fires once, not as a burst of catch-up turns
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!("Turn scheduler started ({:?} period)", period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = driver.fire_turn();
                        if report.resolved {
                            tracing::debug!(
                                "Turn {} resolved with {} events",
                                report.turn,
                                report.events.len()
                            );
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("Turn scheduler stopped");
        });

        SchedulerHandle { stop_tx, task }
    }
}

/// Handle to a running [`IntervalScheduler`]
pub struct SchedulerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop ticking and wait for the task to exit
    ///
    /// A turn already in progress completes first.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("Turn scheduler task failed: {}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
