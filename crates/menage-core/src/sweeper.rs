use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::clock::Clock;
use crate::error::CoreError;
use crate::models::TaskFilter;
use crate::schedule;
use crate::store::TaskStore;

/// Outcome of one sweep tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Tasks whose due date had passed at the start of the tick.
    pub due: usize,
    /// Tasks successfully advanced.
    pub advanced: usize,
    /// Tasks whose save failed; they stay due and are retried next tick.
    pub failed: usize,
}

/// Advances overdue chores to their next occurrence on a fixed cadence.
pub struct Sweeper<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: TaskStore + 'static> Sweeper<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// One sweep pass: every task with `next_due <= now` gets
    /// `last_completed` stamped and `next_due` recomputed from now.
    ///
    /// Failures are contained per task. The done flag is never touched.
    pub async fn run_once(&self) -> Result<SweepReport, CoreError> {
        let now = self.clock.now();
        let due_tasks = self
            .store
            .find_tasks(&TaskFilter {
                due_on_or_before: Some(now),
                ..TaskFilter::default()
            })
            .await?;

        let mut report = SweepReport {
            due: due_tasks.len(),
            ..SweepReport::default()
        };

        if due_tasks.is_empty() {
            debug!("no tasks due");
            return Ok(report);
        }

        for mut task in due_tasks {
            let next = schedule::next_due(&task.frequency, now);
            if next == now {
                debug!(task_id = %task.id, frequency = %task.frequency,
                    "unrecognised frequency label, due date not advanced");
            }
            task.last_completed = Some(now);
            task.next_due = Some(next);

            match self.store.save_task(&task).await {
                Ok(_) => report.advanced += 1,
                Err(err) => {
                    report.failed += 1;
                    error!(task_id = %task.id, error = %err,
                        "failed to advance task, continuing sweep");
                }
            }
        }

        info!(
            due = report.due,
            advanced = report.advanced,
            failed = report.failed,
            "sweep tick finished"
        );
        Ok(report)
    }

    /// Starts the periodic sweep loop. The first tick fires one full
    /// `interval` after the call; stop the loop through the returned handle.
    pub fn spawn(self, interval: Duration) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // interval fires immediately; consume that tick so the loop
            // waits a full period before the first sweep
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = self.run_once().await {
                            error!(error = %err, "sweep tick failed");
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });

        SweeperHandle { shutdown_tx, join }
    }
}

/// Handle for stopping a running sweep loop.
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the loop to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.join.await;
    }
}
