use std::sync::Arc;

use uuid::Uuid;

use crate::clock::Clock;
use crate::error::CoreError;
use crate::models::Task;
use crate::schedule;
use crate::store::TaskStore;

/// Marks chores done and undone, keeping completion bookkeeping and the
/// next occurrence in step.
pub struct CompletionWorkflow<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: TaskStore> CompletionWorkflow<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn load(&self, id: Uuid) -> Result<Task, CoreError> {
        self.store
            .find_task_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Marks the task done: stamps both completion timestamps and schedules
    /// the next occurrence from the completion time.
    pub async fn mark_done(&self, id: Uuid) -> Result<Task, CoreError> {
        let mut task = self.load(id).await?;
        let now = self.clock.now();

        task.is_done = true;
        task.date_done = Some(now);
        task.last_completed = Some(now);
        task.next_due = Some(schedule::next_due(&task.frequency, now));

        self.store.save_task(&task).await
    }

    /// Resets the done flag. The due date and completion history stay as
    /// they are.
    pub async fn mark_undone(&self, id: Uuid) -> Result<Task, CoreError> {
        let mut task = self.load(id).await?;
        task.is_done = false;
        self.store.save_task(&task).await
    }

    /// Overwrites the done flag with no timestamp bookkeeping.
    ///
    /// Deliberately distinct from [`Self::mark_done`]: this path never
    /// touches the schedule, and downstream behaviour depends on which of
    /// the two was used.
    pub async fn patch_done_flag(&self, id: Uuid, is_done: bool) -> Result<Task, CoreError> {
        let mut task = self.load(id).await?;
        task.is_done = is_done;
        self.store.save_task(&task).await
    }
}
