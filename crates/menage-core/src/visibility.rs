use std::sync::Arc;

use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{Scope, Task, TaskFilter};
use crate::store::TaskStore;

/// Narrowing filters a listing request may carry.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Room membership; `Some(vec![])` matches nothing.
    pub rooms: Option<Vec<String>>,
    /// Restrict to completed tasks.
    pub completed_only: bool,
}

/// Decides which tasks a requester may see.
///
/// A task is visible when the requester owns it or the task is global;
/// ownership is never checked for global tasks.
pub struct VisibilityPolicy<S> {
    store: Arc<S>,
}

impl<S: TaskStore> VisibilityPolicy<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Tasks visible to `requester`, optionally narrowed by rooms and
    /// completion state.
    pub async fn list_for(
        &self,
        requester: Uuid,
        filter: ListFilter,
    ) -> Result<Vec<Task>, CoreError> {
        self.store
            .find_tasks(&TaskFilter {
                scope: Scope::UserOrGlobal(requester),
                rooms: filter.rooms,
                is_done: filter.completed_only.then_some(true),
                due_on_or_before: None,
            })
            .await
    }

    /// Every global task, with no requester involved.
    pub async fn list_global(&self) -> Result<Vec<Task>, CoreError> {
        self.store
            .find_tasks(&TaskFilter {
                scope: Scope::Global,
                ..TaskFilter::default()
            })
            .await
    }
}
