use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{Frequency, NewTaskData, Scope, Task, TaskFilter};

/// Persistence contract for chores.
///
/// The policies, workflows and the sweeper only see this trait; the SQLite
/// implementation below is the production store.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Creates a task, assigning its id and bookkeeping timestamps.
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;

    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, CoreError>;

    /// Upserts the task and refreshes `updated_at`.
    async fn save_task(&self, task: &Task) -> Result<Task, CoreError>;

    /// Removes the task, returning the deleted row when it existed.
    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
}

/// SQLite implementation of [`TaskStore`].
pub struct SqliteTaskStore {
    pool: DbPool,
}

impl SqliteTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        if data.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "task name must not be empty".to_string(),
            ));
        }

        // Recognised labels are stored canonically; anything else verbatim.
        let frequency = data
            .frequency
            .parse::<Frequency>()
            .map(|f| f.to_string())
            .unwrap_or(data.frequency);

        let now = Utc::now();
        let task = sqlx::query_as(
            r#"INSERT INTO tasks (id, name, description, room, what, frequency, time, is_done, date_done, last_completed, next_due, is_global, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(data.name)
        .bind(data.description)
        .bind(data.room)
        .bind(Json(data.what))
        .bind(frequency)
        .bind(data.time)
        .bind(false)
        .bind(Option::<chrono::DateTime<Utc>>::None)
        .bind(Option::<chrono::DateTime<Utc>>::None)
        .bind(Option::<chrono::DateTime<Utc>>::None)
        .bind(data.is_global)
        .bind(data.user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, CoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM tasks WHERE 1 = 1");

        match filter.scope {
            Scope::Any => {}
            Scope::Global => {
                qb.push(" AND is_global = 1");
            }
            Scope::User(user_id) => {
                qb.push(" AND user_id = ");
                qb.push_bind(user_id);
            }
            Scope::UserOrGlobal(user_id) => {
                qb.push(" AND (user_id = ");
                qb.push_bind(user_id);
                qb.push(" OR is_global = 1)");
            }
        }

        if let Some(rooms) = &filter.rooms {
            if rooms.is_empty() {
                // Membership in an empty set matches nothing
                qb.push(" AND 0 = 1");
            } else {
                qb.push(" AND room IN (");
                for (i, room) in rooms.iter().enumerate() {
                    if i > 0 {
                        qb.push(", ");
                    }
                    qb.push_bind(room.clone());
                }
                qb.push(")");
            }
        }

        if let Some(is_done) = filter.is_done {
            qb.push(" AND is_done = ");
            qb.push_bind(is_done);
        }

        if let Some(cutoff) = filter.due_on_or_before {
            qb.push(" AND next_due IS NOT NULL AND next_due <= ");
            qb.push_bind(cutoff);
        }

        qb.push(" ORDER BY created_at");

        let tasks = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    async fn save_task(&self, task: &Task) -> Result<Task, CoreError> {
        let saved = sqlx::query_as(
            r#"INSERT INTO tasks (id, name, description, room, what, frequency, time, is_done, date_done, last_completed, next_due, is_global, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                room = excluded.room,
                what = excluded.what,
                frequency = excluded.frequency,
                time = excluded.time,
                is_done = excluded.is_done,
                date_done = excluded.date_done,
                last_completed = excluded.last_completed,
                next_due = excluded.next_due,
                is_global = excluded.is_global,
                user_id = excluded.user_id,
                updated_at = excluded.updated_at
            RETURNING *"#,
        )
        .bind(task.id)
        .bind(&task.name)
        .bind(&task.description)
        .bind(&task.room)
        .bind(Json(&task.what))
        .bind(&task.frequency)
        .bind(&task.time)
        .bind(task.is_done)
        .bind(task.date_done)
        .bind(task.last_completed)
        .bind(task.next_due)
        .bind(task.is_global)
        .bind(task.user_id)
        .bind(task.created_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let removed = sqlx::query_as("DELETE FROM tasks WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(removed)
    }
}
