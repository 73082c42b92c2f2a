//! Handlers and wire types for the `/api/tasks` routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use menage_core::error::CoreError;
use menage_core::models::{NewTaskData, Task};
use menage_core::store::TaskStore;
use menage_core::visibility::ListFilter;

use super::AppState;
use crate::auth::AuthUser;
use crate::error::ApiError;

/// Wire representation of a task. Field names match the JSON the
/// historical clients already speak.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub room: String,
    pub what: Vec<String>,
    pub frequency: String,
    pub time: Option<String>,
    pub is_done: bool,
    pub date_done: Option<DateTime<Utc>>,
    pub last_completed: Option<DateTime<Utc>>,
    pub next_due: Option<DateTime<Utc>>,
    pub is_global: bool,
    pub user: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            name: task.name,
            description: task.description,
            room: task.room,
            what: task.what,
            frequency: task.frequency,
            time: task.time,
            is_done: task.is_done,
            date_done: task.date_done,
            last_completed: task.last_completed,
            next_due: task.next_due,
            is_global: task.is_global,
            user: task.user_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

fn to_responses(tasks: Vec<Task>) -> Json<Vec<TaskResponse>> {
    Json(tasks.into_iter().map(TaskResponse::from).collect())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub room: String,
    #[serde(default)]
    pub what: Vec<String>,
    pub frequency: String,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTaskRequest {
    pub is_done: bool,
}

#[derive(Debug, Deserialize)]
pub struct RoomsQuery {
    #[serde(default)]
    pub rooms: Option<String>,
}

/// Splits the comma-separated `rooms` query parameter. Absent or blank
/// input degrades to an empty membership set, which matches nothing.
fn parse_rooms(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|room| !room.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// POST /api/tasks. Creation is always private to the requester.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let task = state
        .store
        .add_task(NewTaskData {
            name: body.name,
            description: body.description,
            room: body.room,
            what: body.what,
            frequency: body.frequency,
            time: body.time,
            is_global: false,
            user_id: Some(user_id),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// GET /api/tasks. Everything the requester owns, plus global tasks.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state
        .visibility
        .list_for(user_id, ListFilter::default())
        .await?;
    Ok(to_responses(tasks))
}

/// GET /api/tasks/global. Open listing of global tasks, no requester.
pub async fn list_global_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.visibility.list_global().await?;
    Ok(to_responses(tasks))
}

/// GET /api/tasks/by-room?rooms=kitchen,bathroom
pub async fn list_tasks_by_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<RoomsQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state
        .visibility
        .list_for(
            user_id,
            ListFilter {
                rooms: Some(parse_rooms(query.rooms.as_deref())),
                completed_only: false,
            },
        )
        .await?;
    Ok(to_responses(tasks))
}

/// GET /api/tasks/completed?rooms=kitchen,bathroom
pub async fn list_completed_tasks(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<RoomsQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state
        .visibility
        .list_for(
            user_id,
            ListFilter {
                rooms: Some(parse_rooms(query.rooms.as_deref())),
                completed_only: true,
            },
        )
        .await?;
    Ok(to_responses(tasks))
}

/// PUT /api/tasks/{id}/done. Runs the full completion workflow.
pub async fn mark_task_done(
    State(state): State<Arc<AppState>>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.completion.mark_done(id).await?;
    Ok(Json(task.into()))
}

/// PUT /api/tasks/{id}/undone. Resets the flag and nothing else.
pub async fn mark_task_undone(
    State(state): State<Arc<AppState>>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.completion.mark_undone(id).await?;
    Ok(Json(task.into()))
}

/// PATCH /api/tasks/{id}. Bare flag overwrite with no completion
/// bookkeeping. This route has always been open; it takes no requester.
pub async fn patch_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<PatchTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.completion.patch_done_flag(id, body.is_done).await?;
    Ok(Json(task.into()))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state.store.delete_task(id).await? {
        Some(_) => Ok(Json(json!({ "message": "task deleted" }))),
        None => Err(CoreError::NotFound(id.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rooms_splits_and_trims() {
        assert_eq!(
            parse_rooms(Some("kitchen,bathroom")),
            vec!["kitchen".to_string(), "bathroom".to_string()]
        );
        assert_eq!(
            parse_rooms(Some(" kitchen , bathroom ")),
            vec!["kitchen".to_string(), "bathroom".to_string()]
        );
    }

    #[test]
    fn parse_rooms_degrades_to_an_empty_set() {
        assert!(parse_rooms(None).is_empty());
        assert!(parse_rooms(Some("")).is_empty());
        assert!(parse_rooms(Some(" , ,")).is_empty());
    }

    #[test]
    fn task_response_uses_the_historical_field_names() {
        let response = TaskResponse::from(Task {
            name: "Clean oven".to_string(),
            room: "kitchen".to_string(),
            ..Task::default()
        });
        let value = serde_json::to_value(&response).unwrap();

        let object = value.as_object().unwrap();
        for key in [
            "id",
            "isDone",
            "dateDone",
            "lastCompleted",
            "nextDue",
            "isGlobal",
            "user",
            "createdAt",
            "updatedAt",
        ] {
            assert!(object.contains_key(key), "missing field {key}");
        }
        assert!(!object.contains_key("is_done"));
    }

    #[test]
    fn create_request_accepts_the_historical_body_shape() {
        let body: CreateTaskRequest = serde_json::from_value(json!({
            "name": "Faire la vaisselle",
            "description": "Tous les soirs",
            "time": "20 min",
            "frequency": "Quotidienne",
            "room": "cuisine",
            "what": ["assiettes", "verres"]
        }))
        .unwrap();

        assert_eq!(body.name, "Faire la vaisselle");
        assert_eq!(body.frequency, "Quotidienne");
        assert_eq!(body.what.len(), 2);
    }

    #[test]
    fn patch_request_reads_the_camel_case_flag() {
        let body: PatchTaskRequest = serde_json::from_value(json!({ "isDone": true })).unwrap();
        assert!(body.is_done);
    }
}
