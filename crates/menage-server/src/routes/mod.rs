use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use menage_core::completion::CompletionWorkflow;
use menage_core::store::SqliteTaskStore;
use menage_core::visibility::VisibilityPolicy;

pub mod tasks;

/// Shared handler dependencies.
pub struct AppState {
    pub store: Arc<SqliteTaskStore>,
    pub visibility: VisibilityPolicy<SqliteTaskStore>,
    pub completion: CompletionWorkflow<SqliteTaskStore>,
}

pub fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/tasks", post(tasks::create_task).get(tasks::list_tasks))
        .route("/api/tasks/global", get(tasks::list_global_tasks))
        .route("/api/tasks/by-room", get(tasks::list_tasks_by_room))
        .route("/api/tasks/completed", get(tasks::list_completed_tasks))
        .route("/api/tasks/{id}/done", put(tasks::mark_task_done))
        .route("/api/tasks/{id}/undone", put(tasks::mark_task_undone))
        .route(
            "/api/tasks/{id}",
            axum::routing::patch(tasks::patch_task).delete(tasks::delete_task),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins. An empty origin list leaves the
/// restrictive default in place.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(crate::auth::USER_ID_HEADER),
        ])
        .allow_credentials(true)
}
