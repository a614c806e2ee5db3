//! Task completion endpoint

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    routing::put,
    Json, Router,
};

use super::user_id;
use crate::{ApiResult, AppState};

/// PUT /task/complete/:id
///
/// Body is the task as last seen by the client; returns the stored
/// `completed` flag.
pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<bool>> {
    let completed = state
        .assembler
        .complete_task(&id, &body, user_id(&headers))
        .await?;
    Ok(Json(completed))
}

/// Build task routes
pub fn task_routes() -> Router<AppState> {
    Router::new().route("/task/complete/:id", put(complete_task))
}
