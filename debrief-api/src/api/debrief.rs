//! Debrief CRUD endpoints
//!
//! - `POST /debrief/create`: enrich, normalize, persist as new (201)
//! - `PUT /debrief/:id`: enrich, normalize, persist over `id`
//! - `DELETE /debrief/:id`
//! - `GET /debrief/:id`
//! - `GET /debriefs`

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use super::user_id;
use crate::{ApiResult, AppState};

/// POST /debrief/create
pub async fn create_debrief(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let created = state.assembler.create(&body, user_id(&headers)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /debrief/:id
pub async fn update_debrief(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let updated = state.assembler.update(&id, &body, user_id(&headers)).await?;
    Ok(Json(updated))
}

/// DELETE /debrief/:id
pub async fn delete_debrief(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<bool>> {
    Ok(Json(state.assembler.delete(&id).await?))
}

/// GET /debrief/:id
pub async fn get_debrief(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    Ok(Json(state.assembler.get(&id).await?))
}

/// GET /debriefs
pub async fn get_all_debriefs(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    Ok(Json(state.assembler.get_all().await?))
}

/// Build debrief routes
pub fn debrief_routes() -> Router<AppState> {
    Router::new()
        .route("/debrief/create", post(create_debrief))
        .route(
            "/debrief/:id",
            get(get_debrief).put(update_debrief).delete(delete_debrief),
        )
        .route("/debriefs", get(get_all_debriefs))
}
