//! HTTP API handlers for debrief-api

pub mod debrief;
pub mod health;
pub mod task;

pub use debrief::debrief_routes;
pub use health::health_routes;
pub use task::task_routes;

use axum::http::HeaderMap;

/// Header naming the acting user on create/update operations
pub const USER_ID_HEADER: &str = "user-id";

/// `User-Id` header value, if present and valid UTF-8
pub(crate) fn user_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(USER_ID_HEADER).and_then(|v| v.to_str().ok())
}
