//! Current user handler.

use axum::{response::Json, routing::get, Extension, Router};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::types::UserResponse;

/// Create user routes (must be layered with the auth middleware)
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(me))
}

/// Return the authenticated user
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
