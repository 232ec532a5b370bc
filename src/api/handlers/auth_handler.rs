//! Authentication handlers.

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{EMAIL_MAX_LENGTH, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH};
use crate::errors::AppResult;
use crate::types::{Created, SignInResponse, SignUpResponse};

/// Credentials body shared by sign-up and sign-in
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(max = EMAIL_MAX_LENGTH, message = "Email is too long")
    )]
    pub email: String,
    #[validate(length(
        min = PASSWORD_MIN_LENGTH,
        max = PASSWORD_MAX_LENGTH,
        message = "Password must be between 5 and 64 characters"
    ))]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signUp", post(sign_up))
        .route("/signIn", post(sign_in))
}

/// Register a new user and return it with a token
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> AppResult<Created<SignUpResponse>> {
    let result = state
        .auth_service
        .sign_up(&payload.email, &payload.password)
        .await?;

    Ok(Created(SignUpResponse::from(result)))
}

/// Exchange credentials for a token. Like every POST here, answers 201.
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> AppResult<Created<SignInResponse>> {
    let result = state
        .auth_service
        .sign_in(&payload.email, &payload.password)
        .await?;

    Ok(Created(SignInResponse::from(result)))
}
