/*
 * Responsibility
 * - POST /auth/signup, POST /auth/signin
 * - password hash → users 作成 / 照合 → access token 発行
 * - signin の失敗理由 (email 不明 / password 不一致) は区別せず 401
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::auth::{CredentialsRequest, TokenResponse},
        extractors::JsonBody,
    },
    error::AppError,
    repos::{error::RepoError, user_repo::UserRow},
    services::auth::password,
    state::AppState,
};

fn issue(state: &AppState, user: &UserRow) -> Result<TokenResponse, AppError> {
    let access_token = state.tokens.issue_access_token(user.id, &user.email)?;

    Ok(TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.tokens.ttl_seconds(),
    })
}

pub async fn signup(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let email = req.normalized_email();
    let password_hash = password::hash_password(&req.password).await?;

    let user = state
        .users
        .create(
            &email,
            &password_hash,
            req.first_name.as_deref(),
            req.last_name.as_deref(),
        )
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::conflict("EMAIL_TAKEN", "email already registered"),
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, "user signed up");

    Ok((StatusCode::CREATED, Json(issue(&state, &user)?)))
}

pub async fn signin(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let email = req.normalized_email();
    let user = state.users.find_by_email(&email).await?;

    // Unknown emails are verified against a dummy hash; same cost, same 401.
    let verified = password::verify_password(
        &req.password,
        user.as_ref().map(|user| user.password_hash.as_str()),
    )
    .await?;

    let Some(user) = user.filter(|_| verified) else {
        tracing::warn!("signin rejected");
        return Err(AppError::Unauthorized);
    };

    Ok(Json(issue(&state, &user)?))
}
