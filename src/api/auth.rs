//! Auth handlers
//!
//! These wrap the simulated auth backend: customer logins always succeed,
//! the admin path checks the configured credential pair. The session id is
//! chosen by the client and sent with every request.

use crate::api::SessionQuery;
use crate::error::{Result, StoreError};
use crate::session::User;
use crate::state::SharedState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub session: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

pub async fn login(
    State(state): State<SharedState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<User>> {
    body.validate()?;
    let user = state.sessions.login(&body.session, &body.email, &body.password).await?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub session: String,
}

pub async fn login_with_google(
    State(state): State<SharedState>,
    Json(body): Json<GoogleLoginRequest>,
) -> Result<Json<User>> {
    Ok(Json(state.sessions.login_with_google(&body.session).await?))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub session: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

pub async fn admin_login(
    State(state): State<SharedState>,
    Json(body): Json<AdminLoginRequest>,
) -> Result<Json<User>> {
    body.validate()?;
    let user = state
        .sessions
        .admin_login(&body.session, &body.username, &body.password)
        .await?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub session: String,
}

pub async fn logout(
    State(state): State<SharedState>,
    Json(body): Json<LogoutRequest>,
) -> Result<StatusCode> {
    state.sessions.logout(&body.session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// An unknown session answers 401: no stored user means logged out.
pub async fn current_session(
    State(state): State<SharedState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<User>> {
    state
        .sessions
        .current_user(&query.session)
        .await
        .map(Json)
        .ok_or(StoreError::InvalidCredentials)
}
