use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminSession;
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, SessionResponse, validate_login_request};
use crate::state::AppState;
use crate::utils::{jwt, password};

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Exchange the admin password for a session token",
    description = "Verifies the shared admin password server-side and returns a \
        short-lived JWT. Every admin mutation requires this token.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let is_valid = password::verify_password(
        &payload.password,
        &state.config.auth.admin_password_hash,
    )
    .map_err(|e| AppError::Internal(format!("Password verify error: {e}")))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let ttl_minutes = state.config.auth.session_ttl_minutes;
    let token = jwt::sign(ttl_minutes, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        expires_in: ttl_minutes * 60,
    }))
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "Auth",
    operation_id = "session",
    summary = "Return the current admin session",
    responses(
        (status = 200, description = "Active session", body = SessionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
pub async fn session(admin: AdminSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        subject: admin.subject,
        expires_at: admin.expires_at as i64,
    })
}
