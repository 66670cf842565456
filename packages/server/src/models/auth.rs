use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for admin login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Shared admin password.
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Short-lived JWT bearer token for admin mutations.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token lifetime in seconds.
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Current authenticated admin session.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    #[schema(example = "admin")]
    pub subject: String,
    /// Expiration timestamp (seconds since epoch).
    pub expires_at: i64,
}
