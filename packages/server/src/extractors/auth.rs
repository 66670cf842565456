use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated admin session extracted from the
/// `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require an admin token. Tokens are
/// short-lived and signed server-side; there is no client-side credential
/// check anywhere.
pub struct AdminSession {
    pub subject: String,
    /// Expiration timestamp (seconds since epoch).
    pub expires_at: usize,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        if claims.sub != jwt::ADMIN_SUBJECT {
            return Err(AppError::TokenInvalid);
        }

        Ok(AdminSession {
            subject: claims.sub,
            expires_at: claims.exp,
        })
    }
}
