use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::Deserialize;

use crate::state::AppState;

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Proof that the request carried the shared admin password.
///
/// The password travels and compares in plain text, matching the site's
/// original client-side gate. No hashing, sessions, or rate limiting; that is
/// a preserved non-goal, not an oversight.
#[derive(Debug)]
pub struct Admin;

#[async_trait]
impl FromRequestParts<AppState> for Admin {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "missing admin password".to_string(),
            ))?;

        if supplied != state.config.admin_password {
            return Err((
                StatusCode::UNAUTHORIZED,
                "invalid admin password".to_string(),
            ));
        }

        Ok(Admin)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if body.password == state.config.admin_password {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid password".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_accepts_the_configured_password() {
        let state = AppState::fake();
        let status = login(
            State(state),
            Json(LoginRequest {
                password: "admin".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let state = AppState::fake();
        let (status, _) = login(
            State(state),
            Json(LoginRequest {
                password: "letmein".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
