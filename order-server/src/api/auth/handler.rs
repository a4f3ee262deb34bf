//! Login handler

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::verify_password;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{ApiResult, AppError, ok};
use shared::models::{LoginRequest, LoginResponse, UserView};

/// Fixed delay applied to every attempt, found or not
const AUTH_FIXED_DELAY_MS: u64 = 250;

/// POST /api/auth/login
///
/// Unknown email and wrong password share one error message.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let repo = UserRepository::new(state.store.clone());
    let user = repo.find_by_email(req.email.trim()).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) if verify_password(&req.password, &u.password) => u,
        Some(u) => {
            security_log!("WARN", "login_failed", user_id = u.id.clone(), reason = "invalid_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", email = req.email.clone(), reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    let (token, expires_at) = state
        .jwt
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user.id, role = %user.role.as_str(), "User logged in");

    Ok(ok(LoginResponse {
        token,
        expires_at,
        user: UserView::from(&user),
    }))
}
