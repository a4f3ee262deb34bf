use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::repository::{UserPatch, UserRepository};
use crate::security_log;
use crate::utils::validation::{
    MAX_ID_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, require_text, validate_email,
    validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, ApiResult, AppError, CreatedResult, IdQuery, created, ok};
use shared::models::{User, UserCreate, UserRole, UserUpdate, UserView};
use shared::util::prefixed_id;

/// GET /api/admin/users
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<UserView>> {
    let users = UserRepository::new(state.store.clone()).find_all().await?;
    Ok(ok(users.iter().map(UserView::from).collect()))
}

/// POST /api/admin/users
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UserCreate>,
) -> CreatedResult<UserView> {
    let name = require_text(payload.name, "name", MAX_NAME_LEN)?;
    let email = payload.email.ok_or_else(|| AppError::required("email"))?;
    validate_email(&email)?;
    let password = require_text(payload.password, "password", MAX_PASSWORD_LEN)?;
    let role: UserRole = require_text(payload.role, "role", MAX_ID_LEN)?.parse()?;

    let user = User {
        id: prefixed_id("user"),
        name,
        email: email.trim().to_string(),
        password: hash_password(&password)?,
        role,
        created_at: Utc::now(),
    };

    let user = UserRepository::new(state.store.clone()).create(user).await?;
    security_log!(
        "INFO",
        "user_created",
        user_id = user.id.clone(),
        role = user.role.as_str(),
        by = current_user.id.clone()
    );
    Ok(created(UserView::from(&user)))
}

/// PATCH /api/admin/users
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UserUpdate>,
) -> ApiResult<UserView> {
    let id = require_text(payload.id, "id", MAX_ID_LEN)?;
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }

    let password_hash = match payload.password {
        Some(password) => {
            validate_required_text(&password, "password", MAX_PASSWORD_LEN)?;
            Some(hash_password(&password)?)
        }
        None => None,
    };
    let role = payload.role.map(|r| r.parse::<UserRole>()).transpose()?;
    let password_changed = password_hash.is_some();

    let patch = UserPatch {
        name: payload.name,
        email: payload.email.map(|e| e.trim().to_string()),
        password_hash,
        role,
    };
    let user = UserRepository::new(state.store.clone()).update(&id, patch).await?;

    if password_changed || role.is_some() {
        security_log!(
            "INFO",
            "user_credentials_changed",
            user_id = user.id.clone(),
            role = user.role.as_str(),
            password_changed = password_changed,
            by = current_user.id.clone()
        );
    }
    Ok(ok(UserView::from(&user)))
}

/// DELETE /api/admin/users?id=
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<IdQuery>,
) -> ApiResult<()> {
    let id = query.require()?;
    if id == current_user.id {
        return Err(AppError::invalid_request("Cannot delete the signed-in account"));
    }
    UserRepository::new(state.store.clone()).delete(&id).await?;
    security_log!("INFO", "user_deleted", user_id = id, by = current_user.id.clone());
    Ok(Json(ApiResponse::ok()))
}
