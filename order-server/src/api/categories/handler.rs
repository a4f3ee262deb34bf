use axum::{
    Json,
    extract::{Query, State},
};

use crate::core::ServerState;
use crate::db::repository::CategoryRepository;
use crate::utils::validation::{MAX_NAME_LEN, require_text, validate_optional_text};
use crate::utils::{ApiResponse, ApiResult, AppError, CreatedResult, IdQuery, created, ok};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::prefixed_id;

const DEFAULT_DISPLAY_ORDER: i32 = 1;

/// GET /api/admin/categories - ordered by displayOrder
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Category>> {
    let categories = CategoryRepository::new(state.store.clone()).find_all().await?;
    Ok(ok(categories))
}

/// POST /api/admin/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> CreatedResult<Category> {
    let name = require_text(payload.name, "name", MAX_NAME_LEN)?;

    let category = Category {
        id: prefixed_id("cat"),
        name,
        // 0 counts as unset
        display_order: payload
            .display_order
            .filter(|o| *o != 0)
            .unwrap_or(DEFAULT_DISPLAY_ORDER),
        active: payload.active.unwrap_or(true),
    };

    let category = CategoryRepository::new(state.store.clone()).create(category).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok(created(category))
}

/// PATCH /api/admin/categories - body `{id, ...fields}`
pub async fn update(
    State(state): State<ServerState>,
    Json(mut payload): Json<CategoryUpdate>,
) -> ApiResult<Category> {
    let id = payload
        .id
        .take()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::required("id"))?;
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;

    let category = CategoryRepository::new(state.store.clone()).update(&id, payload).await?;
    Ok(ok(category))
}

/// DELETE /api/admin/categories?id=
pub async fn delete(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<()> {
    let id = query.require()?;
    CategoryRepository::new(state.store.clone()).delete(&id).await?;
    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(ApiResponse::ok()))
}
