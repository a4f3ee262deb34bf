//! Menu handlers

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::MenuItemRepository;
use crate::utils::validation::{
    MAX_ID_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, require_text, validate_optional_text,
};
use crate::utils::{
    ApiResponse, ApiResult, AppError, AppResult, CreatedResult, ErrorCode, IdQuery, created, ok,
};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

fn validate_price(price: Decimal) -> AppResult<()> {
    if price <= Decimal::ZERO {
        return Err(AppError::new(ErrorCode::MenuItemInvalidPrice).with_detail("price", price.to_string()));
    }
    Ok(())
}

/// GET /api/menu
pub async fn list_available(State(state): State<ServerState>) -> ApiResult<Vec<MenuItem>> {
    let items = MenuItemRepository::new(state.store.clone()).find_available().await?;
    Ok(ok(items))
}

/// GET /api/admin/menu
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<MenuItem>> {
    let items = MenuItemRepository::new(state.store.clone()).find_all().await?;
    Ok(ok(items))
}

/// POST /api/admin/menu
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> CreatedResult<MenuItem> {
    let name = require_text(payload.name, "name", MAX_NAME_LEN)?;
    let description = require_text(payload.description, "description", MAX_NOTE_LEN)?;
    let category = require_text(payload.category, "category", MAX_ID_LEN)?;
    let price = payload.price.ok_or_else(|| AppError::required("price"))?;
    validate_price(price)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let item = MenuItem {
        id: Uuid::new_v4().to_string(),
        name,
        description,
        price,
        category,
        image: payload.image.filter(|s| !s.is_empty()),
        available: payload.available.unwrap_or(true),
    };

    let item = MenuItemRepository::new(state.store.clone()).create(item).await?;
    tracing::info!(menu_item_id = %item.id, name = %item.name, "Menu item created");
    Ok(created(item))
}

/// PATCH /api/admin/menu - body `{id, ...fields}`
pub async fn update(
    State(state): State<ServerState>,
    Json(mut payload): Json<MenuItemUpdate>,
) -> ApiResult<MenuItem> {
    let id = payload
        .id
        .take()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::required("id"))?;
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let item = MenuItemRepository::new(state.store.clone()).update(&id, payload).await?;
    Ok(ok(item))
}

/// DELETE /api/admin/menu?id=
pub async fn delete(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<()> {
    let id = query.require()?;
    MenuItemRepository::new(state.store.clone()).delete(&id).await?;
    tracing::info!(menu_item_id = %id, "Menu item deleted");
    Ok(Json(ApiResponse::ok()))
}
