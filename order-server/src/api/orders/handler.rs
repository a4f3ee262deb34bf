//! Order handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::{OrderFilter, OrderRepository};
use crate::utils::validation::{
    MAX_ID_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, require_text, validate_optional_text,
};
use crate::utils::{ApiResult, AppError, AppResult, ErrorCode, ok};
use shared::models::{Order, OrderCreate, OrderItem, OrderItemInput, OrderQuery, OrderStatusUpdate};
use shared::order::OrderStatus;

const DEFAULT_CUSTOMER_NAME: &str = "Guest";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub order_id: String,
}

/// Treat `""` like an absent value
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn build_item(index: usize, input: OrderItemInput) -> AppResult<OrderItem> {
    let menu_item_id = require_text(input.menu_item_id, "menuItemId", MAX_ID_LEN)
        .map_err(|e| e.with_detail("item", index))?;

    let quantity = input
        .quantity
        .ok_or_else(|| AppError::required("quantity").with_detail("item", index))?;
    let quantity = u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ValueOutOfRange, "quantity must be at least 1")
                .with_detail("item", index)
        })?;

    let price = input
        .price
        .ok_or_else(|| AppError::required("price").with_detail("item", index))?;
    if price < Decimal::ZERO {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, "price must not be negative")
                .with_detail("item", index),
        );
    }

    validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN)?;

    Ok(OrderItem {
        id: Uuid::new_v4().to_string(),
        menu_item_id,
        quantity,
        price,
        notes: input.notes.unwrap_or_default(),
    })
}

/// GET /api/orders - filtered, sorted by status rank then newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> ApiResult<Vec<Order>> {
    let filter = OrderFilter {
        table_id: non_empty(query.table_id),
        session_id: non_empty(query.session_id),
        status: non_empty(query.status)
            .map(|s| s.parse::<OrderStatus>())
            .transpose()?,
    };
    let orders = OrderRepository::new(state.store.clone()).find_all(&filter).await?;
    Ok(ok(orders))
}

/// POST /api/orders
///
/// The total is always recomputed from the line items.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> ApiResult<OrderCreated> {
    let table_id = require_text(payload.table_id, "tableId", MAX_ID_LEN)?;

    let inputs = payload.items.unwrap_or_default();
    if inputs.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let session_id = non_empty(payload.session_id);
    if let Some(session_id) = &session_id {
        let now_ms = Utc::now().timestamp_millis();
        state.sessions.validate(session_id, now_ms).map_err(|e| {
            tracing::warn!(table_id = %table_id, error = %e, "Order rejected: bad session");
            AppError::from(e)
        })?;
    }

    validate_optional_text(&payload.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let items = inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| build_item(i, input))
        .collect::<AppResult<Vec<_>>>()?;
    let total_amount = Order::compute_total(&items);

    if let Some(client_total) = payload.total_amount
        && client_total != total_amount
    {
        tracing::warn!(
            table_id = %table_id,
            client_total = %client_total,
            server_total = %total_amount,
            "Client total differs from computed total, using computed total"
        );
    }

    let now = Utc::now();
    let order = Order {
        id: Uuid::new_v4().to_string(),
        table_id,
        items,
        total_amount,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
        customer_name: Some(
            non_empty(payload.customer_name).unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string()),
        ),
        notes: Some(payload.notes.unwrap_or_default()),
        session_id,
        barcode: None,
        barcode_generated_at: None,
        payment_method: None,
        paid_amount: None,
        payment_completed_at: None,
    };

    let order = OrderRepository::new(state.store.clone()).create(order).await?;
    tracing::info!(
        order_id = %order.id,
        table_id = %order.table_id,
        total = %order.total_amount,
        items = order.items.len(),
        "Order created"
    );

    Ok(ok(OrderCreated { order_id: order.id }))
}

/// PATCH /api/orders (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Json(payload): Json<OrderStatusUpdate>,
) -> ApiResult<Order> {
    let order_id = require_text(payload.order_id, "orderId", MAX_ID_LEN)?;
    let status: OrderStatus = require_text(payload.status, "status", MAX_ID_LEN)?.parse()?;

    let order = OrderRepository::new(state.store.clone())
        .update_status(&order_id, status)
        .await?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");
    Ok(ok(order))
}
