use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{OrderRepository, PaymentCompletion};
use crate::utils::validation::{MAX_ID_LEN, require_text};
use crate::utils::{ApiResult, AppError, ErrorCode, ok};
use shared::models::table_number_label;
use shared::order::{OrderStatus, barcode};

const UNKNOWN_ITEM_NAME: &str = "Unknown item";
const PAYMENT_COMPLETED: &str = "completed";

#[derive(Debug, Default, Deserialize)]
pub struct BarcodeQuery {
    pub barcode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeRequest {
    pub order_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCallback {
    pub barcode: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub paid_amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLine {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub notes: String,
}

/// Order as shown on the POS after scanning
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub order_id: String,
    pub table_number: String,
    pub items: Vec<PaymentLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub customer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeIssued {
    pub barcode: String,
    pub order_id: String,
    pub barcode_generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub order_id: String,
    pub status: OrderStatus,
}

/// GET /api/payment?barcode=
pub async fn lookup(
    State(state): State<ServerState>,
    Query(query): Query<BarcodeQuery>,
) -> ApiResult<PaymentSummary> {
    let code = require_text(query.barcode, "barcode", MAX_ID_LEN * 2)?;
    let doc = state.store.load().await?;
    let order_id = barcode::parse_order_id(&code)?;
    let order = doc
        .orders
        .iter()
        .find(|o| o.id == order_id)
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", order_id))?;

    let items = order
        .items
        .iter()
        .map(|item| PaymentLine {
            name: doc
                .menu_items
                .iter()
                .find(|m| m.id == item.menu_item_id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string()),
            quantity: item.quantity,
            price: item.price,
            subtotal: item.subtotal(),
            notes: item.notes.clone(),
        })
        .collect();

    Ok(ok(PaymentSummary {
        order_id: order.id.clone(),
        table_number: table_number_label(&order.table_id).to_string(),
        items,
        total_amount: order.total_amount,
        status: order.status,
        customer_name: order.customer_name.clone(),
        created_at: order.created_at,
    }))
}

/// POST /api/payment - issue a barcode for a ready order
pub async fn generate_barcode(
    State(state): State<ServerState>,
    Json(req): Json<BarcodeRequest>,
) -> ApiResult<BarcodeIssued> {
    let order_id = require_text(req.order_id, "orderId", MAX_ID_LEN)?;
    let order = OrderRepository::new(state.store.clone())
        .generate_barcode(&order_id, Utc::now())
        .await?;

    let (Some(code), Some(barcode_generated_at)) = (order.barcode, order.barcode_generated_at) else {
        return Err(AppError::internal("Barcode missing after generation"));
    };
    tracing::info!(order_id = %order.id, "Payment barcode issued");

    Ok(ok(BarcodeIssued {
        barcode: code,
        order_id: order.id,
        barcode_generated_at,
    }))
}

/// PATCH /api/payment - POS reports a payment
///
/// Only `paymentStatus == "completed"` changes the order; anything else is
/// acknowledged with the current status.
pub async fn payment_callback(
    State(state): State<ServerState>,
    Json(req): Json<PaymentCallback>,
) -> ApiResult<PaymentResult> {
    let code = require_text(req.barcode, "barcode", MAX_ID_LEN * 2)?;
    let payment_status = require_text(req.payment_status, "paymentStatus", MAX_ID_LEN)?;
    let repo = OrderRepository::new(state.store.clone());

    let order = if payment_status == PAYMENT_COMPLETED {
        let payment = PaymentCompletion {
            payment_method: req.payment_method,
            paid_amount: req.paid_amount,
        };
        let order = repo.complete_payment(&code, payment, Utc::now()).await?;
        tracing::info!(
            order_id = %order.id,
            method = order.payment_method.as_deref().unwrap_or("-"),
            "Payment completed"
        );
        order
    } else {
        let order = repo.verify_barcode(&code).await?;
        tracing::info!(order_id = %order.id, payment_status = %payment_status, "Payment status acknowledged");
        order
    };

    Ok(ok(PaymentResult {
        order_id: order.id,
        status: order.status,
    }))
}
