//! Order Repository
//!
//! Owns every order status change: admin updates, barcode generation and
//! the POS payment callback all check the status graph here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::RepoResult;
use crate::db::JsonStore;
use shared::error::{AppError, ErrorCode};
use shared::models::Order;
use shared::order::{OrderStatus, barcode, sort_for_display};

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub table_id: Option<String>,
    pub session_id: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        self.table_id.as_ref().is_none_or(|t| &order.table_id == t)
            && self
                .session_id
                .as_ref()
                .is_none_or(|s| order.session_id.as_ref() == Some(s))
            && self.status.is_none_or(|s| order.status == s)
    }
}

/// Payment reported by the POS
#[derive(Debug, Clone)]
pub struct PaymentCompletion {
    pub payment_method: Option<String>,
    pub paid_amount: Option<Decimal>,
}

#[derive(Clone)]
pub struct OrderRepository {
    store: JsonStore,
}

impl OrderRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Orders matching `filter`, in staff display order
    pub async fn find_all(&self, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .store
            .load()
            .await?
            .orders
            .into_iter()
            .filter(|o| filter.matches(o))
            .collect();
        sort_for_display(&mut orders, |o| (o.status, o.created_at));
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let doc = self.store.load().await?;
        Ok(doc.orders.into_iter().find(|o| o.id == id))
    }

    /// Find the order a barcode points at
    pub async fn find_by_barcode(&self, code: &str) -> RepoResult<Order> {
        let order_id = barcode::parse_order_id(code)?;
        self.find_by_id(order_id)
            .await?
            .ok_or_else(|| not_found(order_id))
    }

    /// Order for `code`, provided `code` is the barcode stored on it
    pub async fn verify_barcode(&self, code: &str) -> RepoResult<Order> {
        let order = self.find_by_barcode(code).await?;
        if order.barcode.as_deref() != Some(code) {
            return Err(AppError::new(ErrorCode::BarcodeMismatch).with_detail("orderId", order.id));
        }
        Ok(order)
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        self.store
            .mutate(move |doc| {
                doc.orders.push(order.clone());
                Ok(order)
            })
            .await
    }

    /// Move an order to `next`, refusing anything outside the status graph
    pub async fn update_status(&self, id: &str, next: OrderStatus) -> RepoResult<Order> {
        self.store
            .mutate(|doc| {
                let order = find_mut(&mut doc.orders, id)?;
                order.status.check_transition(next)?;
                order.status = next;
                order.updated_at = Utc::now();
                Ok(order.clone())
            })
            .await
    }

    /// Attach a payment barcode to a `ready`, unpaid order
    pub async fn generate_barcode(&self, id: &str, now: DateTime<Utc>) -> RepoResult<Order> {
        self.store
            .mutate(|doc| {
                let order = find_mut(&mut doc.orders, id)?;
                if order.is_paid() {
                    return Err(AppError::new(ErrorCode::OrderAlreadyPaid));
                }
                if order.status != OrderStatus::Ready {
                    return Err(AppError::new(ErrorCode::OrderNotReady)
                        .with_detail("status", order.status.as_str()));
                }
                order.barcode = Some(barcode::generate(&order.id, now.timestamp_millis()));
                order.barcode_generated_at = Some(now);
                order.updated_at = now;
                Ok(order.clone())
            })
            .await
    }

    /// Complete an order paid at the POS.
    ///
    /// The barcode must be the one currently stored on the order.
    pub async fn complete_payment(
        &self,
        code: &str,
        payment: PaymentCompletion,
        now: DateTime<Utc>,
    ) -> RepoResult<Order> {
        let order_id = barcode::parse_order_id(code)?.to_string();
        self.store
            .mutate(|doc| {
                let order = find_mut(&mut doc.orders, &order_id)?;
                if order.barcode.as_deref() != Some(code) {
                    return Err(AppError::new(ErrorCode::BarcodeMismatch)
                        .with_detail("orderId", order.id.clone()));
                }
                if order.is_paid() {
                    return Err(AppError::new(ErrorCode::OrderAlreadyPaid));
                }
                order.status.check_transition(OrderStatus::Completed)?;

                order.status = OrderStatus::Completed;
                order.payment_method = payment.payment_method;
                order.paid_amount = payment.paid_amount;
                order.payment_completed_at = Some(now);
                order.updated_at = now;
                Ok(order.clone())
            })
            .await
    }
}

fn find_mut<'a>(orders: &'a mut [Order], id: &str) -> Result<&'a mut Order, AppError> {
    orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::OrderNotFound).with_detail("id", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shared::models::OrderItem;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn order(id: &str, status: OrderStatus, minutes: i64) -> Order {
        let created = base_time() + Duration::minutes(minutes);
        let items = vec![OrderItem {
            id: format!("{id}-1"),
            menu_item_id: "m1".into(),
            quantity: 2,
            price: Decimal::from(1200),
            notes: String::new(),
        }];
        Order {
            id: id.into(),
            table_id: "table-1".into(),
            total_amount: Order::compute_total(&items),
            items,
            status,
            created_at: created,
            updated_at: created,
            customer_name: Some("Guest".into()),
            notes: None,
            session_id: None,
            barcode: None,
            barcode_generated_at: None,
            payment_method: None,
            paid_amount: None,
            payment_completed_at: None,
        }
    }

    async fn repo_with(orders: Vec<Order>) -> OrderRepository {
        let repo = OrderRepository::new(JsonStore::memory());
        for o in orders {
            repo.create(o).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_find_all_sorted_and_filtered() {
        let mut other_table = order("d", OrderStatus::Pending, 9);
        other_table.table_id = "table-2".into();
        let repo = repo_with(vec![
            order("a", OrderStatus::Ready, 0),
            order("b", OrderStatus::Pending, 1),
            order("c", OrderStatus::Pending, 5),
            other_table,
        ])
        .await;

        let ids: Vec<String> = repo
            .find_all(&OrderFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["d", "c", "b", "a"]);

        let filter = OrderFilter {
            table_id: Some("table-1".into()),
            status: Some(OrderStatus::Pending),
            ..Default::default()
        };
        let ids: Vec<String> = repo
            .find_all(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_status_walk_and_terminal() {
        let repo = repo_with(vec![order("a", OrderStatus::Pending, 0)]).await;
        for next in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ] {
            let o = repo.update_status("a", next).await.unwrap();
            assert_eq!(o.status, next);
        }
        let err = repo.update_status("a", OrderStatus::Pending).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyCompleted);
    }

    #[tokio::test]
    async fn test_illegal_transition_leaves_order_untouched() {
        let repo = repo_with(vec![order("a", OrderStatus::Preparing, 0)]).await;
        let err = repo
            .update_status("a", OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderInvalidTransition);
        let stored = repo.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Preparing);
        assert_eq!(stored.updated_at, stored.created_at);
    }

    #[tokio::test]
    async fn test_missing_order() {
        let repo = repo_with(vec![]).await;
        let err = repo
            .update_status("nope", OrderStatus::Confirmed)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_barcode_only_for_ready_orders() {
        let repo = repo_with(vec![
            order("p", OrderStatus::Pending, 0),
            order("r", OrderStatus::Ready, 1),
        ])
        .await;
        let now = base_time() + Duration::hours(1);

        let err = repo.generate_barcode("p", now).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotReady);

        let o = repo.generate_barcode("r", now).await.unwrap();
        assert_eq!(
            o.barcode.as_deref(),
            Some(format!("ORDER_r_{}", now.timestamp_millis()).as_str())
        );
        assert_eq!(o.barcode_generated_at, Some(now));
    }

    #[tokio::test]
    async fn test_payment_completes_with_stored_barcode() {
        let repo = repo_with(vec![order("r", OrderStatus::Ready, 0)]).await;
        let now = base_time() + Duration::hours(1);
        let code = repo.generate_barcode("r", now).await.unwrap().barcode.unwrap();

        let payment = PaymentCompletion {
            payment_method: Some("cash".into()),
            paid_amount: Some(Decimal::from(2400)),
        };

        // same order, stale barcode
        let stale = barcode::generate("r", 1);
        let err = repo
            .complete_payment(&stale, payment.clone(), now)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BarcodeMismatch);

        let paid = repo.complete_payment(&code, payment.clone(), now).await.unwrap();
        assert_eq!(paid.status, OrderStatus::Completed);
        assert_eq!(paid.payment_method.as_deref(), Some("cash"));
        assert_eq!(paid.paid_amount, Some(Decimal::from(2400)));
        assert_eq!(paid.payment_completed_at, Some(now));

        let err = repo.complete_payment(&code, payment, now).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyPaid);
        let err = repo.generate_barcode("r", now).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyPaid);
    }

    #[tokio::test]
    async fn test_payment_with_malformed_barcode() {
        let repo = repo_with(vec![]).await;
        let payment = PaymentCompletion {
            payment_method: None,
            paid_amount: None,
        };
        let err = repo
            .complete_payment("garbage", payment, base_time())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BarcodeInvalid);
    }

    #[tokio::test]
    async fn test_find_by_barcode() {
        let repo = repo_with(vec![order("abc", OrderStatus::Ready, 0)]).await;
        let o = repo.find_by_barcode("ORDER_abc_123").await.unwrap();
        assert_eq!(o.id, "abc");
        let err = repo.find_by_barcode("ORDER_zzz_123").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_verify_barcode() {
        let repo = repo_with(vec![order("v", OrderStatus::Ready, 0)]).await;

        // no barcode generated yet
        let err = repo.verify_barcode("ORDER_v_1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BarcodeMismatch);

        let code = repo
            .generate_barcode("v", base_time())
            .await
            .unwrap()
            .barcode
            .unwrap();
        assert_eq!(repo.verify_barcode(&code).await.unwrap().id, "v");
    }
}
