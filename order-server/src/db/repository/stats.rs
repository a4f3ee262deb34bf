//! Dashboard statistics

use rust_decimal::Decimal;
use serde::Serialize;

use super::RepoResult;
use crate::db::{Document, JsonStore};
use shared::models::{StaffCallStatus, TableStatus};
use shared::order::OrderStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Sum of completed order totals
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    /// pending, confirmed, preparing or ready
    pub active_orders: usize,
    pub available_tables: usize,
    pub pending_staff_calls: usize,
}

impl DashboardStats {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            total_orders: doc.orders.len(),
            total_revenue: doc
                .orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .map(|o| o.total_amount)
                .sum(),
            active_orders: doc.orders.iter().filter(|o| o.status.is_active()).count(),
            available_tables: doc
                .tables
                .iter()
                .filter(|t| t.status == TableStatus::Available)
                .count(),
            pending_staff_calls: doc
                .staff_calls
                .iter()
                .filter(|c| c.status == StaffCallStatus::Pending)
                .count(),
        }
    }
}

#[derive(Clone)]
pub struct StatsRepository {
    store: JsonStore,
}

impl StatsRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn summary(&self) -> RepoResult<DashboardStats> {
        let doc = self.store.load().await?;
        Ok(DashboardStats::from_document(&doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{Order, Table};

    fn order(status: OrderStatus, total: i64) -> Order {
        let now = Utc::now();
        Order {
            id: uuid::Uuid::new_v4().to_string(),
            table_id: "table-1".into(),
            items: vec![],
            total_amount: Decimal::from(total),
            status,
            created_at: now,
            updated_at: now,
            customer_name: None,
            notes: None,
            session_id: None,
            barcode: None,
            barcode_generated_at: None,
            payment_method: None,
            paid_amount: None,
            payment_completed_at: None,
        }
    }

    #[test]
    fn test_summary() {
        let doc = Document {
            orders: vec![
                order(OrderStatus::Pending, 100),
                order(OrderStatus::Ready, 200),
                order(OrderStatus::Completed, 300),
                order(OrderStatus::Completed, 400),
                order(OrderStatus::Cancelled, 500),
            ],
            tables: vec![
                Table {
                    id: "table-1".into(),
                    number: 1,
                    capacity: 2,
                    status: TableStatus::Available,
                    qr_code: Table::qr_label(1),
                },
                Table {
                    id: "table-2".into(),
                    number: 2,
                    capacity: 2,
                    status: TableStatus::Occupied,
                    qr_code: Table::qr_label(2),
                },
            ],
            ..Default::default()
        };

        let stats = DashboardStats::from_document(&doc);
        assert_eq!(stats.total_orders, 5);
        assert_eq!(stats.total_revenue, Decimal::from(700));
        assert_eq!(stats.active_orders, 2);
        assert_eq!(stats.available_tables, 1);
        assert_eq!(stats.pending_staff_calls, 0);
    }
}
