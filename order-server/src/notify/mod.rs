//! Staff notifications
//!
//! Two pollers re-read the store on a fixed interval and diff it, by id,
//! against what has already been seen:
//!
//! - staff calls: pending calls not seen before are added, tracked calls
//!   that are no longer pending are dropped
//! - orders: pending orders not seen before are added
//!
//! Entries created before the server started are never reported. New
//! entries are logged and published on a broadcast channel. Staff clear
//! entries one by one through the admin API.

mod poller;

pub use poller::{PollTarget, Poller};

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use serde::Serialize;
use tokio::sync::broadcast;

use shared::models::{Order, StaffCall, StaffCallStatus};
use shared::order::OrderStatus;

const CHANNEL_CAPACITY: usize = 64;

/// Published for every newly tracked entry
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Notification {
    StaffCall(StaffCall),
    NewOrder(Order),
}

/// Currently tracked entries, oldest first
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSnapshot {
    pub staff_calls: Vec<StaffCall>,
    pub new_orders: Vec<Order>,
}

#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

struct Inner {
    started_at: DateTime<Utc>,
    staff_calls: DashMap<String, StaffCall>,
    orders: DashMap<String, Order>,
    /// Ids reported once; cleared entries stay here until they leave the store
    seen_staff_calls: DashSet<String>,
    seen_orders: DashSet<String>,
    sender: broadcast::Sender<Notification>,
}

impl NotificationCenter {
    /// Nothing created before `started_at` is ever reported
    pub fn new(started_at: DateTime<Utc>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                started_at,
                staff_calls: DashMap::new(),
                orders: DashMap::new(),
                seen_staff_calls: DashSet::new(),
                seen_orders: DashSet::new(),
                sender,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.inner.sender.subscribe()
    }

    /// Diff `calls` against the tracked set; returns the newly tracked calls
    pub fn apply_staff_calls(&self, calls: &[StaffCall]) -> Vec<StaffCall> {
        let mut added = Vec::new();
        for call in calls {
            if call.status == StaffCallStatus::Pending
                && call.created_at >= self.inner.started_at
                && self.inner.seen_staff_calls.insert(call.id.clone())
            {
                self.inner.staff_calls.insert(call.id.clone(), call.clone());
                added.push(call.clone());
            }
        }

        let pending: HashSet<&str> = calls
            .iter()
            .filter(|c| c.status == StaffCallStatus::Pending)
            .map(|c| c.id.as_str())
            .collect();
        self.inner
            .staff_calls
            .retain(|id, _| pending.contains(id.as_str()));

        let present: HashSet<&str> = calls.iter().map(|c| c.id.as_str()).collect();
        self.inner
            .seen_staff_calls
            .retain(|id| present.contains(id.as_str()));

        for call in &added {
            tracing::info!(
                call_id = %call.id,
                table_id = %call.table_id,
                call_type = ?call.call_type,
                "New staff call"
            );
            let _ = self.inner.sender.send(Notification::StaffCall(call.clone()));
        }
        added
    }

    /// Diff `orders` against the tracked set; returns the newly tracked orders
    pub fn apply_orders(&self, orders: &[Order]) -> Vec<Order> {
        let mut added = Vec::new();
        for order in orders {
            if order.status == OrderStatus::Pending
                && order.created_at >= self.inner.started_at
                && self.inner.seen_orders.insert(order.id.clone())
            {
                self.inner.orders.insert(order.id.clone(), order.clone());
                added.push(order.clone());
            }
        }

        let present: HashSet<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        self.inner
            .seen_orders
            .retain(|id| present.contains(id.as_str()));

        for order in &added {
            tracing::info!(
                order_id = %order.id,
                table_id = %order.table_id,
                total = %order.total_amount,
                "New order"
            );
            let _ = self.inner.sender.send(Notification::NewOrder(order.clone()));
        }
        added
    }

    pub fn snapshot(&self) -> NotificationSnapshot {
        let mut staff_calls: Vec<StaffCall> = self
            .inner
            .staff_calls
            .iter()
            .map(|e| e.value().clone())
            .collect();
        staff_calls.sort_by_key(|c| c.created_at);

        let mut new_orders: Vec<Order> =
            self.inner.orders.iter().map(|e| e.value().clone()).collect();
        new_orders.sort_by_key(|o| o.created_at);

        NotificationSnapshot {
            staff_calls,
            new_orders,
        }
    }

    /// Returns whether the entry was tracked
    pub fn clear_staff_call(&self, id: &str) -> bool {
        self.inner.staff_calls.remove(id).is_some()
    }

    pub fn clear_order(&self, id: &str) -> bool {
        self.inner.orders.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use shared::models::StaffCallType;

    fn call(id: &str, status: StaffCallStatus, created_at: DateTime<Utc>) -> StaffCall {
        StaffCall {
            id: id.into(),
            table_id: "table-1".into(),
            call_type: StaffCallType::Assistance,
            message: String::new(),
            status,
            created_at,
            resolved_at: None,
        }
    }

    fn order(id: &str, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
        Order {
            id: id.into(),
            table_id: "table-1".into(),
            items: vec![],
            total_amount: Decimal::from(500),
            status,
            created_at,
            updated_at: created_at,
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
    fn test_staff_call_diff() {
        let start = Utc::now();
        let center = NotificationCenter::new(start);

        let old = call("old", StaffCallStatus::Pending, start - Duration::minutes(1));
        let fresh = call("fresh", StaffCallStatus::Pending, start + Duration::seconds(1));
        let done = call("done", StaffCallStatus::Resolved, start + Duration::seconds(1));

        let added = center.apply_staff_calls(&[old, fresh.clone(), done]);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].id, "fresh");

        // same data on the next scan adds nothing
        assert!(center.apply_staff_calls(std::slice::from_ref(&fresh)).is_empty());
        assert_eq!(center.snapshot().staff_calls.len(), 1);

        // no longer pending: dropped
        let mut handled = fresh;
        handled.status = StaffCallStatus::InProgress;
        center.apply_staff_calls(&[handled]);
        assert!(center.snapshot().staff_calls.is_empty());
    }

    #[test]
    fn test_order_diff_and_clear() {
        let start = Utc::now();
        let center = NotificationCenter::new(start);
        let mut rx = center.subscribe();

        let orders = vec![
            order("a", OrderStatus::Pending, start + Duration::seconds(1)),
            order("b", OrderStatus::Confirmed, start + Duration::seconds(2)),
            order("c", OrderStatus::Pending, start - Duration::seconds(2)),
        ];
        let added = center.apply_orders(&orders);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].id, "a");
        assert!(matches!(rx.try_recv(), Ok(Notification::NewOrder(o)) if o.id == "a"));

        // orders are only cleared by staff, never by the poller
        center.apply_orders(&orders);
        assert_eq!(center.snapshot().new_orders.len(), 1);

        assert!(center.clear_order("a"));
        assert!(!center.clear_order("a"));
        assert!(center.snapshot().new_orders.is_empty());

        // still pending in the store, but already reported
        assert!(center.apply_orders(&orders).is_empty());
    }

    #[test]
    fn test_order_stored_after_a_scan_it_predates() {
        let start = Utc::now();
        let center = NotificationCenter::new(start);

        // created_at is stamped before the write lands, so a scan can run
        // in between and still see an empty store
        assert!(center.apply_orders(&[]).is_empty());
        let late = order("late", OrderStatus::Pending, start + Duration::seconds(1));
        let added = center.apply_orders(&[late]);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].id, "late");
    }

    #[test]
    fn test_staff_call_stored_after_a_scan_it_predates() {
        let start = Utc::now();
        let center = NotificationCenter::new(start);

        assert!(center.apply_staff_calls(&[]).is_empty());
        let late = call("late", StaffCallStatus::Pending, start);
        assert_eq!(center.apply_staff_calls(&[late]).len(), 1);
        assert_eq!(center.snapshot().staff_calls.len(), 1);
    }
}
