use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::NotificationCenter;
use crate::db::JsonStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTarget {
    StaffCalls,
    Orders,
}

impl PollTarget {
    fn name(&self) -> &'static str {
        match self {
            PollTarget::StaffCalls => "staff call",
            PollTarget::Orders => "order",
        }
    }
}

/// Periodic store scan feeding the [`NotificationCenter`]
pub struct Poller {
    store: JsonStore,
    center: NotificationCenter,
    target: PollTarget,
    interval: Duration,
    shutdown: CancellationToken,
}

impl Poller {
    pub fn new(
        store: JsonStore,
        center: NotificationCenter,
        target: PollTarget,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            store,
            center,
            target,
            interval,
            shutdown,
        }
    }

    /// Main loop: first scan immediately, then every `interval` until shutdown
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "{} poller started",
            self.target.name()
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("{} poller received shutdown signal", self.target.name());
                    return;
                }
            }
        }
    }

    async fn poll_once(&self) {
        let doc = match self.store.load().await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!("Failed to poll {}s: {}", self.target.name(), e);
                return;
            }
        };

        let added = match self.target {
            PollTarget::StaffCalls => self.center.apply_staff_calls(&doc.staff_calls).len(),
            PollTarget::Orders => self.center.apply_orders(&doc.orders).len(),
        };
        if added == 0 {
            tracing::trace!("No new {}s", self.target.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{StaffCall, StaffCallStatus, StaffCallType};

    #[tokio::test]
    async fn test_poller_picks_up_new_call_and_stops() {
        let store = JsonStore::memory();
        let center = NotificationCenter::new(Utc::now() - chrono::Duration::seconds(1));
        let shutdown = CancellationToken::new();

        store
            .mutate(|doc| {
                doc.staff_calls.push(StaffCall {
                    id: "call-1".into(),
                    table_id: "table-3".into(),
                    call_type: StaffCallType::Payment,
                    message: String::new(),
                    status: StaffCallStatus::Pending,
                    created_at: Utc::now(),
                    resolved_at: None,
                });
                Ok(())
            })
            .await
            .unwrap();

        let poller = Poller::new(
            store,
            center.clone(),
            PollTarget::StaffCalls,
            Duration::from_millis(10),
            shutdown.clone(),
        );
        let handle = tokio::spawn(poller.run());

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.cancel();
        handle.await.unwrap();

        let snapshot = center.snapshot();
        assert_eq!(snapshot.staff_calls.len(), 1);
        assert_eq!(snapshot.staff_calls[0].id, "call-1");
    }
}
