use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use storefront_platform_shared::OrderStatus;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Best-effort customer notifications. Events are queued in-process and
/// drained by a background task that logs the dispatch; actual delivery
/// (email, push) is an external collaborator and never blocks a request.
#[derive(Clone)]
pub struct NotificationService {
    queue: Arc<RwLock<Vec<PendingNotification>>>,
}

#[derive(Debug, Clone)]
pub struct PendingNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    OrderConfirmation,
    OrderStatusChange,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Start the queue drain task
    pub fn start_background_tasks(&self) {
        let service = self.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(30));

            loop {
                interval.tick().await;
                service.drain_queue().await;
            }
        });

        info!("Notification dispatch task started");
    }

    /// Queue an order confirmation
    pub async fn order_confirmation(&self, user_id: Uuid, order_number: &str, total: Decimal) {
        self.enqueue(
            user_id,
            NotificationKind::OrderConfirmation,
            format!("Order {} placed, total {}", order_number, total),
        )
        .await;
    }

    /// Queue an order status change
    pub async fn order_status_change(
        &self,
        user_id: Uuid,
        order_number: &str,
        status: OrderStatus,
    ) {
        self.enqueue(
            user_id,
            NotificationKind::OrderStatusChange,
            format!("Order {} is now {}", order_number, status),
        )
        .await;
    }

    async fn enqueue(&self, user_id: Uuid, kind: NotificationKind, message: String) {
        let notification = PendingNotification {
            id: Uuid::new_v4(),
            user_id,
            kind,
            message,
            created_at: Utc::now(),
        };

        debug!(user_id = %user_id, "Queued notification: {}", notification.message);
        self.queue.write().await.push(notification);
    }

    async fn drain_queue(&self) {
        let pending: Vec<PendingNotification> = {
            let mut queue = self.queue.write().await;
            queue.drain(..).collect()
        };

        for notification in pending {
            info!(
                user_id = %notification.user_id,
                kind = ?notification.kind,
                "Dispatching notification: {}",
                notification.message
            );
        }
    }

    #[cfg(test)]
    pub async fn pending_count(&self) -> usize {
        self.queue.read().await.len()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn enqueued_notifications_drain() {
        let service = NotificationService::new();
        let user = Uuid::new_v4();

        service
            .order_confirmation(user, "ORD-20250101-AB12CD", dec!(499.00))
            .await;
        service
            .order_status_change(user, "ORD-20250101-AB12CD", OrderStatus::Shipped)
            .await;
        assert_eq!(service.pending_count().await, 2);

        service.drain_queue().await;
        assert_eq!(service.pending_count().await, 0);
    }
}
