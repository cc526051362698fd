//! Notification creation and delivery bookkeeping.
//!
//! This service is the production `Notifier`: the payment and subscription
//! services receive it through the trait rather than holding it directly.

use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, NotificationId, Timestamp, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::payment::Payment;
use crate::domain::subscription::Subscription;
use crate::domain::user::User;
use crate::ports::Notifier;
use crate::store::NotificationRepository;

pub struct NotificationService {
    notifications: Arc<Mutex<NotificationRepository>>,
}

impl NotificationService {
    pub fn new(notifications: Arc<Mutex<NotificationRepository>>) -> Self {
        Self { notifications }
    }

    fn push(&self, notification: Notification) {
        tracing::debug!(
            user_id = %notification.user_id,
            kind = %notification.kind,
            "notification queued"
        );
        self.notifications
            .lock()
            .expect("notification repository lock poisoned")
            .add(notification);
    }

    /// All notifications for a user, regardless of read state.
    pub fn user_notifications(&self, user_id: &UserId) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notification repository lock poisoned")
            .find_by_user(user_id)
    }

    /// Unread notifications for a user.
    pub fn unread_notifications(&self, user_id: &UserId) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notification repository lock poisoned")
            .find_unread(user_id)
    }

    /// Flips the read flag. Unknown ids are a no-op.
    pub fn mark_as_read(&self, id: &NotificationId) -> Result<(), DomainError> {
        let mut notifications = self
            .notifications
            .lock()
            .expect("notification repository lock poisoned");
        if let Some(mut notification) = notifications.get(id) {
            notification.is_read = true;
            notifications.update(notification)?;
        }
        Ok(())
    }
}

impl Notifier for NotificationService {
    fn renewal_reminder(
        &self,
        user: &User,
        subscription: &Subscription,
    ) -> Result<(), DomainError> {
        let message = format!(
            "Your subscription '{}' is due for renewal on {}. Amount: ${:.2}",
            subscription.plan_name,
            subscription.next_renewal_date().date_string(),
            subscription.renewal_cost(),
        );
        self.push(Notification::new(user.id, NotificationKind::Renewal, message));
        Ok(())
    }

    fn payment_failed(&self, user: &User, payment: &Payment) -> Result<(), DomainError> {
        let reason = payment.failure_reason.as_deref().unwrap_or("Unknown");
        let message = format!(
            "Payment of ${:.2} failed. Reason: {}. Please update your payment information.",
            payment.amount, reason,
        );
        self.push(Notification::new(
            user.id,
            NotificationKind::PaymentFailed,
            message,
        ));
        Ok(())
    }

    fn cancellation_confirmed(
        &self,
        user: &User,
        subscription: &Subscription,
    ) -> Result<(), DomainError> {
        let until = subscription.end_date.unwrap_or_else(Timestamp::now);
        let message = format!(
            "Your subscription '{}' has been cancelled successfully. Active until {}.",
            subscription.plan_name,
            until.date_string(),
        );
        self.push(Notification::new(
            user.id,
            NotificationKind::Cancellation,
            message,
        ));
        Ok(())
    }
}
