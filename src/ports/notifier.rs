//! Notification capability injected into the payment and subscription
//! services. Never a hidden global; the notification service is the
//! production implementation.

use crate::domain::foundation::DomainError;
use crate::domain::payment::Payment;
use crate::domain::subscription::Subscription;
use crate::domain::user::User;

/// Sends domain notifications to a user.
pub trait Notifier: Send + Sync {
    /// Reminds the user that a subscription is coming up for renewal.
    fn renewal_reminder(&self, user: &User, subscription: &Subscription)
        -> Result<(), DomainError>;

    /// Tells the user a payment attempt was declined.
    fn payment_failed(&self, user: &User, payment: &Payment) -> Result<(), DomainError>;

    /// Confirms a subscription cancellation.
    fn cancellation_confirmed(
        &self,
        user: &User,
        subscription: &Subscription,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_is_object_safe() {
        fn _accepts_dyn(_notifier: &dyn Notifier) {}
    }
}
