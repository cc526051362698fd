//! Subscription lifecycle operations.

use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{
    RenewalFrequency, Subscription, SubscriptionFactory, SubscriptionStatus,
};
use crate::domain::user::User;
use crate::ports::Notifier;
use crate::store::SubscriptionRepository;

pub struct SubscriptionService {
    subscriptions: Arc<Mutex<SubscriptionRepository>>,
    notifier: Arc<dyn Notifier>,
}

impl SubscriptionService {
    pub fn new(
        subscriptions: Arc<Mutex<SubscriptionRepository>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            subscriptions,
            notifier,
        }
    }

    /// Builds a subscription through the factory and stores it.
    ///
    /// # Errors
    ///
    /// Validation error from the factory (blank or unknown kind,
    /// non-positive cost).
    pub fn create_subscription(
        &self,
        kind: &str,
        user_id: UserId,
        plan_name: &str,
        cost: f64,
        frequency: RenewalFrequency,
    ) -> Result<Subscription, DomainError> {
        let subscription = SubscriptionFactory::create(kind, user_id, plan_name, cost, frequency)?;
        tracing::info!(
            subscription_id = %subscription.id,
            kind = subscription.kind_name(),
            "subscription created"
        );
        self.subscriptions
            .lock()
            .expect("subscription repository lock poisoned")
            .add(subscription.clone());
        Ok(subscription)
    }

    /// Overwrites plan name and cost in place.
    ///
    /// # Errors
    ///
    /// Validation error when `cost <= 0`; not-found error when the id is
    /// unknown.
    pub fn update_subscription(
        &self,
        id: &SubscriptionId,
        plan_name: &str,
        cost: f64,
    ) -> Result<Subscription, DomainError> {
        if cost <= 0.0 {
            return Err(DomainError::validation(
                "cost",
                "cost must be greater than zero",
            ));
        }

        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("subscription repository lock poisoned");
        let mut subscription = subscriptions
            .get(id)
            .ok_or_else(|| DomainError::not_found("Subscription", id))?;

        subscription.plan_name = plan_name.to_string();
        subscription.cost = cost;

        subscriptions.update(subscription.clone())?;
        tracing::info!(subscription_id = %id, "subscription updated");
        Ok(subscription)
    }

    /// Cancels a subscription: status Cancelled, end date now, and a
    /// cancellation notification to the user.
    ///
    /// Deliberately permissive: cancelling an already-cancelled
    /// subscription just resets the end date and notifies again.
    ///
    /// # Errors
    ///
    /// Not-found error when the id is unknown.
    pub fn cancel_subscription(
        &self,
        id: &SubscriptionId,
        user: &User,
    ) -> Result<Subscription, DomainError> {
        let subscription = {
            let mut subscriptions = self
                .subscriptions
                .lock()
                .expect("subscription repository lock poisoned");
            let mut subscription = subscriptions
                .get(id)
                .ok_or_else(|| DomainError::not_found("Subscription", id))?;

            subscription.status = SubscriptionStatus::Cancelled;
            subscription.end_date = Some(Timestamp::now());

            subscriptions.update(subscription.clone())?;
            subscription
        };

        tracing::info!(subscription_id = %id, "subscription cancelled");
        self.notifier.cancellation_confirmed(user, &subscription)?;
        Ok(subscription)
    }

    /// Renews a subscription: end date moves to the next renewal date and
    /// status returns to Active.
    ///
    /// Deliberately permissive: renewing an already-active subscription
    /// extends it further.
    ///
    /// # Errors
    ///
    /// Not-found error when the id is unknown.
    pub fn renew_subscription(&self, id: &SubscriptionId) -> Result<Subscription, DomainError> {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("subscription repository lock poisoned");
        let mut subscription = subscriptions
            .get(id)
            .ok_or_else(|| DomainError::not_found("Subscription", id))?;

        subscription.end_date = Some(subscription.next_renewal_date());
        subscription.status = SubscriptionStatus::Active;

        subscriptions.update(subscription.clone())?;
        tracing::info!(subscription_id = %id, "subscription renewed");
        Ok(subscription)
    }

    /// Sends a renewal reminder for one subscription.
    pub fn send_renewal_reminder(
        &self,
        user: &User,
        subscription: &Subscription,
    ) -> Result<(), DomainError> {
        self.notifier.renewal_reminder(user, subscription)
    }

    pub fn get_subscription(&self, id: &SubscriptionId) -> Option<Subscription> {
        self.subscriptions
            .lock()
            .expect("subscription repository lock poisoned")
            .get(id)
    }

    pub fn user_subscriptions(&self, user_id: &UserId) -> Vec<Subscription> {
        self.subscriptions
            .lock()
            .expect("subscription repository lock poisoned")
            .find_by_user(user_id)
    }

    pub fn all_subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions
            .lock()
            .expect("subscription repository lock poisoned")
            .all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;

    struct RecordingNotifier {
        cancellations: Mutex<Vec<SubscriptionId>>,
        reminders: Mutex<Vec<SubscriptionId>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                cancellations: Mutex::new(Vec::new()),
                reminders: Mutex::new(Vec::new()),
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn renewal_reminder(
            &self,
            _user: &User,
            subscription: &Subscription,
        ) -> Result<(), DomainError> {
            self.reminders.lock().unwrap().push(subscription.id);
            Ok(())
        }

        fn payment_failed(
            &self,
            _user: &User,
            _payment: &crate::domain::payment::Payment,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        fn cancellation_confirmed(
            &self,
            _user: &User,
            subscription: &Subscription,
        ) -> Result<(), DomainError> {
            self.cancellations.lock().unwrap().push(subscription.id);
            Ok(())
        }
    }

    fn setup() -> (SubscriptionService, Arc<RecordingNotifier>, User) {
        let notifier = Arc::new(RecordingNotifier::new());
        let service = SubscriptionService::new(
            Arc::new(Mutex::new(SubscriptionRepository::new())),
            notifier.clone(),
        );
        let user = User::new("Thandi", "thandi@example.com", UserRole::Customer);
        (service, notifier, user)
    }

    #[test]
    fn create_stores_the_subscription() {
        let (service, _, user) = setup();
        let sub = service
            .create_subscription("basic", user.id, "Starter", 9.99, RenewalFrequency::Monthly)
            .unwrap();

        assert_eq!(service.user_subscriptions(&user.id), vec![sub]);
    }

    #[test]
    fn create_propagates_factory_validation() {
        let (service, _, user) = setup();
        let result = service.create_subscription(
            "bogus",
            user.id,
            "Starter",
            9.99,
            RenewalFrequency::Monthly,
        );
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(service.all_subscriptions().is_empty());
    }

    #[test]
    fn update_overwrites_plan_name_and_cost() {
        let (service, _, user) = setup();
        let sub = service
            .create_subscription("basic", user.id, "Starter", 9.99, RenewalFrequency::Monthly)
            .unwrap();

        let updated = service.update_subscription(&sub.id, "Starter Plus", 12.99).unwrap();
        assert_eq!(updated.plan_name, "Starter Plus");
        assert_eq!(service.get_subscription(&sub.id).unwrap().cost, 12.99);
    }

    #[test]
    fn update_rejects_non_positive_cost() {
        let (service, _, user) = setup();
        let sub = service
            .create_subscription("basic", user.id, "Starter", 9.99, RenewalFrequency::Monthly)
            .unwrap();

        let result = service.update_subscription(&sub.id, "Starter", 0.0);
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (service, _, _) = setup();
        let result = service.update_subscription(&SubscriptionId::new(), "X", 5.0);
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn cancel_sets_status_end_date_and_notifies() {
        let (service, notifier, user) = setup();
        let sub = service
            .create_subscription("basic", user.id, "Starter", 9.99, RenewalFrequency::Monthly)
            .unwrap();

        let cancelled = service.cancel_subscription(&sub.id, &user).unwrap();

        assert_eq!(cancelled.status, SubscriptionStatus::Cancelled);
        assert!(cancelled.end_date.is_some());
        assert_eq!(notifier.cancellations.lock().unwrap().as_slice(), &[sub.id]);
    }

    #[test]
    fn cancel_is_permissive_on_repeat_calls() {
        let (service, notifier, user) = setup();
        let sub = service
            .create_subscription("basic", user.id, "Starter", 9.99, RenewalFrequency::Monthly)
            .unwrap();

        service.cancel_subscription(&sub.id, &user).unwrap();
        service.cancel_subscription(&sub.id, &user).unwrap();

        assert_eq!(notifier.cancellations.lock().unwrap().len(), 2);
        assert_eq!(
            service.get_subscription(&sub.id).unwrap().status,
            SubscriptionStatus::Cancelled
        );
    }

    #[test]
    fn renew_extends_end_date_and_reactivates() {
        let (service, _, user) = setup();
        let sub = service
            .create_subscription("basic", user.id, "Starter", 9.99, RenewalFrequency::Monthly)
            .unwrap();
        service.cancel_subscription(&sub.id, &user).unwrap();

        let renewed = service.renew_subscription(&sub.id).unwrap();

        assert_eq!(renewed.status, SubscriptionStatus::Active);
        let end = renewed.end_date.unwrap();
        assert!(end > Timestamp::now());
    }

    #[test]
    fn renew_active_subscription_extends_it_further() {
        let (service, _, user) = setup();
        let sub = service
            .create_subscription("basic", user.id, "Starter", 9.99, RenewalFrequency::Monthly)
            .unwrap();

        let first = service.renew_subscription(&sub.id).unwrap().end_date.unwrap();
        let second = service.renew_subscription(&sub.id).unwrap().end_date.unwrap();
        assert!(second > first);
    }

    #[test]
    fn renew_unknown_id_is_not_found() {
        let (service, _, _) = setup();
        assert!(service
            .renew_subscription(&SubscriptionId::new())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn send_renewal_reminder_goes_through_the_notifier() {
        let (service, notifier, user) = setup();
        let sub = service
            .create_subscription("premium", user.id, "Pro", 30.0, RenewalFrequency::Yearly)
            .unwrap();

        service.send_renewal_reminder(&user, &sub).unwrap();
        assert_eq!(notifier.reminders.lock().unwrap().as_slice(), &[sub.id]);
    }
}
