//! Payment processing against the simulated gateway.

use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, PaymentId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentStatus, MAX_RETRY_COUNT};
use crate::domain::subscription::Subscription;
use crate::domain::user::User;
use crate::ports::{Notifier, PaymentGateway};
use crate::store::PaymentRepository;

/// Failure reason recorded for declined simulated charges.
const DECLINE_REASON: &str = "Insufficient funds";

pub struct PaymentService {
    payments: Arc<Mutex<PaymentRepository>>,
    gateway: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
}

impl PaymentService {
    pub fn new(
        payments: Arc<Mutex<PaymentRepository>>,
        gateway: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            payments,
            gateway,
            notifier,
        }
    }

    /// Charges a user for a subscription through the simulated gateway.
    ///
    /// The payment is persisted and returned whether the charge succeeds or
    /// not; a decline is reported through the returned payment's status,
    /// never as an error. On decline the user gets a payment-failed
    /// notification.
    ///
    /// # Errors
    ///
    /// Validation error when `amount <= 0`.
    pub fn process_payment(
        &self,
        user: &User,
        subscription: &Subscription,
        amount: f64,
    ) -> Result<Payment, DomainError> {
        if amount <= 0.0 {
            return Err(DomainError::validation(
                "amount",
                "payment amount must be greater than zero",
            ));
        }

        let now = Timestamp::now();
        let mut payment = Payment {
            id: PaymentId::new(),
            user_id: user.id,
            subscription_id: subscription.id,
            amount,
            payment_date: now,
            status: PaymentStatus::Success,
            transaction_reference: self.transaction_reference(now),
            retry_count: 0,
            failure_reason: None,
        };

        if self.gateway.authorize() {
            tracing::info!(payment_id = %payment.id, amount, "payment approved");
        } else {
            payment.status = PaymentStatus::Failed;
            payment.failure_reason = Some(DECLINE_REASON.to_string());
            tracing::warn!(payment_id = %payment.id, amount, "payment declined");
            self.notifier.payment_failed(user, &payment)?;
        }

        self.payments
            .lock()
            .expect("payment repository lock poisoned")
            .add(payment.clone());
        Ok(payment)
    }

    /// Retries a failed payment, at most three times overall.
    ///
    /// Returns whether this retry succeeded. A payment that has exhausted
    /// its retries returns `Ok(false)` without further mutation. The
    /// retried payment is persisted regardless of the draw's outcome.
    ///
    /// # Errors
    ///
    /// Not-found error when the id is unknown; precondition error when the
    /// payment is not in Failed status.
    pub fn retry_failed_payment(&self, payment_id: &PaymentId) -> Result<bool, DomainError> {
        let mut payments = self
            .payments
            .lock()
            .expect("payment repository lock poisoned");
        let mut payment = payments
            .get(payment_id)
            .ok_or_else(|| DomainError::not_found("Payment", payment_id))?;

        if payment.status != PaymentStatus::Failed {
            return Err(DomainError::precondition("can only retry failed payments"));
        }
        if payment.retry_count >= MAX_RETRY_COUNT {
            tracing::warn!(payment_id = %payment_id, "retry limit reached");
            return Ok(false);
        }

        payment.retry_count += 1;
        let succeeded = self.gateway.authorize_retry();
        if succeeded {
            payment.status = PaymentStatus::Success;
            payment.payment_date = Timestamp::now();
        }

        payments.update(payment)?;
        tracing::info!(payment_id = %payment_id, succeeded, "payment retried");
        Ok(succeeded)
    }

    /// All payments for a user, most recent first.
    pub fn payment_history(&self, user_id: &UserId) -> Vec<Payment> {
        let mut history = self
            .payments
            .lock()
            .expect("payment repository lock poisoned")
            .find_by_user(user_id);
        history.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        history
    }

    pub fn get_payment(&self, id: &PaymentId) -> Option<Payment> {
        self.payments
            .lock()
            .expect("payment repository lock poisoned")
            .get(id)
    }

    /// All currently failed payments, for retry workflows.
    pub fn failed_payments(&self) -> Vec<Payment> {
        self.payments
            .lock()
            .expect("payment repository lock poisoned")
            .find_failed()
    }

    /// `TXN-<yyyyMMddHHmmss>-<4-digit suffix>`.
    fn transaction_reference(&self, now: Timestamp) -> String {
        format!(
            "TXN-{}-{}",
            now.compact_string(),
            self.gateway.reference_suffix()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::{RenewalFrequency, SubscriptionFactory};
    use crate::domain::user::UserRole;
    use crate::ports::FixedOutcomeGateway;

    struct RecordingNotifier {
        failed_payments: Mutex<Vec<PaymentId>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                failed_payments: Mutex::new(Vec::new()),
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn renewal_reminder(
            &self,
            _user: &User,
            _subscription: &Subscription,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        fn payment_failed(&self, _user: &User, payment: &Payment) -> Result<(), DomainError> {
            self.failed_payments.lock().unwrap().push(payment.id);
            Ok(())
        }

        fn cancellation_confirmed(
            &self,
            _user: &User,
            _subscription: &Subscription,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn setup(gateway: FixedOutcomeGateway) -> (PaymentService, Arc<RecordingNotifier>, User, Subscription) {
        let notifier = Arc::new(RecordingNotifier::new());
        let service = PaymentService::new(
            Arc::new(Mutex::new(PaymentRepository::new())),
            Arc::new(gateway),
            notifier.clone(),
        );
        let user = User::new("Thandi", "thandi@example.com", UserRole::Customer);
        let subscription = SubscriptionFactory::create(
            "basic",
            user.id,
            "Starter",
            9.99,
            RenewalFrequency::Monthly,
        )
        .unwrap();
        (service, notifier, user, subscription)
    }

    #[test]
    fn approved_payment_is_persisted_as_success() {
        let (service, notifier, user, sub) = setup(FixedOutcomeGateway::approving());

        let payment = service.process_payment(&user, &sub, 9.99).unwrap();

        assert_eq!(payment.status, PaymentStatus::Success);
        assert!(payment.failure_reason.is_none());
        assert_eq!(service.get_payment(&payment.id), Some(payment));
        assert!(notifier.failed_payments.lock().unwrap().is_empty());
    }

    #[test]
    fn declined_payment_is_persisted_and_notifies() {
        let (service, notifier, user, sub) = setup(FixedOutcomeGateway::declining());

        let payment = service.process_payment(&user, &sub, 9.99).unwrap();

        assert_eq!(payment.status, PaymentStatus::Failed);
        assert_eq!(payment.failure_reason.as_deref(), Some("Insufficient funds"));
        assert_eq!(service.get_payment(&payment.id).unwrap().status, PaymentStatus::Failed);
        assert_eq!(notifier.failed_payments.lock().unwrap().as_slice(), &[payment.id]);
    }

    #[test]
    fn transaction_reference_has_the_expected_shape() {
        let (service, _, user, sub) = setup(FixedOutcomeGateway::approving());
        let payment = service.process_payment(&user, &sub, 9.99).unwrap();

        let parts: Vec<&str> = payment.transaction_reference.splitn(3, '-').collect();
        assert_eq!(parts[0], "TXN");
        assert_eq!(parts[1].len(), 14);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2], "4242");
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let (service, _, user, sub) = setup(FixedOutcomeGateway::approving());
        for amount in [0.0, -5.0, -100.0] {
            let result = service.process_payment(&user, &sub, amount);
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }
    }

    #[test]
    fn successful_retry_flips_status_and_counts() {
        let (service, _, user, sub) = setup(FixedOutcomeGateway::new(false, true));
        let payment = service.process_payment(&user, &sub, 9.99).unwrap();

        let succeeded = service.retry_failed_payment(&payment.id).unwrap();

        assert!(succeeded);
        let stored = service.get_payment(&payment.id).unwrap();
        assert_eq!(stored.status, PaymentStatus::Success);
        assert_eq!(stored.retry_count, 1);
        assert!(stored.payment_date >= payment.payment_date);
    }

    #[test]
    fn failed_retry_still_increments_and_persists() {
        let (service, _, user, sub) = setup(FixedOutcomeGateway::declining());
        let payment = service.process_payment(&user, &sub, 9.99).unwrap();

        let succeeded = service.retry_failed_payment(&payment.id).unwrap();

        assert!(!succeeded);
        let stored = service.get_payment(&payment.id).unwrap();
        assert_eq!(stored.status, PaymentStatus::Failed);
        assert_eq!(stored.retry_count, 1);
    }

    #[test]
    fn retry_count_never_exceeds_the_cap() {
        let (service, _, user, sub) = setup(FixedOutcomeGateway::declining());
        let payment = service.process_payment(&user, &sub, 9.99).unwrap();

        for _ in 0..3 {
            assert!(!service.retry_failed_payment(&payment.id).unwrap());
        }
        // Fourth attempt: no retry performed, count untouched.
        assert!(!service.retry_failed_payment(&payment.id).unwrap());
        assert_eq!(service.get_payment(&payment.id).unwrap().retry_count, 3);
    }

    #[test]
    fn retrying_a_successful_payment_is_a_precondition_error() {
        let (service, _, user, sub) = setup(FixedOutcomeGateway::approving());
        let payment = service.process_payment(&user, &sub, 9.99).unwrap();

        let result = service.retry_failed_payment(&payment.id);
        assert!(matches!(result, Err(DomainError::Precondition { .. })));
    }

    #[test]
    fn retrying_an_unknown_payment_is_not_found() {
        let (service, _, _, _) = setup(FixedOutcomeGateway::approving());
        assert!(service
            .retry_failed_payment(&PaymentId::new())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn payment_history_is_most_recent_first() {
        let (service, _, user, sub) = setup(FixedOutcomeGateway::approving());

        let first = service.process_payment(&user, &sub, 1.0).unwrap();
        let mut payments = service.payments.lock().unwrap();
        let mut older = payments.get(&first.id).unwrap();
        older.payment_date = older.payment_date.add_days(-30);
        payments.update(older).unwrap();
        drop(payments);

        let second = service.process_payment(&user, &sub, 2.0).unwrap();

        let history = service.payment_history(&user.id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
    }
}
