//! Payment attempt entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::foundation::{PaymentId, SubscriptionId, Timestamp, UserId};

/// Maximum number of retries a failed payment may accumulate.
pub const MAX_RETRY_COUNT: u32 = 3;

/// Outcome of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Success,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Success => "Success",
            PaymentStatus::Failed => "Failed",
        };
        write!(f, "{}", s)
    }
}

/// One payment attempt against a subscription.
///
/// Created by payment processing; afterwards only retry may mutate it
/// (status, payment date, retry count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub subscription_id: SubscriptionId,
    pub amount: f64,
    pub payment_date: Timestamp,
    pub status: PaymentStatus,
    pub transaction_reference: String,
    pub retry_count: u32,
    pub failure_reason: Option<String>,
}

impl Payment {
    /// Whether another retry attempt is still allowed.
    pub fn can_retry(&self) -> bool {
        self.status == PaymentStatus::Failed && self.retry_count < MAX_RETRY_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_payment(retry_count: u32) -> Payment {
        Payment {
            id: PaymentId::new(),
            user_id: UserId::new(),
            subscription_id: SubscriptionId::new(),
            amount: 10.0,
            payment_date: Timestamp::now(),
            status: PaymentStatus::Failed,
            transaction_reference: "TXN-20250101000000-1234".to_string(),
            retry_count,
            failure_reason: Some("Insufficient funds".to_string()),
        }
    }

    #[test]
    fn failed_payment_below_cap_can_retry() {
        assert!(failed_payment(0).can_retry());
        assert!(failed_payment(2).can_retry());
    }

    #[test]
    fn retry_cap_blocks_further_attempts() {
        assert!(!failed_payment(3).can_retry());
    }

    #[test]
    fn successful_payment_cannot_retry() {
        let mut payment = failed_payment(0);
        payment.status = PaymentStatus::Success;
        assert!(!payment.can_retry());
    }

    #[test]
    fn round_trips_through_json() {
        let payment = failed_payment(1);
        let json = serde_json::to_string(&payment).unwrap();
        assert!(json.contains("\"Status\":\"Failed\""));
        assert!(json.contains("\"RetryCount\":1"));
        let back: Payment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payment);
    }
}
