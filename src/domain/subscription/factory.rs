//! Factory for constructing subscription variants from caller input.

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};

use super::{PlanKind, RenewalFrequency, Subscription, SubscriptionStatus};

/// Devices allowed on a basic plan.
pub const BASIC_MAX_DEVICES: u32 = 1;

/// Discount every premium plan is created with.
pub const PREMIUM_DISCOUNT_PERCENTAGE: f64 = 10.0;

/// Features every premium plan is seeded with.
pub const PREMIUM_BONUS_FEATURES: [&str; 2] = ["Priority Support", "Advanced Analytics"];

/// Validates inputs and constructs the correct subscription variant.
pub struct SubscriptionFactory;

impl SubscriptionFactory {
    /// Builds a new subscription of the requested kind.
    ///
    /// The kind is matched case-insensitively: `"basic"` or `"premium"`.
    /// The new subscription gets a fresh id, starts now and is Active.
    ///
    /// # Errors
    ///
    /// Validation error when the kind is blank or unknown, or when
    /// `cost <= 0`.
    pub fn create(
        kind: &str,
        user_id: UserId,
        plan_name: impl Into<String>,
        cost: f64,
        frequency: RenewalFrequency,
    ) -> Result<Subscription, DomainError> {
        if kind.trim().is_empty() {
            return Err(DomainError::validation(
                "kind",
                "subscription type cannot be empty",
            ));
        }
        if cost <= 0.0 {
            return Err(DomainError::validation(
                "cost",
                "cost must be greater than zero",
            ));
        }

        let plan = match kind.trim().to_lowercase().as_str() {
            "basic" => PlanKind::Basic {
                max_devices: BASIC_MAX_DEVICES,
            },
            "premium" => PlanKind::Premium {
                discount_percentage: PREMIUM_DISCOUNT_PERCENTAGE,
                bonus_features: PREMIUM_BONUS_FEATURES
                    .iter()
                    .map(|f| f.to_string())
                    .collect(),
            },
            other => {
                return Err(DomainError::validation(
                    "kind",
                    format!("unknown subscription type: {}", other),
                ))
            }
        };

        Ok(Subscription {
            id: SubscriptionId::new(),
            user_id,
            plan_name: plan_name.into(),
            cost,
            renewal_frequency: frequency,
            start_date: Timestamp::now(),
            end_date: None,
            status: SubscriptionStatus::Active,
            plan,
        })
    }
}
