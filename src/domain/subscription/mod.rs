//! Subscription entity and lifecycle rules.
//!
//! A subscription is a tagged variant: every plan shares the common payload
//! (cost, frequency, dates, status) and carries either a Basic or a Premium
//! payload. Cost, activity and renewal-date rules are pattern matches over
//! the tag. The tag is also the JSON discriminator (`"kind"`), so Basic and
//! Premium round-trip through the flat-file persistence without losing their
//! variant-only fields.

mod factory;

pub use factory::SubscriptionFactory;

use serde::{Deserialize, Serialize};
use std::fmt;

use super::foundation::{SubscriptionId, Timestamp, UserId};

/// Extra days a premium subscription stays active past its end date.
pub const PREMIUM_GRACE_PERIOD_DAYS: i64 = 7;

/// Cadence at which a subscription's billing period recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenewalFrequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl fmt::Display for RenewalFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RenewalFrequency::Monthly => "Monthly",
            RenewalFrequency::Quarterly => "Quarterly",
            RenewalFrequency::Yearly => "Yearly",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Cancelled => "Cancelled",
            SubscriptionStatus::Expired => "Expired",
        };
        write!(f, "{}", s)
    }
}

/// Variant-specific payload of a subscription.
///
/// The `kind` tag doubles as the persistence discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlanKind {
    #[serde(rename_all = "PascalCase")]
    Basic { max_devices: u32 },
    #[serde(rename_all = "PascalCase")]
    Premium {
        discount_percentage: f64,
        bonus_features: Vec<String>,
    },
}

/// A user's subscription to a plan.
///
/// # Invariants
///
/// - `cost > 0` (enforced at creation and update)
/// - `id` is immutable after creation
/// - `end_date` is set only by cancel or renew
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan_name: String,
    pub cost: f64,
    pub renewal_frequency: RenewalFrequency,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub status: SubscriptionStatus,
    #[serde(flatten)]
    pub plan: PlanKind,
}

impl Subscription {
    /// Short label for the variant, used in listings.
    pub fn kind_name(&self) -> &'static str {
        match self.plan {
            PlanKind::Basic { .. } => "Basic",
            PlanKind::Premium { .. } => "Premium",
        }
    }

    /// Cost of the next renewal.
    ///
    /// Basic plans pay the full cost; premium plans subtract their
    /// percentage discount.
    pub fn renewal_cost(&self) -> f64 {
        match &self.plan {
            PlanKind::Basic { .. } => self.cost,
            PlanKind::Premium {
                discount_percentage,
                ..
            } => self.cost - self.cost * (discount_percentage / 100.0),
        }
    }

    /// Whether the subscription is active right now.
    pub fn is_active(&self) -> bool {
        self.is_active_at(Timestamp::now())
    }

    /// Activity rule evaluated at an explicit instant.
    ///
    /// Base rule: status is Active and the end date (if any) is strictly in
    /// the future. Premium plans get a grace period: when the base rule
    /// fails and an end date exists, they stay active until seven days past
    /// that end date.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        let base = self.status == SubscriptionStatus::Active
            && self.end_date.map_or(true, |end| end > now);

        match (&self.plan, base, self.end_date) {
            (PlanKind::Premium { .. }, false, Some(end)) => {
                now <= end.add_days(PREMIUM_GRACE_PERIOD_DAYS)
            }
            _ => base,
        }
    }

    /// The date the next billing period would start.
    ///
    /// Counts from the end date when one is set, otherwise from the start
    /// date, advancing by one calendar month, three months or one year
    /// depending on the renewal frequency.
    pub fn next_renewal_date(&self) -> Timestamp {
        let base = self.end_date.unwrap_or(self.start_date);
        match self.renewal_frequency {
            RenewalFrequency::Monthly => base.add_months(1),
            RenewalFrequency::Quarterly => base.add_months(3),
            RenewalFrequency::Yearly => base.add_years(1),
        }
    }
}
