//! Shared building blocks for the domain layer.

mod errors;
mod ids;
mod timestamp;

pub use errors::DomainError;
pub use ids::{NotificationId, PaymentId, SubscriptionId, UserId};
pub use timestamp::Timestamp;
