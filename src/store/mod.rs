//! In-memory stores with flat-file JSON persistence.
//!
//! `JsonStore` is the generic keyed collection; each repository specializes
//! it with a key-extraction function and adds its read-only filters.
//! Repositories own the sole authoritative copy of their collection;
//! services share them behind `Arc<Mutex<_>>`, one lock per collection.

mod json_store;
mod notification_repository;
mod payment_repository;
mod subscription_repository;
mod user_repository;

pub use json_store::JsonStore;
pub use notification_repository::NotificationRepository;
pub use payment_repository::PaymentRepository;
pub use subscription_repository::SubscriptionRepository;
pub use user_repository::UserRepository;
