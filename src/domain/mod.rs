//! Domain layer: entities, value objects, and the business rules that act on
//! them. Nothing in here touches files or terminals.

pub mod foundation;
pub mod notification;
pub mod payment;
pub mod report;
pub mod subscription;
pub mod user;
