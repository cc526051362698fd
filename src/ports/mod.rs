//! Ports: the trait seams between services and their collaborators.
//!
//! Cross-service notification delivery and the simulated payment gateway
//! are injected through these traits so tests can substitute deterministic
//! implementations.

mod gateway;
mod notifier;

pub use gateway::{
    FixedOutcomeGateway, PaymentGateway, SimulatedGateway, DEFAULT_CHARGE_SUCCESS_RATE,
    DEFAULT_RETRY_SUCCESS_RATE,
};
pub use notifier::Notifier;
