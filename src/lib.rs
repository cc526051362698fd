//! SubTrackr - Subscription Management Demo
//!
//! This crate implements a single-process subscription tracker: users,
//! subscriptions, payments and notifications held in in-memory repositories,
//! with business rules in a domain-service layer and flat-file JSON
//! persistence on load/save.

pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod store;
