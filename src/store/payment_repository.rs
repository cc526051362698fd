//! Payment repository with per-user and failed-status filters.

use std::path::Path;

use crate::domain::foundation::{DomainError, PaymentId, UserId};
use crate::domain::payment::{Payment, PaymentStatus};

use super::JsonStore;

pub struct PaymentRepository {
    store: JsonStore<Payment, PaymentId>,
}

impl PaymentRepository {
    pub fn new() -> Self {
        Self {
            store: JsonStore::new(|p| p.id),
        }
    }

    pub fn add(&mut self, payment: Payment) {
        self.store.add(payment);
    }

    pub fn get(&self, id: &PaymentId) -> Option<Payment> {
        self.store.get(id)
    }

    pub fn all(&self) -> Vec<Payment> {
        self.store.all()
    }

    pub fn update(&mut self, payment: Payment) -> Result<(), DomainError> {
        self.store.update(payment, "Payment")
    }

    pub fn remove(&mut self, id: &PaymentId) {
        self.store.remove(id);
    }

    /// All payments made by one user.
    pub fn find_by_user(&self, user_id: &UserId) -> Vec<Payment> {
        self.store
            .iter()
            .filter(|p| p.user_id == *user_id)
            .cloned()
            .collect()
    }

    /// All payments currently in Failed status.
    pub fn find_failed(&self) -> Vec<Payment> {
        self.store
            .iter()
            .filter(|p| p.status == PaymentStatus::Failed)
            .cloned()
            .collect()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), DomainError> {
        self.store.save_to_file(path)
    }

    pub fn load_from_file(&mut self, path: &Path) {
        self.store.load_from_file(path);
    }
}

impl Default for PaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}
