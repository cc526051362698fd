//! Subscription repository with per-user and activity filters.

use std::path::Path;

use crate::domain::foundation::{DomainError, SubscriptionId, UserId};
use crate::domain::subscription::Subscription;

use super::JsonStore;

pub struct SubscriptionRepository {
    store: JsonStore<Subscription, SubscriptionId>,
}

impl SubscriptionRepository {
    pub fn new() -> Self {
        Self {
            store: JsonStore::new(|s| s.id),
        }
    }

    pub fn add(&mut self, subscription: Subscription) {
        self.store.add(subscription);
    }

    pub fn get(&self, id: &SubscriptionId) -> Option<Subscription> {
        self.store.get(id)
    }

    pub fn all(&self) -> Vec<Subscription> {
        self.store.all()
    }

    pub fn update(&mut self, subscription: Subscription) -> Result<(), DomainError> {
        self.store.update(subscription, "Subscription")
    }

    pub fn remove(&mut self, id: &SubscriptionId) {
        self.store.remove(id);
    }

    /// All subscriptions owned by one user.
    pub fn find_by_user(&self, user_id: &UserId) -> Vec<Subscription> {
        self.store
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect()
    }

    /// Subscriptions currently active, computed via each subscription's own
    /// activity rule rather than the stored status flag.
    pub fn find_active(&self) -> Vec<Subscription> {
        self.store.iter().filter(|s| s.is_active()).cloned().collect()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), DomainError> {
        self.store.save_to_file(path)
    }

    pub fn load_from_file(&mut self, path: &Path) {
        self.store.load_from_file(path);
    }
}

impl Default for SubscriptionRepository {
    fn default() -> Self {
        Self::new()
    }
}
