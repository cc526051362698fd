//! Notification repository with per-user and unread filters.

use std::path::Path;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;

use super::JsonStore;

pub struct NotificationRepository {
    store: JsonStore<Notification, NotificationId>,
}

impl NotificationRepository {
    pub fn new() -> Self {
        Self {
            store: JsonStore::new(|n| n.id),
        }
    }

    pub fn add(&mut self, notification: Notification) {
        self.store.add(notification);
    }

    pub fn get(&self, id: &NotificationId) -> Option<Notification> {
        self.store.get(id)
    }

    pub fn all(&self) -> Vec<Notification> {
        self.store.all()
    }

    pub fn update(&mut self, notification: Notification) -> Result<(), DomainError> {
        self.store.update(notification, "Notification")
    }

    pub fn remove(&mut self, id: &NotificationId) {
        self.store.remove(id);
    }

    /// All notifications addressed to one user, read or not.
    pub fn find_by_user(&self, user_id: &UserId) -> Vec<Notification> {
        self.store
            .iter()
            .filter(|n| n.user_id == *user_id)
            .cloned()
            .collect()
    }

    /// Unread notifications addressed to one user.
    pub fn find_unread(&self, user_id: &UserId) -> Vec<Notification> {
        self.store
            .iter()
            .filter(|n| n.user_id == *user_id && !n.is_read)
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

impl Default for NotificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotificationKind;

    #[test]
    fn find_unread_excludes_read_notifications() {
        let user = UserId::new();
        let mut repo = NotificationRepository::new();

        let mut read = Notification::new(user, NotificationKind::Renewal, "old");
        read.is_read = true;
        repo.add(read);
        repo.add(Notification::new(user, NotificationKind::Cancellation, "new"));

        assert_eq!(repo.find_by_user(&user).len(), 2);
        let unread = repo.find_unread(&user);
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].message, "new");
    }
}
