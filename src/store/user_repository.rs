//! User repository: generic store specialized for users, plus an email
//! lookup.

use std::path::Path;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

use super::JsonStore;

pub struct UserRepository {
    store: JsonStore<User, UserId>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self {
            store: JsonStore::new(|u| u.id),
        }
    }

    pub fn add(&mut self, user: User) {
        self.store.add(user);
    }

    pub fn get(&self, id: &UserId) -> Option<User> {
        self.store.get(id)
    }

    pub fn all(&self) -> Vec<User> {
        self.store.all()
    }

    pub fn update(&mut self, user: User) -> Result<(), DomainError> {
        self.store.update(user, "User")
    }

    pub fn remove(&mut self, id: &UserId) {
        self.store.remove(id);
    }

    /// Case-insensitive exact match on email. Blank input matches nothing.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        if email.trim().is_empty() {
            return None;
        }
        self.store
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), DomainError> {
        self.store.save_to_file(path)
    }

    pub fn load_from_file(&mut self, path: &Path) {
        self.store.load_from_file(path);
    }
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;

    #[test]
    fn find_by_email_matches_case_insensitively() {
        let mut repo = UserRepository::new();
        repo.add(User::new("Thandi", "Thandi@Example.com", UserRole::Customer));

        let found = repo.find_by_email("thandi@example.com").unwrap();
        assert_eq!(found.name, "Thandi");
        assert!(repo.find_by_email("other@example.com").is_none());
    }

    #[test]
    fn find_by_email_ignores_blank_input() {
        let mut repo = UserRepository::new();
        repo.add(User::new("Thandi", "", UserRole::Customer));
        assert!(repo.find_by_email("").is_none());
        assert!(repo.find_by_email("   ").is_none());
    }

    #[test]
    fn update_unknown_user_is_not_found() {
        let mut repo = UserRepository::new();
        let ghost = User::new("Ghost", "ghost@example.com", UserRole::Customer);
        assert!(repo.update(ghost).unwrap_err().is_not_found());
    }
}
