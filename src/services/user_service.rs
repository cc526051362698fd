//! User account management.

use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{User, UserRole};
use crate::store::UserRepository;

pub struct UserService {
    users: Arc<Mutex<UserRepository>>,
}

impl UserService {
    pub fn new(users: Arc<Mutex<UserRepository>>) -> Self {
        Self { users }
    }

    /// Registers a new user and returns it.
    ///
    /// # Errors
    ///
    /// Validation error when the name is blank or the email does not
    /// contain `@`.
    pub fn add_user(
        &self,
        name: &str,
        email: &str,
        role: UserRole,
    ) -> Result<User, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "name cannot be empty"));
        }
        if email.trim().is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email", "invalid email address"));
        }

        let user = User::new(name, email, role);
        tracing::info!(user_id = %user.id, "user added");
        self.users
            .lock()
            .expect("user repository lock poisoned")
            .add(user.clone());
        Ok(user)
    }

    /// Overwrites name, email and role of an existing user.
    ///
    /// # Errors
    ///
    /// Not-found error when the id is unknown.
    pub fn update_user(
        &self,
        user_id: &UserId,
        name: &str,
        email: &str,
        role: UserRole,
    ) -> Result<User, DomainError> {
        let mut users = self.users.lock().expect("user repository lock poisoned");
        let mut user = users
            .get(user_id)
            .ok_or_else(|| DomainError::not_found("User", user_id))?;

        user.name = name.to_string();
        user.email = email.to_string();
        user.role = role;

        users.update(user.clone())?;
        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    /// Removes a user. Silent no-op when the id is unknown.
    pub fn remove_user(&self, user_id: &UserId) {
        self.users
            .lock()
            .expect("user repository lock poisoned")
            .remove(user_id);
        tracing::info!(user_id = %user_id, "user removed");
    }

    pub fn get_user(&self, user_id: &UserId) -> Option<User> {
        self.users
            .lock()
            .expect("user repository lock poisoned")
            .get(user_id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .expect("user repository lock poisoned")
            .find_by_email(email)
    }

    pub fn all_users(&self) -> Vec<User> {
        self.users
            .lock()
            .expect("user repository lock poisoned")
            .all()
    }
}
