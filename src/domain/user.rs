//! User account entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::foundation::{Timestamp, UserId};

/// Role a user plays in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Customer,
    Admin,
    SystemProcess,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Customer => "Customer",
            UserRole::Admin => "Admin",
            UserRole::SystemProcess => "SystemProcess",
        };
        write!(f, "{}", s)
    }
}

/// A registered user account.
///
/// Owned by the user repository; the id never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_date: Timestamp,
    pub is_active: bool,
}

impl User {
    /// Creates a new active user with a fresh id and creation timestamp.
    ///
    /// Field validation (non-blank name, well-formed email) lives in the
    /// user service, matching where callers can correct their input.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
            created_date: Timestamp::now(),
            is_active: true,
        }
    }
}
