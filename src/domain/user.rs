//! User domain entity and related types.

use chrono::{DateTime, Utc};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Assigned by the store on insert
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check whether this user is the one referenced by `other`
    pub fn is(&self, other: &User) -> bool {
        self.id == other.id
    }
}

/// Data needed to persist a new user. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}
