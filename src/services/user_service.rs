//! User service - Handles user-related business logic.
//!
//! Lookups are pass-through. Registration guards email uniqueness before
//! delegating the insert to the repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID, `None` if absent
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Get user by email, `None` if absent
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user; fails with `EmailAlreadyTaken` if the email is in use
    async fn create(&self, data: NewUser) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    #[tracing::instrument(skip(self, data), fields(email = %data.email))]
    async fn create(&self, data: NewUser) -> AppResult<User> {
        // Check and insert are separate calls; the unique index on
        // users.email catches a concurrent duplicate as a storage fault.
        if self.users.exists_by_email(&data.email).await? {
            tracing::debug!("Email already registered");
            return Err(AppError::EmailAlreadyTaken);
        }

        let user = self.users.create(data).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }
}
