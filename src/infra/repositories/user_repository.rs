//! User repository: storage contract and its SeaORM implementation.

use async_trait::async_trait;
use std::sync::Arc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return `Ok(None)` when nothing matches. Storage faults are
/// returned as they come from the engine.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Check whether any user has this email
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Insert a new user
    async fn create(&self, data: NewUser) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(self.db.as_ref()).await?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?;

        Ok(result.map(User::from))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        Ok(User::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use crate::errors::AppError;

    fn model(id: i32) -> user::Model {
        user::Model {
            id,
            email: "a@x.com".to_string(),
            password_hash: "hashed".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        assert!(store.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(4)]])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let user = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(user.id, 4);
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_engine_fault_propagates() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let result = store.find_by_email("a@x.com").await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
