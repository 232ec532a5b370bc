//! Product repository: storage contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};
use std::sync::Arc;

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{NewProduct, Product, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
///
/// Every product returned carries its owner. Lookups return `Ok(None)`
/// when nothing matches; storage faults pass through untouched.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// List every product
    async fn find(&self) -> AppResult<Vec<Product>>;

    /// Insert a new product
    async fn create(&self, data: NewProduct) -> AppResult<Product>;

    /// Overwrite the stored product `id` with `product`'s fields. A row
    /// that no longer exists is not an error.
    async fn update(&self, id: i32, product: &Product) -> AppResult<()>;

    /// Delete product by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: Arc<DatabaseConnection>,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// The foreign key guarantees an owner row; a missing one means the join
/// itself went wrong.
fn with_owner(row: (product::Model, Option<user::Model>)) -> AppResult<Product> {
    let (product, owner) = row;
    let owner = owner.ok_or_else(|| {
        AppError::internal(format!("Product {} has no owner row", product.id))
    })?;
    Ok(product.into_domain(User::from(owner)))
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let row = ProductEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(self.db.as_ref())
            .await?;

        row.map(with_owner).transpose()
    }

    async fn find(&self) -> AppResult<Vec<Product>> {
        let rows = ProductEntity::find()
            .find_also_related(UserEntity)
            .all(self.db.as_ref())
            .await?;

        rows.into_iter().map(with_owner).collect()
    }

    async fn create(&self, data: NewProduct) -> AppResult<Product> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(data.name),
            description: Set(data.description),
            category: Set(data.category),
            price: Set(data.price),
            user_id: Set(data.owner.id),
            updated_at: Set(now),
            created_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        Ok(model.into_domain(data.owner))
    }

    async fn update(&self, id: i32, product: &Product) -> AppResult<()> {
        let changes = ActiveModel {
            id: NotSet,
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            category: Set(product.category.clone()),
            price: Set(product.price),
            user_id: Set(product.owner.id),
            updated_at: Set(chrono::Utc::now()),
            created_at: NotSet,
        };

        // A row deleted since it was read is not an error
        let result = ProductEntity::update_many()
            .set(changes)
            .filter(product::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            tracing::debug!(product_id = id, "Update matched no rows");
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        ProductEntity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn product_model(id: i32, user_id: i32) -> product::Model {
        let now = Utc::now();
        product::Model {
            id,
            name: "P".to_string(),
            description: "A product".to_string(),
            category: "misc".to_string(),
            price: 10,
            user_id,
            updated_at: now,
            created_at: now,
        }
    }

    fn owner(id: i32) -> User {
        User {
            id,
            email: "a@x.com".to_string(),
            password_hash: "hashed".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_keeps_owner() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product_model(9, 3)]])
            .into_connection();
        let store = ProductStore::new(Arc::new(db));

        let product = store
            .create(NewProduct {
                name: "P".to_string(),
                description: "A product".to_string(),
                category: "misc".to_string(),
                price: 10,
                owner: owner(3),
            })
            .await
            .unwrap();

        assert_eq!(product.id, 9);
        assert_eq!(product.owner.id, 3);
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let store = ProductStore::new(Arc::new(db));
        let gone = product_model(42, 3).into_domain(owner(3));

        assert!(store.update(42, &gone).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_executes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let store = ProductStore::new(Arc::new(db));

        assert!(store.delete(9).await.is_ok());
    }

    #[test]
    fn test_missing_owner_row_is_internal_error() {
        let result = with_owner((product_model(9, 3), None));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
