//! In-memory repositories (for development/testing).
//!
//! Same contract as the SeaORM stores: ids are assigned sequentially from 1,
//! absence is `Ok(None)`, and email uniqueness is enforced like the
//! storage constraint would.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::{ProductRepository, UserRepository};
use crate::domain::{NewProduct, NewUser, Product, User};
use crate::errors::{AppError, AppResult};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Table<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.rows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users.rows.values().any(|u| u.email == email))
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        // Unique index on email
        if users.rows.values().any(|u| u.email == data.email) {
            return Err(AppError::Database(DbErr::Custom(format!(
                "duplicate key value violates unique constraint on users.email: {}",
                data.email
            ))));
        }

        let user = User {
            id: users.next_id(),
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        users.rows.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "Stored user in memory");
        Ok(user)
    }
}

/// In-memory implementation of ProductRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Table<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.rows.get(&id).cloned())
    }

    async fn find(&self) -> AppResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.rows.values().cloned().collect())
    }

    async fn create(&self, data: NewProduct) -> AppResult<Product> {
        let mut products = self.products.write().await;
        let now = Utc::now();

        let product = Product {
            id: products.next_id(),
            name: data.name,
            description: data.description,
            category: data.category,
            price: data.price,
            owner: data.owner,
            updated_at: now,
            created_at: now,
        };
        products.rows.insert(product.id, product.clone());

        Ok(product)
    }

    async fn update(&self, id: i32, product: &Product) -> AppResult<()> {
        let mut products = self.products.write().await;

        // Like an UPDATE ... WHERE id = $1, a missing row is not an error
        if let Some(stored) = products.rows.get_mut(&id) {
            stored.name = product.name.clone();
            stored.description = product.description.clone();
            stored.category = product.category.clone();
            stored.price = product.price;
            stored.owner = product.owner.clone();
            stored.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut products = self.products.write().await;
        products.rows.remove(&id);
        Ok(())
    }
}
