//! Product service - Product CRUD with ownership checks.
//!
//! Updates and deletes are allowed only to the product's owner. A product
//! owned by someone else is reported exactly like a missing one.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewProduct, Product, UpdateProduct, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::ProductRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ENTITY: &str = "Product";

/// Product service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Get product by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Product>;

    /// List all products
    async fn find(&self) -> AppResult<Vec<Product>>;

    /// Create a product
    async fn create(&self, data: NewProduct) -> AppResult<Product>;

    /// Apply partial changes; returns the merged product
    async fn update(&self, data: UpdateProduct) -> AppResult<Product>;

    /// Delete a product; returns it as it was before deletion
    async fn delete(&self, id: i32, owner: &User) -> AppResult<Product>;
}

/// Concrete implementation of ProductService.
pub struct ProductManager {
    products: Arc<dyn ProductRepository>,
}

impl ProductManager {
    /// Create new product service instance
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// Load `id` if `owner` owns it.
    async fn find_owned(&self, id: i32, owner: &User) -> AppResult<Product> {
        let product = self.find_by_id(id).await?;

        if !product.is_owned_by(owner) {
            tracing::debug!(
                product_id = id,
                owner_id = product.owner.id,
                acting_user_id = owner.id,
                "Product owned by another user"
            );
            return Err(AppError::not_found(ENTITY));
        }

        Ok(product)
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn find_by_id(&self, id: i32) -> AppResult<Product> {
        self.products.find_by_id(id).await?.ok_or_not_found(ENTITY)
    }

    async fn find(&self) -> AppResult<Vec<Product>> {
        self.products.find().await
    }

    #[tracing::instrument(skip(self, data), fields(owner_id = data.owner.id))]
    async fn create(&self, data: NewProduct) -> AppResult<Product> {
        let product = self.products.create(data).await?;
        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    #[tracing::instrument(skip(self, data), fields(product_id = data.id, user_id = data.owner.id))]
    async fn update(&self, data: UpdateProduct) -> AppResult<Product> {
        let UpdateProduct { id, owner, changes } = data;
        let current = self.find_owned(id, &owner).await?;

        let merged = changes.apply_to(current);
        self.products.update(id, &merged).await?;

        tracing::info!("Product updated");
        Ok(merged)
    }

    #[tracing::instrument(skip(self, owner), fields(user_id = owner.id))]
    async fn delete(&self, id: i32, owner: &User) -> AppResult<Product> {
        let snapshot = self.find_owned(id, owner).await?;

        self.products.delete(id).await?;

        tracing::info!("Product deleted");
        Ok(snapshot)
    }
}
