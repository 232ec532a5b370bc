//! Product domain entity and related types.

use chrono::{DateTime, Utc};

use super::User;

/// Product domain entity. Always carries its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: i32,
    pub owner: User,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Check if `user` owns this product
    pub fn is_owned_by(&self, user: &User) -> bool {
        self.owner.is(user)
    }
}

/// Product creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: i32,
    pub owner: User,
}

/// Partial product update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<i32>,
}

impl ProductChanges {
    /// Overlay these changes on `product`.
    pub fn apply_to(self, product: Product) -> Product {
        Product {
            name: self.name.unwrap_or(product.name),
            description: self.description.unwrap_or(product.description),
            category: self.category.unwrap_or(product.category),
            price: self.price.unwrap_or(product.price),
            ..product
        }
    }
}

/// Update request: which product, who is asking, and what changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProduct {
    pub id: i32,
    pub owner: User,
    pub changes: ProductChanges,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            password_hash: "hashed".to_string(),
            created_at: Utc::now(),
        }
    }

    fn product() -> Product {
        let now = Utc::now();
        Product {
            id: 7,
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            category: "Lighting".to_string(),
            price: 25,
            owner: user(1),
            updated_at: now,
            created_at: now,
        }
    }

    #[test]
    fn test_apply_partial_changes() {
        let original = product();
        let changes = ProductChanges {
            price: Some(30),
            ..Default::default()
        };

        let merged = changes.apply_to(original.clone());

        assert_eq!(merged.price, 30);
        assert_eq!(merged.name, original.name);
        assert_eq!(merged.description, original.description);
        assert_eq!(merged.category, original.category);
        assert_eq!(merged.owner, original.owner);
        assert_eq!(merged.updated_at, original.updated_at);
    }

    #[test]
    fn test_empty_changes_keep_product() {
        let original = product();
        assert_eq!(ProductChanges::default().apply_to(original.clone()), original);
    }

    #[test]
    fn test_ownership_is_by_id() {
        let product = product();
        let mut same_id = user(1);
        same_id.email = "renamed@example.com".to_string();

        assert!(product.is_owned_by(&same_id));
        assert!(!product.is_owned_by(&user(2)));
    }
}
