//! JSON response bodies.
//!
//! Field names are camelCase on the wire. The user projection includes
//! `passwordHash`; see DESIGN.md for why it is kept. Products expose
//! `createdAt` but not `updatedAt`.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Product, User};
use crate::services::{SignInResult, SignUpResult};

/// User as returned by `GET /user` and embedded in products
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: i32,
    pub user: UserResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
            user: product.owner.into(),
            created_at: product.created_at,
        }
    }
}

/// `{ "products": [...] }`
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductResponse>,
}

impl From<Vec<Product>> for ProductsResponse {
    fn from(products: Vec<Product>) -> Self {
        Self {
            products: products.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub authorized: bool,
    pub token: String,
}

impl From<SignInResult> for SignInResponse {
    fn from(result: SignInResult) -> Self {
        Self {
            authorized: result.authorized,
            token: result.token,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user: UserResponse,
    pub token: String,
}

impl From<SignUpResult> for SignUpResponse {
    fn from(result: SignUpResult) -> Self {
        Self {
            user: result.user.into(),
            token: result.token,
        }
    }
}

/// Created response helper for POST endpoints
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            email: "a@x.com".to_string(),
            password_hash: "hashed".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_response_is_camel_case() {
        let json = serde_json::to_value(UserResponse::from(user())).unwrap();

        assert_eq!(json["passwordHash"], "hashed");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_product_response_embeds_owner() {
        let now = Utc::now();
        let product = Product {
            id: 3,
            name: "P".to_string(),
            description: "A product".to_string(),
            category: "misc".to_string(),
            price: 10,
            owner: user(),
            updated_at: now,
            created_at: now,
        };

        let json = serde_json::to_value(ProductsResponse::from(vec![product])).unwrap();

        assert_eq!(json["products"][0]["user"]["email"], "a@x.com");
        assert!(json["products"][0].get("createdAt").is_some());
        assert!(json["products"][0].get("updatedAt").is_none());
    }
}
