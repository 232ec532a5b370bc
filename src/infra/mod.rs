//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and schema bootstrap
//! - Repositories (SeaORM and in-memory)
//! - Password hashing and token signing

pub mod db;
pub mod repositories;
pub mod security;

pub use db::Database;
pub use repositories::{
    InMemoryProductRepository, InMemoryUserRepository, ProductRepository, ProductStore,
    UserRepository, UserStore,
};
pub use security::{Argon2PasswordEncoder, Claims, JwtTokenSigner, PasswordEncoder, TokenSigner};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockProductRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use security::{MockPasswordEncoder, MockTokenSigner};
