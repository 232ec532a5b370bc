//! Domain layer - Core business entities
//!
//! Plain data types for users and products, independent of storage and
//! transport. Business rules live in the services layer.

pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductChanges, UpdateProduct};
pub use user::{NewUser, User};
