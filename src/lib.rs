//! Storefront API - authentication, users and products over REST
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities
//! - **services**: Application use cases (auth, users, products)
//! - **infra**: Database, repositories, password hashing and tokens
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: JSON response bodies
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against Postgres
//! cargo run -- serve
//!
//! # Start the server with in-memory storage
//! cargo run -- serve --in-memory
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Product, User};
pub use errors::{AppError, AppResult};
