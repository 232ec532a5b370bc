//! Application state shared by every handler.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{AuthService, ProductService};

/// Application state containing all services.
///
/// Services are built and wired by the caller (see `commands::serve`).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Product service
    pub product_service: Arc<dyn ProductService>,
    /// Database handle for health checks; `None` when running on in-memory storage
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create new application state with injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        product_service: Arc<dyn ProductService>,
    ) -> Self {
        Self {
            auth_service,
            product_service,
            database: None,
        }
    }

    /// Attach the database used by the health endpoint.
    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}
