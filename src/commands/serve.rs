//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{
    Argon2PasswordEncoder, Database, InMemoryProductRepository, InMemoryUserRepository,
    JwtTokenSigner, ProductRepository, ProductStore, UserRepository, UserStore,
};
use crate::services::{Authenticator, ProductManager, UserManager};

/// Wire services on top of the given repositories.
pub fn build_state(
    config: &Config,
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
) -> AppState {
    let user_service = Arc::new(UserManager::new(users));
    let product_service = Arc::new(ProductManager::new(products));
    let auth_service = Arc::new(Authenticator::new(
        user_service,
        Arc::new(Argon2PasswordEncoder::new()),
        Arc::new(JwtTokenSigner::from_config(config)),
    ));

    AppState::new(auth_service, product_service)
}

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let app_state = if args.in_memory {
        tracing::warn!("Using in-memory storage, data is lost on shutdown");
        build_state(
            &config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryProductRepository::new()),
        )
    } else {
        let db = Arc::new(Database::connect(&config).await?);
        build_state(
            &config,
            Arc::new(UserStore::new(db.get_connection())),
            Arc::new(ProductStore::new(db.get_connection())),
        )
        .with_database(db)
    };

    // Build router
    let app = create_router(app_state);

    // Start server
    let host = args.host.unwrap_or(config.server_host);
    let port = args.port.unwrap_or(config.server_port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
