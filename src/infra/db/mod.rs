//! Database connection and initialization.

use std::sync::Arc;

use sea_orm::{
    ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, Schema,
    Statement,
};

use crate::config::Config;
use crate::infra::repositories::entities::{ProductEntity, UserEntity};

/// Database wrapper for connection management.
///
/// The connection sits behind an `Arc` so the stores can share it.
#[derive(Clone)]
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Connect and make sure the `users` and `products` tables exist.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        let database = Self::from_connection(connection);

        database.ensure_schema().await?;
        tracing::info!("Database connected and schema ensured");

        Ok(database)
    }

    /// Wrap an already open connection without touching the schema.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// Get a shared handle to the database connection.
    pub fn get_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Create the tables derived from the entities when they are missing.
    ///
    /// `users` goes first since `products.user_id` references it.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        self.create_table(UserEntity).await?;
        self.create_table(ProductEntity).await?;
        Ok(())
    }

    async fn create_table<E: EntityTrait>(&self, entity: E) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(entity);
        stmt.if_not_exists();

        self.connection.execute(backend.build(&stmt)).await?;
        tracing::debug!(table = %entity.table_name(), "Table ensured");
        Ok(())
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }
    }

    #[tokio::test]
    async fn test_ensure_schema_creates_users_then_products() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([ok(), ok()])
            .into_connection();
        let database = Database::from_connection(connection);

        database.ensure_schema().await.unwrap();

        let connection = Arc::into_inner(database.connection).unwrap();
        let log = connection.into_transaction_log();
        assert_eq!(log.len(), 2);
        let first = format!("{:?}", log[0]);
        let second = format!("{:?}", log[1]);
        assert!(first.contains("CREATE TABLE IF NOT EXISTS"));
        assert!(first.contains("users") && !first.contains("products"));
        assert!(second.contains("CREATE TABLE IF NOT EXISTS"));
        assert!(second.contains("products"));
    }

    #[tokio::test]
    async fn test_ping_executes_select() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([ok()])
            .into_connection();
        let database = Database::from_connection(connection);

        assert!(database.ping().await.is_ok());
    }
}
