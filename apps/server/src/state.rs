//! Shared application state

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DatabaseConfig, StorageBackend};
use crate::db::{ensure_schema, InMemoryRecipeStore, PostgresRecipeStore};
use crate::services::RecipeService;

/// Start-up choices that tests override independently of the loaded config.
#[derive(Debug, Clone, Copy)]
pub struct AppStateOptions {
    pub storage: StorageBackend,
    pub init_schema: bool,
}

impl AppStateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            storage: config.storage.backend,
            init_schema: config.database.init_schema,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Present only for the PostgreSQL backend.
    pub db_pool: Option<PgPool>,
    pub recipe_service: Arc<RecipeService>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let options = AppStateOptions::from_config(&config);
        Self::new_with_options(config, options).await
    }

    pub async fn new_with_options(config: Config, options: AppStateOptions) -> anyhow::Result<Self> {
        let (db_pool, recipe_service) = match options.storage {
            StorageBackend::Postgres => {
                let pool = connect_pool(&config.database).await?;
                if options.init_schema {
                    ensure_schema(&pool)
                        .await
                        .context("Failed to create recipe schema")?;
                }
                let store = Arc::new(PostgresRecipeStore::new(pool.clone()));
                (Some(pool), RecipeService::with_store(store))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory recipe store, data is lost on shutdown");
                (None, RecipeService::with_store(Arc::new(InMemoryRecipeStore::new())))
            }
        };

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            recipe_service: Arc::new(recipe_service),
        })
    }
}

async fn connect_pool(database: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let connect_options = database
        .url
        .parse::<PgConnectOptions>()
        .context("Invalid database.url")?
        .options([(
            "statement_timeout",
            format!("{}s", database.statement_timeout_seconds),
        )]);

    let pool = PgPoolOptions::new()
        .min_connections(database.pool_min_size)
        .max_connections(database.pool_max_size)
        .acquire_timeout(Duration::from_secs(database.pool_timeout_seconds))
        .connect_with(connect_options)
        .await
        .context("Failed to connect to PostgreSQL")?;

    tracing::info!(
        min_connections = database.pool_min_size,
        max_connections = database.pool_max_size,
        "Database pool ready"
    );
    Ok(pool)
}
