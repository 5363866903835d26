//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::anyhow;
use migration::{Migrator, MigratorTrait};

use blog_core::ports::{CsrfProtection, PostRepository};
use blog_infra::{HmacCsrfProtection, SqlitePostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub posts: Arc<dyn PostRepository>,
    pub csrf: Arc<dyn CsrfProtection>,
}

impl AppState {
    /// Connect to the post store, bring its schema up to date and build
    /// the state handed to every request.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db = blog_infra::connect(&config.database).await?;

        // creates the blog_post table on first startup
        Migrator::up(&db, None).await?;
        tracing::info!("Database schema up to date");

        let csrf = HmacCsrfProtection::new(&config.secret_key)
            .map_err(|e| anyhow!("unusable SECRET_KEY: {e}"))?;

        tracing::info!("Application state initialized");

        Ok(Self {
            config: Arc::new(config.clone()),
            posts: Arc::new(SqlitePostRepository::new(db)),
            csrf: Arc::new(csrf),
        })
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by a fresh in-memory database.
    pub async fn in_memory() -> Self {
        let config = AppConfig {
            database: blog_infra::DatabaseConfig::in_memory(),
            ..AppConfig::default()
        };
        Self::new(&config).await.expect("in-memory state")
    }
}
