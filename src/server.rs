//! HTTP server initialization and runtime setup.
//!
//! Establishes the store connection, cache, services, and the Axum server
//! lifecycle. The store is connected (and migrated) before the listener is
//! bound; if that fails the process exits without serving anything.

use crate::application::services::MappingStore;
use crate::config::Config;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{MemoryMappingRepository, PgMappingRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Mapping store (PostgreSQL pool + migrations, or in-memory)
/// - Redis cache (or NullCache fallback)
/// - Services and router
/// - Axum HTTP server with graceful shutdown
///
/// After shutdown the database pool is closed.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (repository, pool) = connect_store(&config).await?;

    let cache = connect_cache(&config).await;

    let generator = Arc::new(RandomCodeGenerator::new(config.code_length));
    let mapping_store = Arc::new(MappingStore::new(
        repository,
        generator,
        config.code_max_attempts,
    ));

    let state = AppState::new(
        mapping_store,
        cache,
        config.base_url.clone(),
        config.click_retry_attempts,
    );

    let app = app_router(
        state,
        config.rate_limit_per_second,
        config.rate_limit_burst,
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the mapping repository selected by `DATABASE_URL`.
///
/// Returns the pool alongside the repository so it can be closed on shutdown.
async fn connect_store(config: &Config) -> Result<(Arc<dyn MappingRepository>, Option<PgPool>)> {
    if config.is_memory_store() {
        tracing::warn!("Using in-memory store; mappings are lost on restart");
        let repository: Arc<dyn MappingRepository> = Arc::new(MemoryMappingRepository::new());
        return Ok((repository, None));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    let repository: Arc<dyn MappingRepository> =
        Arc::new(PgMappingRepository::new(Arc::new(pool.clone())));
    Ok((repository, Some(pool)))
}

/// Builds the redirect cache, falling back to [`NullCache`] when Redis is
/// disabled or unreachable.
async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let redis_url = match &config.redis_url {
        Some(url) if config.is_cache_enabled() => url,
        Some(_) => {
            tracing::warn!("REDIS_URL ignored: the in-memory store cannot share a cache across restarts");
            return Arc::new(NullCache::new());
        }
        None => {
            tracing::info!("Cache disabled (NullCache)");
            return Arc::new(NullCache::new());
        }
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
