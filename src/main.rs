//! Service entry point: wires the store, cache backend, coordinator, and
//! router together, then serves until interrupted.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskserve::cache::CacheStore;
use taskserve::http::{router, AppState};
use taskserve::{CacheStats, Config, MemoryCache, RedisCache, TaskResource, TaskStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskserve=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(error) => {
            tracing::error!(%error, host = %config.host, port = config.port, "invalid bind address");
            std::process::exit(1);
        }
    };

    let cache: Arc<dyn CacheStore> = match &config.redis_url {
        Some(url) => match RedisCache::connect(url).await {
            Ok(cache) => {
                tracing::info!(%url, "connected to Redis cache");
                Arc::new(cache)
            }
            Err(error) => {
                tracing::error!(%error, %url, "failed to connect to Redis");
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("no REDIS_URL set, using in-process cache");
            Arc::new(MemoryCache::new())
        }
    };

    let store = Arc::new(TaskStore::new());
    let stats = Arc::new(CacheStats::new());
    let resource = TaskResource::new(store, cache, stats).with_cache_enabled(config.cache_enabled);
    let app = router(AppState {
        resource: Arc::new(resource),
    });

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, %addr, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "listening");

    if let Err(error) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "server error");
        std::process::exit(1);
    }

    tracing::info!("shutdown complete");
}

/// Completes when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
