//! Runs the todolane HTTP server.
//!
//! Configuration comes from the environment (see [`todolane::config`]); a
//! `.env` file in the working directory is loaded first when present.

use eyre::WrapErr;
use std::sync::Arc;
use tokio::signal;
use todolane::config::{AppConfig, StorageMode};
use todolane::http::{AppState, router};
use todolane::persistence::{apply_schema, build_pool};
use todolane::todo::adapters::{memory::InMemoryTodoRepository, postgres::PostgresTodoRepository};
use todolane::todo::ports::TodoRepository;
use todolane::user::adapters::{memory::InMemoryUserDirectory, postgres::PostgresUserDirectory};
use todolane::user::ports::UserDirectory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "todolane=info,tower_http=info";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().wrap_err("invalid configuration")?;
    tracing::info!(
        storage = ?config.storage_mode,
        policy = ?config.shift_policy,
        "starting todolane"
    );

    let state = build_state(&config).await?;
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.bind_address))?;
    tracing::info!(address = %config.bind_address, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn build_state(config: &AppConfig) -> eyre::Result<AppState> {
    let (todos, users): (Arc<dyn TodoRepository>, Arc<dyn UserDirectory>) =
        match config.storage_mode {
            StorageMode::InMemory => (
                Arc::new(InMemoryTodoRepository::new()),
                Arc::new(InMemoryUserDirectory::new()),
            ),
            StorageMode::Postgres => {
                let url = config
                    .database_url
                    .clone()
                    .ok_or_else(|| eyre::eyre!("DATABASE_URL is not set"))?;
                let pool_size = config.pool_size;
                let auto_migrate = config.auto_migrate;
                let pool = tokio::task::spawn_blocking(move || {
                    let pool = build_pool(&url, pool_size)?;
                    if auto_migrate {
                        apply_schema(&pool)?;
                    }
                    Ok::<_, todolane::persistence::PersistenceSetupError>(pool)
                })
                .await
                .wrap_err("database setup task panicked")?
                .wrap_err("failed to prepare the database")?;
                (
                    Arc::new(PostgresTodoRepository::new(pool.clone())),
                    Arc::new(PostgresUserDirectory::new(pool)),
                )
            }
        };
    Ok(AppState::from_storage(todos, users, config.shift_policy))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
