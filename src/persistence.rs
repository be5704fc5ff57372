//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Repositories receive a [`PgPool`] at construction time; nothing in the
//! crate holds a process-wide connection.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by the adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for internal use.
pub(crate) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Schema applied by [`apply_schema`]. Every statement is idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_users_and_todos/up.sql");

/// Errors raised while preparing the database for use.
#[derive(Debug, Error)]
pub enum PersistenceSetupError {
    /// The connection pool could not be built or could not hand out a
    /// connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// Executing the schema failed.
    #[error("schema bootstrap failed: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PersistenceSetupError::Pool`] when the pool cannot establish its
/// initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PersistenceSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Creates the `users` and `todos` tables when they do not exist yet.
///
/// # Errors
///
/// Returns [`PersistenceSetupError`] when no connection is available or a
/// statement fails.
pub fn apply_schema(pool: &PgPool) -> Result<(), PersistenceSetupError> {
    let mut connection = pool.get()?;
    connection.batch_execute(SCHEMA_SQL)?;
    Ok(())
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &PgPool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}
