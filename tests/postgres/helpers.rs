//! Shared test helpers for `PostgreSQL` integration tests.

use rstest::fixture;
use std::sync::{Mutex, PoisonError};
use todolane::persistence::{PgPool, apply_schema, build_pool};
use todolane::todo::domain::{LaneKey, TodoFields};
use todolane::user::domain::UserId;
use uuid::Uuid;

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "TODOLANE_TEST_DATABASE_URL";

// Concurrent `CREATE TABLE IF NOT EXISTS` can still collide on the catalog.
static SCHEMA_LOCK: Mutex<()> = Mutex::new(());

/// Connects to the test database and applies the schema.
///
/// Returns `None` when [`DATABASE_URL_VAR`] is unset, in which case the
/// calling test should return early.
///
/// # Panics
///
/// Panics when the variable is set but the database is unusable, so a
/// misconfigured run fails loudly instead of skipping.
#[fixture]
pub fn pool() -> Option<PgPool> {
    let url = std::env::var(DATABASE_URL_VAR).ok()?;
    let pool = build_pool(&url, 8).expect("test database should accept connections");
    {
        let _guard = SCHEMA_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        apply_schema(&pool).expect("schema should apply to the test database");
    }
    Some(pool)
}

/// Returns a lane name no other test run uses.
#[must_use]
pub fn unique_lane(prefix: &str) -> LaneKey {
    LaneKey::new(format!("{prefix}-{}", Uuid::new_v4()))
}

/// Builds task fields for `lane` owned by user 1.
#[must_use]
pub fn fields(title: &str, lane: &LaneKey) -> TodoFields {
    TodoFields {
        title: title.to_owned(),
        description: String::new(),
        owner: UserId::new(1).expect("constant owner id is valid"),
        lane: lane.clone(),
    }
}

/// Logs that a test was skipped for lack of a database.
#[expect(clippy::print_stderr, reason = "skips must be visible in test output")]
pub fn skip(test: &str) {
    eprintln!("skipping {test}: {DATABASE_URL_VAR} is not set");
}
