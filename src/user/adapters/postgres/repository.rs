//! `PostgreSQL` implementation of the user directory port.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::persistence::{PgPool, get_conn_with, run_blocking_with};
use crate::user::{
    domain::{PersistedUserData, User, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, UserDirectoryError::persistence)?;
                f(&mut connection)
            },
            UserDirectoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn register(
        &self,
        profile: &UserProfile,
        created_at: DateTime<Utc>,
    ) -> UserDirectoryResult<User> {
        let new_row = NewUserRow {
            name: profile.name.clone(),
            job_position: profile.job_position.clone(),
            created_at,
            updated_at: created_at,
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            row_to_user(row)
        })
        .await
    }

    async fn update(&self, user: &User) -> UserDirectoryResult<()> {
        let id = user.id();
        let name = user.name().to_owned();
        let job_position = user.job_position().to_owned();
        let updated_at = user.updated_at();
        let deleted_at = user.deleted_at();

        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.filter(users::id.eq(id.value())))
                .set((
                    users::name.eq(name),
                    users::job_position.eq(job_position),
                    users::updated_at.eq(updated_at),
                    users::deleted_at.eq(deleted_at),
                ))
                .execute(connection)
                .map_err(UserDirectoryError::persistence)?;
            if affected == 0 {
                return Err(UserDirectoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_active(&self) -> UserDirectoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            users::table
                .filter(users::deleted_at.is_null())
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?
                .into_iter()
                .map(row_to_user)
                .collect()
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> UserDirectoryResult<User> {
    let UserRow {
        id,
        name,
        job_position,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::new(id).map_err(UserDirectoryError::persistence)?,
        name,
        job_position,
        created_at,
        updated_at,
        deleted_at,
    };
    Ok(User::from_persisted(data))
}
