//! `PostgreSQL` repository implementation for lane-ordered task storage.

use super::{
    models::{NewTodoRow, TodoFieldsChangeset, TodoRow},
    schema::todos,
};
use crate::persistence::{PgPool, get_conn_with, run_blocking_with};
use crate::todo::{
    domain::{LaneKey, LaneShift, PersistedTodoData, Position, Todo, TodoId},
    ports::{LaneMoveOutcome, TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
///
/// Moves run inside one transaction that first takes a transaction-scoped
/// advisory lock on the lane, so concurrent moves in a lane are serialized
/// even across processes.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TodoRepositoryError::persistence)?;
                f(&mut connection)
            },
            TodoRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for TodoRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn store(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let todo_id = todo.id();
        let new_row = to_new_row(todo);

        self.run_blocking(move |connection| {
            diesel::insert_into(todos::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TodoRepositoryError::DuplicateTodo(todo_id)
                    }
                    _ => TodoRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<Todo> {
        let todo_id = todo.id();
        let changeset = TodoFieldsChangeset {
            title: todo.title().to_owned(),
            description: todo.description().to_owned(),
            owner_id: todo.owner_id().value(),
            lane_key: todo.lane().as_str().to_owned(),
            updated_at: todo.updated_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::update(active_by_id(todo_id))
                .set(&changeset)
                .returning(TodoRow::as_returning())
                .get_result::<TodoRow>(connection)
                .optional()?
                .ok_or(TodoRepositoryError::NotFound(todo_id))?;
            row_to_todo(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        self.run_blocking(move |connection| {
            let row = todos::table
                .filter(todos::id.eq(id.into_inner()))
                .select(TodoRow::as_select())
                .first::<TodoRow>(connection)
                .optional()?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn find_active(&self) -> TodoRepositoryResult<Vec<Todo>> {
        self.run_blocking(move |connection| {
            todos::table
                .filter(todos::deleted_at.is_null())
                .order((
                    todos::lane_key.asc(),
                    todos::position.asc(),
                    todos::created_at.asc(),
                ))
                .select(TodoRow::as_select())
                .load::<TodoRow>(connection)?
                .into_iter()
                .map(row_to_todo)
                .collect()
        })
        .await
    }

    async fn find_active_in_lane(&self, lane: &LaneKey) -> TodoRepositoryResult<Vec<Todo>> {
        let lane_key = lane.as_str().to_owned();
        self.run_blocking(move |connection| {
            todos::table
                .filter(todos::lane_key.eq(lane_key))
                .filter(todos::deleted_at.is_null())
                .order((todos::position.asc(), todos::created_at.asc()))
                .select(TodoRow::as_select())
                .load::<TodoRow>(connection)?
                .into_iter()
                .map(row_to_todo)
                .collect()
        })
        .await
    }

    async fn count_active_in_lane(&self, lane: &LaneKey) -> TodoRepositoryResult<u64> {
        let lane_key = lane.as_str().to_owned();
        self.run_blocking(move |connection| {
            let count: i64 = todos::table
                .filter(todos::lane_key.eq(lane_key))
                .filter(todos::deleted_at.is_null())
                .count()
                .get_result(connection)?;
            u64::try_from(count).map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn apply_move(
        &self,
        moved: &Todo,
        shift: &LaneShift,
    ) -> TodoRepositoryResult<LaneMoveOutcome> {
        let moved_id = moved.id();
        let position = moved.position().value();
        let at = moved.updated_at();
        let lane_key = shift.lane().as_str().to_owned();
        let threshold = shift.from().map(Position::value);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TodoRepositoryError, _>(|tx| {
                lock_lane(tx, &lane_key)?;

                let moved_row = diesel::update(active_by_id(moved_id))
                    .set((todos::position.eq(position), todos::updated_at.eq(at)))
                    .returning(TodoRow::as_returning())
                    .get_result::<TodoRow>(tx)
                    .optional()?
                    .ok_or(TodoRepositoryError::NotFound(moved_id))?;

                let siblings = todos::table
                    .filter(todos::lane_key.eq(lane_key.clone()))
                    .filter(todos::id.ne(moved_id.into_inner()))
                    .filter(todos::deleted_at.is_null());
                let bump = (
                    todos::position.eq(todos::position + LaneShift::STEP),
                    todos::updated_at.eq(at),
                );
                let shifted = match threshold {
                    None => diesel::update(siblings).set(bump).execute(tx)?,
                    Some(from) => diesel::update(siblings.filter(todos::position.ge(from)))
                        .set(bump)
                        .execute(tx)?,
                };

                Ok(LaneMoveOutcome {
                    moved: row_to_todo(moved_row)?,
                    shifted: u64::try_from(shifted).map_err(TodoRepositoryError::persistence)?,
                })
            })
        })
        .await
    }

    async fn soft_delete(
        &self,
        id: TodoId,
        deleted_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<Todo> {
        self.run_blocking(move |connection| {
            let row = diesel::update(active_by_id(id))
                .set((
                    todos::deleted_at.eq(Some(deleted_at)),
                    todos::updated_at.eq(deleted_at),
                ))
                .returning(TodoRow::as_returning())
                .get_result::<TodoRow>(connection)
                .optional()?
                .ok_or(TodoRepositoryError::NotFound(id))?;
            row_to_todo(row)
        })
        .await
    }
}

type ActiveById = diesel::dsl::Filter<
    diesel::dsl::Filter<todos::table, diesel::dsl::Eq<todos::id, uuid::Uuid>>,
    diesel::dsl::IsNull<todos::deleted_at>,
>;

fn active_by_id(id: TodoId) -> ActiveById {
    todos::table
        .filter(todos::id.eq(id.into_inner()))
        .filter(todos::deleted_at.is_null())
}

/// Serializes writers of one lane until the surrounding transaction ends.
fn lock_lane(connection: &mut PgConnection, lane_key: &str) -> TodoRepositoryResult<()> {
    diesel::sql_query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind::<diesel::sql_types::Text, _>(lane_key)
        .execute(connection)?;
    Ok(())
}

fn to_new_row(todo: &Todo) -> NewTodoRow {
    NewTodoRow {
        id: todo.id().into_inner(),
        title: todo.title().to_owned(),
        description: todo.description().to_owned(),
        owner_id: todo.owner_id().value(),
        lane_key: todo.lane().as_str().to_owned(),
        position: todo.position().value(),
        created_at: todo.created_at(),
        updated_at: todo.updated_at(),
        deleted_at: todo.deleted_at(),
    }
}

fn row_to_todo(row: TodoRow) -> TodoRepositoryResult<Todo> {
    let TodoRow {
        id,
        title,
        description,
        owner_id,
        lane_key,
        position,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    let data = PersistedTodoData {
        id: TodoId::from_uuid(id),
        title,
        description,
        owner_id: UserId::new(owner_id).map_err(TodoRepositoryError::persistence)?,
        lane: LaneKey::new(lane_key),
        position: Position::new(position),
        created_at,
        updated_at,
        deleted_at,
    };
    Ok(Todo::from_persisted(data))
}
