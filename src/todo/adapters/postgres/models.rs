//! Diesel row models for task persistence.

use super::schema::todos;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Owning user identifier.
    pub owner_id: i64,
    /// Lane label.
    pub lane_key: String,
    /// Order key within the lane.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Owning user identifier.
    pub owner_id: i64,
    /// Lane label.
    pub lane_key: String,
    /// Order key within the lane.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Changeset written by the generic field update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todos)]
pub struct TodoFieldsChangeset {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Owning user identifier.
    pub owner_id: i64,
    /// Lane label.
    pub lane_key: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
