//! Task aggregate root.

use super::{LaneKey, LaneShift, Position, TodoDomainError, TodoId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Caller-supplied fields of a task.
///
/// Used both for creation and for the generic field update, which replaces
/// every field including the lane but never the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Owning user.
    pub owner: UserId,
    /// Lane the task belongs to.
    pub lane: LaneKey,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    title: String,
    description: String,
    owner_id: UserId,
    #[serde(rename = "status")]
    lane: LaneKey,
    #[serde(rename = "order_id")]
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Persisted task identifier.
    pub id: TodoId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted owner reference.
    pub owner_id: UserId,
    /// Persisted lane.
    pub lane: LaneKey,
    /// Persisted position within the lane.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates a new active task at `position`.
    #[must_use]
    pub fn new(fields: TodoFields, position: Position, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let TodoFields {
            title,
            description,
            owner,
            lane,
        } = fields;

        Self {
            id: TodoId::new(),
            title,
            description,
            owner_id: owner,
            lane,
            position,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            owner_id: data.owner_id,
            lane: data.lane,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Decomposes the task into its persisted representation.
    #[must_use]
    pub fn into_persisted(self) -> PersistedTodoData {
        PersistedTodoData {
            id: self.id,
            title: self.title,
            description: self.description,
            owner_id: self.owner_id,
            lane: self.lane,
            position: self.position,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the lane the task belongs to.
    #[must_use]
    pub const fn lane(&self) -> &LaneKey {
        &self.lane
    }

    /// Returns the order key within the lane.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-delete timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` while the task has not been soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Replaces title, description, owner and lane.
    ///
    /// The position is kept as-is, also when the lane changes.
    pub fn apply_fields(&mut self, fields: TodoFields, clock: &impl Clock) {
        self.title = fields.title;
        self.description = fields.description;
        self.owner_id = fields.owner;
        self.lane = fields.lane;
        self.touch(clock);
    }

    /// Places the task at an explicit position.
    pub fn reposition(&mut self, position: Position, clock: &impl Clock) {
        self.position = position;
        self.touch(clock);
    }

    /// Pushes the task one slot down as part of a sibling shift.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::PositionOverflow`] when the task already
    /// holds the largest representable position.
    pub fn shift_down(&mut self, at: DateTime<Utc>) -> Result<(), TodoDomainError> {
        self.position = self
            .position
            .checked_offset(LaneShift::STEP)
            .ok_or_else(|| TodoDomainError::PositionOverflow(self.lane.to_string()))?;
        self.updated_at = at;
        Ok(())
    }

    /// Marks the task as soft-deleted. The position is left untouched.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
