//! Lane keys and the sibling shift applied by explicit moves.

use super::{Position, Todo, TodoId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the status lane a task belongs to.
///
/// Lanes are plain labels. An unseen label is a valid, empty lane.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneKey(String);

impl LaneKey {
    /// Creates a lane key from its label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the lane label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LaneKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which siblings make room when a task is moved to an explicit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShiftPolicy {
    /// Every other active task in the lane moves down one slot, whether or
    /// not the target slot was occupied.
    #[default]
    All,
    /// Only active siblings at or after the target position move down.
    AtOrAfterTarget,
}

/// Error returned while parsing a [`ShiftPolicy`] from configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown lane shift policy: {0}")]
pub struct ParseShiftPolicyError(pub String);

impl FromStr for ShiftPolicy {
    type Err = ParseShiftPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "at_or_after" | "at-or-after" => Ok(Self::AtOrAfterTarget),
            _ => Err(ParseShiftPolicyError(value.to_owned())),
        }
    }
}

/// Bulk position update that accompanies an explicit move.
///
/// Selects the active tasks of one lane other than the moved task, optionally
/// limited to those at or after a threshold, and pushes each one slot down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneShift {
    lane: LaneKey,
    moved: TodoId,
    from: Option<Position>,
}

impl LaneShift {
    /// Amount added to every selected sibling.
    pub const STEP: i64 = 1;

    /// Builds the shift for `moved`, which already carries its new position.
    #[must_use]
    pub fn for_move(moved: &Todo, policy: ShiftPolicy) -> Self {
        let from = match policy {
            ShiftPolicy::All => None,
            ShiftPolicy::AtOrAfterTarget => Some(moved.position()),
        };
        Self {
            lane: moved.lane().clone(),
            moved: moved.id(),
            from,
        }
    }

    /// Returns the lane the shift is scoped to.
    #[must_use]
    pub const fn lane(&self) -> &LaneKey {
        &self.lane
    }

    /// Returns the task excluded from the shift.
    #[must_use]
    pub const fn moved(&self) -> TodoId {
        self.moved
    }

    /// Returns the lowest position affected, or `None` for the whole lane.
    #[must_use]
    pub const fn from(&self) -> Option<Position> {
        self.from
    }

    /// Returns `true` when `todo` is one of the siblings to shift.
    #[must_use]
    pub fn applies_to(&self, todo: &Todo) -> bool {
        todo.is_active()
            && todo.id() != self.moved
            && todo.lane() == &self.lane
            && self.from.is_none_or(|threshold| todo.position() >= threshold)
    }
}
