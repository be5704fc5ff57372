//! Per-lane mutual exclusion for position writers.

use crate::todo::domain::LaneKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Guard that keeps a lane locked until dropped.
pub type LaneGuard = OwnedMutexGuard<()>;

/// Registry of one async mutex per lane.
///
/// Writers of different lanes never contend. Entries for lanes nobody holds
/// are pruned on the next acquisition.
#[derive(Debug, Clone, Default)]
pub struct LaneLocks {
    lanes: Arc<Mutex<HashMap<LaneKey, Arc<AsyncMutex<()>>>>>,
}

impl LaneLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until `lane` is free and returns the guard holding it.
    pub async fn acquire(&self, lane: &LaneKey) -> LaneGuard {
        let mutex = {
            let mut lanes = self.lanes.lock().unwrap_or_else(PoisonError::into_inner);
            lanes.retain(|key, slot| key == lane || Arc::strong_count(slot) > 1);
            Arc::clone(lanes.entry(lane.clone()).or_default())
        };
        mutex.lock_owned().await
    }

    /// Returns how many lanes currently have a registered mutex.
    #[must_use]
    pub fn tracked_lanes(&self) -> usize {
        self.lanes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
