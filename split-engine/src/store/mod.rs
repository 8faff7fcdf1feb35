//! In-memory allocation store with optimistic replacement.
//!
//! One [`GroupAllocation`] is kept per group. Writers either replace it
//! wholesale or pass the version they last read; a stale version is
//! rejected with [`StoreError::VersionConflict`] so the caller can
//! recompute against the current state instead of clobbering it.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use thiserror::Error;

use shared::error::{AppError, ErrorCode};
use shared::models::GroupAllocation;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("no allocation stored for group {group_id}")]
    NotFound { group_id: i64 },

    #[error(
        "allocation for group {group_id} is at version {actual}, caller expected {expected}"
    )]
    VersionConflict {
        group_id: i64,
        expected: u64,
        actual: u64,
    },
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::NotFound { .. } => ErrorCode::AllocationNotFound,
            StoreError::VersionConflict { .. } => ErrorCode::AllocationVersionConflict,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let base = AppError::with_message(err.code(), err.to_string());
        match err {
            StoreError::NotFound { group_id } => base.with_detail("group_id", group_id),
            StoreError::VersionConflict {
                group_id,
                expected,
                actual,
            } => base
                .with_detail("group_id", group_id)
                .with_detail("expected_version", expected)
                .with_detail("actual_version", actual),
        }
    }
}

/// Concurrent map of group ID to the latest allocation result.
///
/// Versions are store-assigned: the first write for a group stores
/// version 1 and every replacement increments it, regardless of what
/// the caller put in the `version` field.
#[derive(Debug, Default)]
pub struct AllocationStore {
    allocations: DashMap<i64, GroupAllocation>,
}

impl AllocationStore {
    pub fn new() -> Self {
        Self {
            allocations: DashMap::new(),
        }
    }

    /// Snapshot of the current allocation for a group
    pub fn get(&self, group_id: i64) -> Option<GroupAllocation> {
        self.allocations.get(&group_id).map(|a| a.clone())
    }

    /// Current stored version for a group, if any
    pub fn version(&self, group_id: i64) -> Option<u64> {
        self.allocations.get(&group_id).map(|a| a.version)
    }

    /// Store an allocation unconditionally and return its new version
    pub fn replace(&self, mut allocation: GroupAllocation) -> u64 {
        match self.allocations.entry(allocation.group_id) {
            Entry::Occupied(mut entry) => {
                allocation.version = entry.get().version + 1;
                let version = allocation.version;
                entry.insert(allocation);
                version
            }
            Entry::Vacant(entry) => {
                allocation.version = 1;
                entry.insert(allocation);
                1
            }
        }
    }

    /// Store an allocation only if the group is still at `expected`.
    ///
    /// Pass `expected = 0` to require that no allocation exists yet.
    /// On success returns the new version; on mismatch nothing is
    /// written and the caller should re-read before retrying.
    pub fn replace_if_version(
        &self,
        expected: u64,
        mut allocation: GroupAllocation,
    ) -> Result<u64, StoreError> {
        let group_id = allocation.group_id;
        match self.allocations.entry(group_id) {
            Entry::Occupied(mut entry) => {
                let actual = entry.get().version;
                if actual != expected {
                    return Err(StoreError::VersionConflict {
                        group_id,
                        expected,
                        actual,
                    });
                }
                allocation.version = actual + 1;
                let version = allocation.version;
                entry.insert(allocation);
                Ok(version)
            }
            Entry::Vacant(entry) => {
                if expected != 0 {
                    return Err(StoreError::NotFound { group_id });
                }
                allocation.version = 1;
                entry.insert(allocation);
                Ok(1)
            }
        }
    }

    /// Drop a group's allocation, returning it if one was stored
    pub fn remove(&self, group_id: i64) -> Option<GroupAllocation> {
        self.allocations.remove(&group_id).map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}
