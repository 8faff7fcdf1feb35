//! Cost-allocation engine for the bill-split service
//!
//! Takes a normalized bill, per-item member assignments and a split
//! configuration, and produces a per-member cost breakdown that sums exactly
//! to the bill total. Also derives settlements from an allocation and owns
//! the latest allocation per group with optimistic versioning.

pub mod allocation;
pub mod money;
pub mod settlement;
pub mod store;

// Re-export the main entry points
pub use allocation::{AllocationError, compute_allocation};
pub use settlement::{SettlementError, derive_settlements, summarize, update_status};
pub use store::{AllocationStore, StoreError};
