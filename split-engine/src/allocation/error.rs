//! Allocation engine errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Validation and reconciliation failures of the allocation engine
///
/// Every validation variant carries the offending IDs so the frontend can
/// highlight exactly what to fix. [`AllocationError::ReconciliationFailed`]
/// is not a user error: the engine guarantees it never fires for inputs that
/// pass validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("bill items not assigned to any member: {item_ids:?}")]
    IncompleteAllocation { item_ids: Vec<i64> },

    #[error("bill items assigned more than once: {item_ids:?}")]
    DuplicateItemAllocation { item_ids: Vec<i64> },

    #[error("allocations reference items not on the bill: {item_ids:?}")]
    UnknownItem { item_ids: Vec<i64> },

    #[error("allocations reference members outside the group: {member_ids:?}")]
    UnknownMember { member_ids: Vec<i64> },

    #[error("weights for item {item_id} sum to {weight_sum}, expected 1")]
    InvalidWeight { item_id: i64, weight_sum: f64 },

    #[error("{field} must be a finite amount between 0 and {max}, got {value}", max = crate::money::MAX_AMOUNT)]
    InvalidAmount { field: String, value: f64 },

    #[error("quantity for item {item_id} must be between 1 and {max}, got {quantity}", max = crate::money::MAX_QUANTITY)]
    InvalidQuantity { item_id: i64, quantity: i32 },

    #[error("bill has no items")]
    EmptyBill,

    #[error("group has no members")]
    EmptyGroup,

    #[error("bill total {stated_total} does not match its components, expected {derived_total}")]
    InconsistentBill { stated_total: f64, derived_total: f64 },

    #[error("member totals sum to {allocated_total} but the bill total is {bill_total}")]
    ReconciliationFailed { allocated_total: f64, bill_total: f64 },
}

impl AllocationError {
    /// Unified error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::IncompleteAllocation { .. } => ErrorCode::AllocationIncomplete,
            Self::DuplicateItemAllocation { .. } => ErrorCode::AllocationDuplicateItem,
            Self::UnknownItem { .. } => ErrorCode::AllocationUnknownItem,
            Self::UnknownMember { .. } => ErrorCode::AllocationUnknownMember,
            Self::InvalidWeight { .. } => ErrorCode::AllocationInvalidWeight,
            Self::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            Self::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            Self::EmptyBill => ErrorCode::BillEmpty,
            Self::EmptyGroup => ErrorCode::GroupEmpty,
            Self::InconsistentBill { .. } => ErrorCode::BillInconsistent,
            Self::ReconciliationFailed { .. } => ErrorCode::AllocationReconciliationFailed,
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            AllocationError::IncompleteAllocation { item_ids }
            | AllocationError::DuplicateItemAllocation { item_ids }
            | AllocationError::UnknownItem { item_ids } => app.with_detail("item_ids", item_ids),
            AllocationError::UnknownMember { member_ids } => {
                app.with_detail("member_ids", member_ids)
            }
            AllocationError::InvalidWeight {
                item_id,
                weight_sum,
            } => app
                .with_detail("item_id", item_id)
                .with_detail("weight_sum", weight_sum),
            AllocationError::InvalidAmount { field, value } => app
                .with_detail("field", field)
                .with_detail("value", value),
            AllocationError::InvalidQuantity { item_id, quantity } => app
                .with_detail("item_id", item_id)
                .with_detail("quantity", quantity),
            AllocationError::InconsistentBill {
                stated_total,
                derived_total,
            } => app
                .with_detail("stated_total", stated_total)
                .with_detail("derived_total", derived_total),
            AllocationError::ReconciliationFailed {
                allocated_total,
                bill_total,
            } => app
                .with_detail("allocated_total", allocated_total)
                .with_detail("bill_total", bill_total),
            AllocationError::EmptyBill | AllocationError::EmptyGroup => app,
        }
    }
}
