//! Unified error codes for the bill-split service
//!
//! This module defines all error codes used across the engine and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Group errors
//! - 2xxx: Bill errors
//! - 3xxx: Allocation errors
//! - 4xxx: Settlement errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Group ====================
    /// Group not found
    GroupNotFound = 1001,
    /// Member not found
    MemberNotFound = 1002,
    /// Group has no members
    GroupEmpty = 1003,

    // ==================== 2xxx: Bill ====================
    /// Bill not found
    BillNotFound = 2001,
    /// Bill has no items
    BillEmpty = 2002,
    /// Bill total does not match its components
    BillInconsistent = 2003,
    /// Monetary amount is invalid (negative, non-finite or out of range)
    InvalidAmount = 2004,
    /// Item quantity is invalid
    InvalidQuantity = 2005,

    // ==================== 3xxx: Allocation ====================
    /// Not every bill item is assigned to a member
    AllocationIncomplete = 3001,
    /// Allocation references a member outside the group
    AllocationUnknownMember = 3002,
    /// Item assignment weights do not sum to 1
    AllocationInvalidWeight = 3003,
    /// Item is assigned more than once
    AllocationDuplicateItem = 3004,
    /// Allocation references an item not on the bill
    AllocationUnknownItem = 3005,
    /// No allocation stored for the group
    AllocationNotFound = 3006,
    /// Stored allocation version does not match the expected version
    AllocationVersionConflict = 3007,
    /// Reconciled member totals do not sum to the bill total (engine defect)
    AllocationReconciliationFailed = 3008,

    // ==================== 4xxx: Settlement ====================
    /// Settlement not found
    SettlementNotFound = 4001,
    /// Settlement status transition is not allowed
    SettlementInvalidTransition = 4002,
    /// Designated receiver is not part of the allocation
    SettlementUnknownReceiver = 4003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Serialization failed
    SerializationError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Group
            ErrorCode::GroupNotFound => "Group not found",
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::GroupEmpty => "Group has no members",

            // Bill
            ErrorCode::BillNotFound => "Bill not found",
            ErrorCode::BillEmpty => "Bill has no items",
            ErrorCode::BillInconsistent => "Bill total does not match its components",
            ErrorCode::InvalidAmount => "Invalid monetary amount",
            ErrorCode::InvalidQuantity => "Invalid item quantity",

            // Allocation
            ErrorCode::AllocationIncomplete => "Not every bill item is assigned to a member",
            ErrorCode::AllocationUnknownMember => "Allocation references an unknown member",
            ErrorCode::AllocationInvalidWeight => "Item assignment weights do not sum to 1",
            ErrorCode::AllocationDuplicateItem => "Item is assigned more than once",
            ErrorCode::AllocationUnknownItem => "Allocation references an unknown item",
            ErrorCode::AllocationNotFound => "Allocation not found",
            ErrorCode::AllocationVersionConflict => "Allocation was modified concurrently",
            ErrorCode::AllocationReconciliationFailed => {
                "Member totals do not reconcile to the bill total"
            }

            // Settlement
            ErrorCode::SettlementNotFound => "Settlement not found",
            ErrorCode::SettlementInvalidTransition => "Settlement status transition not allowed",
            ErrorCode::SettlementUnknownReceiver => "Receiver is not part of the allocation",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::SerializationError => "Serialization failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Group
            1001 => Ok(ErrorCode::GroupNotFound),
            1002 => Ok(ErrorCode::MemberNotFound),
            1003 => Ok(ErrorCode::GroupEmpty),

            // Bill
            2001 => Ok(ErrorCode::BillNotFound),
            2002 => Ok(ErrorCode::BillEmpty),
            2003 => Ok(ErrorCode::BillInconsistent),
            2004 => Ok(ErrorCode::InvalidAmount),
            2005 => Ok(ErrorCode::InvalidQuantity),

            // Allocation
            3001 => Ok(ErrorCode::AllocationIncomplete),
            3002 => Ok(ErrorCode::AllocationUnknownMember),
            3003 => Ok(ErrorCode::AllocationInvalidWeight),
            3004 => Ok(ErrorCode::AllocationDuplicateItem),
            3005 => Ok(ErrorCode::AllocationUnknownItem),
            3006 => Ok(ErrorCode::AllocationNotFound),
            3007 => Ok(ErrorCode::AllocationVersionConflict),
            3008 => Ok(ErrorCode::AllocationReconciliationFailed),

            // Settlement
            4001 => Ok(ErrorCode::SettlementNotFound),
            4002 => Ok(ErrorCode::SettlementInvalidTransition),
            4003 => Ok(ErrorCode::SettlementUnknownReceiver),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::SerializationError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
