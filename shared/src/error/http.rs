//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::GroupNotFound
            | Self::MemberNotFound
            | Self::BillNotFound
            | Self::AllocationNotFound
            | Self::SettlementNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::AllocationVersionConflict
            | Self::SettlementInvalidTransition => StatusCode::CONFLICT,

            // 500 Internal Server Error
            // Reconciliation failure is an engine defect, never bad input
            Self::AllocationReconciliationFailed
            | Self::InternalError
            | Self::SerializationError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
