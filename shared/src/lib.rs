//! Shared types for the bill-split service
//!
//! Common types used across engine and endpoint crates including the
//! data model (groups, bills, allocations, settlements), the unified
//! error system, and utility helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

// Error system re-exports (for convenient access)
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
