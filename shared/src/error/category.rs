//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Group errors
/// - 2xxx: Bill errors
/// - 3xxx: Allocation errors
/// - 4xxx: Settlement errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Group errors (1xxx)
    Group,
    /// Bill errors (2xxx)
    Bill,
    /// Allocation errors (3xxx)
    Allocation,
    /// Settlement errors (4xxx)
    Settlement,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Group,
            2000..3000 => Self::Bill,
            3000..4000 => Self::Allocation,
            4000..5000 => Self::Settlement,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Group => "group",
            Self::Bill => "bill",
            Self::Allocation => "allocation",
            Self::Settlement => "settlement",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
