//! Data models
//!
//! Shared between the allocation engine and the frontend (via API).
//! All IDs are `i64` (snowflake-style, JS-safe). Monetary amounts are
//! JSON numbers; exact arithmetic happens inside the engine.

pub mod allocation;
pub mod bill;
pub mod group;
pub mod settlement;

// Re-exports
pub use allocation::*;
pub use bill::*;
pub use group::*;
pub use settlement::*;
