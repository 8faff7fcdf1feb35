//! Cost-allocation engine
//!
//! Distributes a bill's items and shared charges across group members.
//! Item costs follow explicit assignment weights; discounts, tax, service
//! charge and additional fees are split proportionally to item consumption
//! or equally, per the split configuration. All rounding is reconciled in
//! minor-unit integers so member totals always sum exactly to the bill
//! total.
//!
//! The engine is pure and synchronous. Persistence and concurrency control
//! live in [`crate::store`].

mod distribute;
mod engine;
mod error;
mod validate;

pub use engine::compute_allocation;
pub use error::AllocationError;
pub use validate::WEIGHT_TOLERANCE;
