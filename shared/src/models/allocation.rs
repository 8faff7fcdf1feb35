//! Allocation Model
//!
//! Input and output types for the cost-allocation engine: how bill items
//! are assigned to members, which split policy applies per charge
//! category, and the reconciled per-member result.

use serde::{Deserialize, Serialize};

// ============================================================================
// Split Configuration
// ============================================================================

/// Split policy for one shared-charge category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitPolicy {
    /// Distribute in proportion to each member's item subtotal
    #[default]
    Proportional,
    /// Divide evenly across members with at least one assigned item
    Equal,
}

/// Shared-charge categories of a bill
///
/// Fixed enumeration so the distribution loop can treat every category
/// uniformly instead of special-casing four fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeKind {
    /// Subtracted from member totals
    Discount,
    Tax,
    ServiceCharge,
    AdditionalFees,
}

impl ChargeKind {
    /// All categories in distribution order
    pub const ALL: [ChargeKind; 4] = [
        ChargeKind::Discount,
        ChargeKind::Tax,
        ChargeKind::ServiceCharge,
        ChargeKind::AdditionalFees,
    ];

    /// Lowercase name for logging and error messages
    pub fn name(&self) -> &'static str {
        match self {
            ChargeKind::Discount => "discount",
            ChargeKind::Tax => "tax",
            ChargeKind::ServiceCharge => "service_charge",
            ChargeKind::AdditionalFees => "additional_fees",
        }
    }
}

/// Per-category split policy selection
///
/// Missing fields deserialize as `PROPORTIONAL`, so a UI form that only
/// submits overrides still yields a complete config.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SplitConfig {
    pub discount: SplitPolicy,
    pub tax: SplitPolicy,
    pub service_charge: SplitPolicy,
    pub additional_fees: SplitPolicy,
}

impl SplitConfig {
    /// Uniform policy lookup, used by the category distribution loop
    pub fn policy_for(&self, kind: ChargeKind) -> SplitPolicy {
        match kind {
            ChargeKind::Discount => self.discount,
            ChargeKind::Tax => self.tax,
            ChargeKind::ServiceCharge => self.service_charge,
            ChargeKind::AdditionalFees => self.additional_fees,
        }
    }
}

// ============================================================================
// Allocation Input
// ============================================================================

/// One member's fraction of an item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationShare {
    pub member_id: i64,
    /// Fraction of the item's total price (weights per item sum to 1)
    pub weight: f64,
}

/// Assignment of one bill item to one or more members
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemAllocation {
    pub item_id: i64,
    pub shares: Vec<AllocationShare>,
}

impl ItemAllocation {
    /// Equal split among the given members (the default assignment)
    pub fn equal_split(item_id: i64, member_ids: &[i64]) -> Self {
        let weight = if member_ids.is_empty() {
            0.0
        } else {
            1.0 / member_ids.len() as f64
        };
        Self {
            item_id,
            shares: member_ids
                .iter()
                .map(|&member_id| AllocationShare { member_id, weight })
                .collect(),
        }
    }
}

// ============================================================================
// Allocation Output
// ============================================================================

/// Item assigned to a member, with the applied weight
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocatedItem {
    pub item_id: i64,
    /// Name snapshot (bills are immutable, but the payload must stand alone)
    pub name: String,
    pub quantity: i32,
    pub total_price: f64,
    /// This member's fraction of the item (0..=1)
    pub weight: f64,
}

/// Cost breakdown for one member, reconciled to the currency's minor unit
///
/// Across all members each column sums exactly to the corresponding
/// bill-level amount, and `total` sums exactly to the bill total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CostBreakdown {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub service_charge: f64,
    pub additional_fees: f64,
    /// subtotal − discount + tax + service_charge + additional_fees
    pub total: f64,
}

impl CostBreakdown {
    /// Charge column for a category
    pub fn charge(&self, kind: ChargeKind) -> f64 {
        match kind {
            ChargeKind::Discount => self.discount,
            ChargeKind::Tax => self.tax,
            ChargeKind::ServiceCharge => self.service_charge,
            ChargeKind::AdditionalFees => self.additional_fees,
        }
    }
}

/// Per-member allocation result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberAllocation {
    pub member_id: i64,
    /// Name snapshot at computation time
    pub member_name: String,
    /// Items assigned to this member
    pub items: Vec<AllocatedItem>,
    pub breakdown: CostBreakdown,
    /// Split configuration snapshot used to compute this allocation
    pub split_config: SplitConfig,
}

/// Finalized allocation of one bill across one group
///
/// Owned by its group; recomputation replaces it wholesale. Callers
/// persist it as an opaque JSON payload and never re-derive member
/// breakdowns from storage, so historical results stay stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupAllocation {
    pub group_id: i64,
    pub bill_id: i64,
    /// One entry per group member, in group order
    pub allocations: Vec<MemberAllocation>,
    /// Store-assigned version for optimistic replacement (0 = never stored)
    #[serde(default)]
    pub version: u64,
    pub created_at: i64,
}

impl GroupAllocation {
    /// Look up a member's allocation
    pub fn member(&self, member_id: i64) -> Option<&MemberAllocation> {
        self.allocations.iter().find(|a| a.member_id == member_id)
    }
}
