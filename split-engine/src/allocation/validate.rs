//! Input validation for the allocation engine
//!
//! Every check runs before any money moves. Checks that report IDs collect
//! all offenders of that kind before failing, so one round trip is enough to
//! fix the input.

use std::collections::HashSet;

use rust_decimal::Decimal;
use shared::models::{Bill, Group, ItemAllocation};

use super::error::AllocationError;
use crate::money::{self, MAX_AMOUNT, MAX_QUANTITY};

/// How far item weights may drift from summing to exactly 1
///
/// Frontends send thirds and sevenths as f64, so exact equality is not
/// achievable.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Reject non-finite, negative or absurdly large amounts
fn require_amount(value: f64, field: &str) -> Result<(), AllocationError> {
    if !value.is_finite() || value < 0.0 || value > MAX_AMOUNT {
        return Err(AllocationError::InvalidAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

pub(super) fn validate_inputs(
    bill: &Bill,
    group: &Group,
    item_allocations: &[ItemAllocation],
) -> Result<(), AllocationError> {
    // 1. Structural checks
    if group.members.is_empty() {
        return Err(AllocationError::EmptyGroup);
    }
    if bill.items.is_empty() {
        return Err(AllocationError::EmptyBill);
    }

    let exponent = money::minor_unit_exponent(&bill.currency);

    // 2. Bill amounts must be sane before any arithmetic. List sums are
    //    capped like single fields, so every value later scaled to minor
    //    units stays inside i64.
    require_amount(bill.subtotal, "subtotal")?;
    require_amount(bill.tax, "tax")?;
    require_amount(bill.service_charge, "service_charge")?;
    require_amount(bill.total_amount, "total_amount")?;
    let mut discount_sum = 0.0_f64;
    for discount in &bill.discounts {
        require_amount(discount.amount, "discount amount")?;
        discount_sum += discount.amount;
    }
    require_amount(discount_sum, "discounts total")?;
    let mut fee_sum = 0.0_f64;
    for fee in &bill.additional_fees {
        require_amount(fee.amount, "additional fee amount")?;
        fee_sum += fee.amount;
    }
    require_amount(fee_sum, "additional fees total")?;
    let mut item_sum = 0.0_f64;
    for item in &bill.items {
        require_amount(item.unit_price, "item unit_price")?;
        require_amount(item.total_price, "item total_price")?;
        item_sum += item.total_price;
        if item.quantity < 1 || item.quantity > MAX_QUANTITY {
            return Err(AllocationError::InvalidQuantity {
                item_id: item.id,
                quantity: item.quantity,
            });
        }

        // Scanned line totals may be off by OCR rounding; the stated
        // total_price stays authoritative
        let line = money::to_decimal(item.unit_price) * Decimal::from(item.quantity);
        if (line - money::to_decimal(item.total_price)).abs() > money::minor_unit(exponent) {
            tracing::warn!(
                item_id = item.id,
                stated = item.total_price,
                computed = %line,
                "item total_price drifts from quantity x unit_price"
            );
        }
    }
    require_amount(item_sum, "items total")?;

    // 3. Every bill item must be assigned exactly once
    let mut seen: HashSet<i64> = HashSet::new();
    let mut unknown_items: Vec<i64> = Vec::new();
    let mut duplicates: Vec<i64> = Vec::new();
    for alloc in item_allocations {
        if bill.item(alloc.item_id).is_none() {
            unknown_items.push(alloc.item_id);
            continue;
        }
        if !seen.insert(alloc.item_id) {
            duplicates.push(alloc.item_id);
        }
    }
    if !unknown_items.is_empty() {
        unknown_items.sort_unstable();
        unknown_items.dedup();
        return Err(AllocationError::UnknownItem {
            item_ids: unknown_items,
        });
    }
    if !duplicates.is_empty() {
        duplicates.sort_unstable();
        duplicates.dedup();
        return Err(AllocationError::DuplicateItemAllocation {
            item_ids: duplicates,
        });
    }
    let mut unassigned: Vec<i64> = bill
        .items
        .iter()
        .map(|item| item.id)
        .filter(|id| !seen.contains(id))
        .collect();
    if !unassigned.is_empty() {
        unassigned.sort_unstable();
        return Err(AllocationError::IncompleteAllocation {
            item_ids: unassigned,
        });
    }

    // 4. Every referenced member must belong to the group
    let mut unknown_members: Vec<i64> = Vec::new();
    for alloc in item_allocations {
        for share in &alloc.shares {
            if !group.contains_member(share.member_id) {
                unknown_members.push(share.member_id);
            }
        }
    }
    if !unknown_members.is_empty() {
        unknown_members.sort_unstable();
        unknown_members.dedup();
        return Err(AllocationError::UnknownMember {
            member_ids: unknown_members,
        });
    }

    // 5. Weights per item must sum to 1
    for alloc in item_allocations {
        let mut sum = 0.0_f64;
        for share in &alloc.shares {
            if !share.weight.is_finite() || share.weight < 0.0 {
                return Err(AllocationError::InvalidWeight {
                    item_id: alloc.item_id,
                    weight_sum: share.weight,
                });
            }
            sum += share.weight;
        }
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AllocationError::InvalidWeight {
                item_id: alloc.item_id,
                weight_sum: sum,
            });
        }
    }

    // 6. The bill must agree with itself: subtotal - discounts + tax +
    //    service charge + fees = total, within one minor unit of scan noise
    let discounts: Decimal = bill
        .discounts
        .iter()
        .map(|d| money::to_decimal(d.amount))
        .sum();
    let fees: Decimal = bill
        .additional_fees
        .iter()
        .map(|f| money::to_decimal(f.amount))
        .sum();
    let derived = money::to_decimal(bill.subtotal) - discounts
        + money::to_decimal(bill.tax)
        + money::to_decimal(bill.service_charge)
        + fees;
    let derived_minor = money::to_minor_units(derived, exponent);
    let total_minor = money::to_minor_units(money::to_decimal(bill.total_amount), exponent);
    if (derived_minor - total_minor).abs() > 1 {
        return Err(AllocationError::InconsistentBill {
            stated_total: bill.total_amount,
            derived_total: money::minor_to_f64(derived_minor, exponent),
        });
    }

    Ok(())
}
