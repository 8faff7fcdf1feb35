//! Allocation computation
//!
//! One pure pass from validated inputs to a fully reconciled
//! [`GroupAllocation`]. The caller supplies the timestamp, so the same
//! inputs always produce the same output, byte for byte.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{
    AllocatedItem, Bill, ChargeKind, CostBreakdown, Group, GroupAllocation, ItemAllocation,
    MemberAllocation, SplitConfig, SplitPolicy,
};

use super::distribute;
use super::error::AllocationError;
use super::validate;
use crate::money;

/// Compute the per-member cost breakdown for a bill
///
/// Item costs follow the assignment weights; each shared charge is split
/// per its configured policy and reconciled to the bill-level amount in
/// whole minor units. Member totals are guaranteed to sum exactly to
/// `bill.total_amount`.
///
/// The result carries `version: 0`; the store assigns real versions on
/// write.
pub fn compute_allocation(
    bill: &Bill,
    group: &Group,
    item_allocations: &[ItemAllocation],
    split_config: &SplitConfig,
    computed_at: i64,
) -> Result<GroupAllocation, AllocationError> {
    // 1. Validate before any money moves
    validate::validate_inputs(bill, group, item_allocations)?;

    let exponent = money::minor_unit_exponent(&bill.currency);
    let scale = money::minor_unit_scale(exponent);
    let n = group.members.len();

    // 2. Exact item subtotal per member, in group member order
    let index_of: HashMap<i64, usize> = group
        .members
        .iter()
        .enumerate()
        .map(|(idx, member)| (member.id, idx))
        .collect();
    let mut member_subtotals = vec![Decimal::ZERO; n];
    let mut participants = vec![false; n];
    let mut member_items: Vec<Vec<AllocatedItem>> = vec![Vec::new(); n];
    for alloc in item_allocations {
        let item = bill
            .item(alloc.item_id)
            .ok_or_else(|| AllocationError::UnknownItem {
                item_ids: vec![alloc.item_id],
            })?;
        for share in &alloc.shares {
            let Some(&idx) = index_of.get(&share.member_id) else {
                return Err(AllocationError::UnknownMember {
                    member_ids: vec![share.member_id],
                });
            };
            if share.weight <= 0.0 {
                continue;
            }
            participants[idx] = true;
            member_subtotals[idx] +=
                money::to_decimal(item.total_price) * money::to_decimal(share.weight);
            member_items[idx].push(AllocatedItem {
                item_id: item.id,
                name: item.name.clone(),
                quantity: item.quantity,
                total_price: item.total_price,
                weight: share.weight,
            });
        }
    }
    let group_subtotal: Decimal = member_subtotals.iter().copied().sum();

    // Stated subtotal may drift from the item sum (scan noise); conservation
    // binds to the total, so this is only worth a warning
    if (group_subtotal - money::to_decimal(bill.subtotal)).abs() > money::minor_unit(exponent) {
        tracing::warn!(
            bill_id = bill.id,
            stated = bill.subtotal,
            computed = %group_subtotal,
            "assigned item subtotals drift from the stated bill subtotal"
        );
    }

    // 3. Bill-level category amounts, in minor units
    let discount_total: Decimal = bill
        .discounts
        .iter()
        .map(|d| money::to_decimal(d.amount))
        .sum();
    let fees_total: Decimal = bill
        .additional_fees
        .iter()
        .map(|f| money::to_decimal(f.amount))
        .sum();
    let tax_total = money::to_decimal(bill.tax);
    let service_total = money::to_decimal(bill.service_charge);

    let total_minor = money::to_minor_units(money::to_decimal(bill.total_amount), exponent);
    let discount_minor = money::to_minor_units(discount_total, exponent);
    let tax_minor = money::to_minor_units(tax_total, exponent);
    let service_minor = money::to_minor_units(service_total, exponent);
    let fees_minor = money::to_minor_units(fees_total, exponent);

    // The subtotal column targets whatever makes the columns add up to the
    // stated total, so conservation holds by construction
    let subtotal_target = total_minor + discount_minor - tax_minor - service_minor - fees_minor;
    if subtotal_target < 0 {
        return Err(AllocationError::InconsistentBill {
            stated_total: bill.total_amount,
            derived_total: money::minor_to_f64(
                tax_minor + service_minor + fees_minor - discount_minor,
                exponent,
            ),
        });
    }

    let member_ids: Vec<i64> = group.members.iter().map(|m| m.id).collect();
    let subtotal_units = distribute::reconcile_to_minor_units(
        &member_subtotals,
        subtotal_target,
        &member_ids,
        scale,
    );

    // 4. Distribute each charge category and reconcile its column
    let mut charge_units: Vec<Vec<i64>> = Vec::with_capacity(ChargeKind::ALL.len());
    for kind in ChargeKind::ALL {
        let (amount, target) = match kind {
            ChargeKind::Discount => (discount_total, discount_minor),
            ChargeKind::Tax => (tax_total, tax_minor),
            ChargeKind::ServiceCharge => (service_total, service_minor),
            ChargeKind::AdditionalFees => (fees_total, fees_minor),
        };
        let policy = split_config.policy_for(kind);
        if policy == SplitPolicy::Proportional
            && group_subtotal.is_zero()
            && amount > Decimal::ZERO
        {
            tracing::warn!(
                bill_id = bill.id,
                category = kind.name(),
                "group item subtotal is zero, falling back to equal distribution"
            );
        }
        let shares =
            distribute::charge_shares(amount, policy, &member_subtotals, &participants, group_subtotal);
        charge_units.push(distribute::reconcile_to_minor_units(
            &shares,
            target,
            &member_ids,
            scale,
        ));
    }
    // Columns are in ChargeKind::ALL order
    let discount_units = &charge_units[0];
    let tax_units = &charge_units[1];
    let service_units = &charge_units[2];
    let fees_units = &charge_units[3];

    // 5. Assemble per-member breakdowns; arithmetic stays in minor units
    let mut allocations: Vec<MemberAllocation> = Vec::with_capacity(n);
    let mut allocated_total: i64 = 0;
    for (idx, member) in group.members.iter().enumerate() {
        let total_units = subtotal_units[idx] - discount_units[idx]
            + tax_units[idx]
            + service_units[idx]
            + fees_units[idx];
        allocated_total += total_units;
        allocations.push(MemberAllocation {
            member_id: member.id,
            member_name: member.name.clone(),
            items: std::mem::take(&mut member_items[idx]),
            breakdown: CostBreakdown {
                subtotal: money::minor_to_f64(subtotal_units[idx], exponent),
                discount: money::minor_to_f64(discount_units[idx], exponent),
                tax: money::minor_to_f64(tax_units[idx], exponent),
                service_charge: money::minor_to_f64(service_units[idx], exponent),
                additional_fees: money::minor_to_f64(fees_units[idx], exponent),
                total: money::minor_to_f64(total_units, exponent),
            },
            split_config: *split_config,
        });
    }

    // 6. Conservation: member totals must reproduce the bill total exactly
    if allocated_total != total_minor {
        tracing::error!(
            bill_id = bill.id,
            group_id = group.id,
            allocated = allocated_total,
            expected = total_minor,
            "reconciled member totals do not sum to the bill total"
        );
        return Err(AllocationError::ReconciliationFailed {
            allocated_total: money::minor_to_f64(allocated_total, exponent),
            bill_total: money::minor_to_f64(total_minor, exponent),
        });
    }

    Ok(GroupAllocation {
        group_id: group.id,
        bill_id: bill.id,
        allocations,
        version: 0,
        created_at: computed_at,
    })
}
