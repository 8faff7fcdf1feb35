//! Share computation and largest-remainder reconciliation
//!
//! Charges are first split into exact Decimal shares, then rounded to whole
//! minor units so that each column sums to its bill-level amount. Rounding
//! residue goes to the largest fractional remainders, which keeps the
//! per-member error below one minor unit and the outcome independent of
//! member order.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models::SplitPolicy;

/// Unrounded per-member shares of one charge amount, in group member order
///
/// `member_subtotals` are the exact item subtotals and `participants` marks
/// members with at least one assigned item. When nobody's items are worth
/// anything (comped bills), proportional falls back to an equal split among
/// participants so the charge still lands somewhere.
pub(super) fn charge_shares(
    amount: Decimal,
    policy: SplitPolicy,
    member_subtotals: &[Decimal],
    participants: &[bool],
    group_subtotal: Decimal,
) -> Vec<Decimal> {
    let participant_count = participants.iter().filter(|p| **p).count();
    if participant_count == 0 {
        return vec![Decimal::ZERO; member_subtotals.len()];
    }

    let equal_share = amount / Decimal::from(participant_count);
    member_subtotals
        .iter()
        .zip(participants)
        .map(|(subtotal, is_participant)| match policy {
            SplitPolicy::Proportional if group_subtotal > Decimal::ZERO => {
                amount * subtotal / group_subtotal
            }
            _ if *is_participant => equal_share,
            _ => Decimal::ZERO,
        })
        .collect()
}

/// Round shares to minor units so they sum exactly to `target`
///
/// Each share is floored, then leftover units go one by one to the largest
/// fractional remainders, ties broken by ascending member ID. A negative
/// leftover (the bill itself is off by a unit) takes units back from the
/// smallest remainders, ties by descending member ID, and never drives a
/// share negative.
///
/// A gap wider than one unit per member means the stated bill amount drifts
/// from the exact shares (scan noise the caller has already warned about);
/// it is spread evenly across members holding a share before the remainder
/// walk, keeping the whole pass O(n log n).
pub(super) fn reconcile_to_minor_units(
    shares: &[Decimal],
    target: i64,
    member_ids: &[i64],
    scale: Decimal,
) -> Vec<i64> {
    let n = shares.len();
    let mut units: Vec<i64> = Vec::with_capacity(n);
    let mut remainders: Vec<Decimal> = Vec::with_capacity(n);
    for share in shares {
        let scaled = share * scale;
        let floor = scaled.floor();
        // SAFETY: amounts and their list sums are validated against MAX_AMOUNT, so the scaled share fits i64
        units.push(floor.to_i64().expect("scaled share fits i64"));
        remainders.push(scaled - floor);
    }

    let mut leftover = target - units.iter().sum::<i64>();
    if leftover == 0 {
        return units;
    }

    if leftover > 0 {
        // Members holding a share absorb drift; everyone if no one does
        let mut eligible: Vec<usize> = (0..n).filter(|&i| shares[i] > Decimal::ZERO).collect();
        if eligible.is_empty() {
            eligible = (0..n).collect();
        }
        let count = eligible.len() as i64;
        let per_member = leftover / count;
        if per_member > 0 {
            for &idx in &eligible {
                units[idx] += per_member;
            }
            leftover -= per_member * count;
        }
        eligible.sort_by(|&a, &b| {
            remainders[b]
                .cmp(&remainders[a])
                .then(member_ids[a].cmp(&member_ids[b]))
        });
        for &idx in eligible.iter().take(leftover as usize) {
            units[idx] += 1;
        }
    } else {
        // Even removal from non-empty shares until at most one pass remains
        loop {
            let nonzero = units.iter().filter(|u| **u > 0).count() as i64;
            if nonzero == 0 || -leftover <= nonzero {
                break;
            }
            let per_member = (-leftover) / nonzero;
            if per_member == 0 {
                break;
            }
            for unit in units.iter_mut() {
                if *unit > 0 {
                    let take = per_member.min(*unit);
                    *unit -= take;
                    leftover += take;
                }
            }
        }
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            remainders[a]
                .cmp(&remainders[b])
                .then(member_ids[b].cmp(&member_ids[a]))
        });
        let mut i = 0;
        while leftover < 0 {
            let idx = order[i % n];
            if units[idx] > 0 {
                units[idx] -= 1;
                leftover += 1;
            } else if units.iter().all(|u| *u == 0) {
                // Shares cannot go negative; the caller's conservation
                // check reports the residue
                break;
            }
            i += 1;
        }
    }

    units
}
