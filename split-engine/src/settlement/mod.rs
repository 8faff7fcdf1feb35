//! Settlement derivation and status tracking
//!
//! Once an allocation is accepted, whoever fronted the bill needs to
//! collect. Derivation emits one pending settlement per owing member;
//! status updates enforce the one-way pending to paid machine.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{GroupAllocation, Settlement, SettlementStatus, SettlementSummary};
use shared::util::snowflake_id;
use thiserror::Error;

use crate::money;

/// Settlement failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    #[error("receiver {member_id} is not part of the allocation")]
    UnknownReceiver { member_id: i64 },

    #[error("settlement {settlement_id} cannot go from {from:?} to {to:?}")]
    InvalidStatusTransition {
        settlement_id: i64,
        from: SettlementStatus,
        to: SettlementStatus,
    },
}

impl SettlementError {
    /// Unified error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownReceiver { .. } => ErrorCode::SettlementUnknownReceiver,
            Self::InvalidStatusTransition { .. } => ErrorCode::SettlementInvalidTransition,
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            SettlementError::UnknownReceiver { member_id } => {
                app.with_detail("member_id", member_id)
            }
            SettlementError::InvalidStatusTransition { settlement_id, .. } => {
                app.with_detail("settlement_id", settlement_id)
            }
        }
    }
}

/// Derive who owes whom from an allocation
///
/// The receiver is the member who paid the merchant. Every other member
/// gets one pending settlement over their allocated total, so the pending
/// amounts sum to the bill total minus the receiver's own share. Members
/// owing zero still get a row; marking it paid is how they confirm.
pub fn derive_settlements(
    allocation: &GroupAllocation,
    receiver_member_id: i64,
    created_at: i64,
) -> Result<Vec<Settlement>, SettlementError> {
    if allocation.member(receiver_member_id).is_none() {
        return Err(SettlementError::UnknownReceiver {
            member_id: receiver_member_id,
        });
    }

    Ok(allocation
        .allocations
        .iter()
        .filter(|member| member.member_id != receiver_member_id)
        .map(|member| Settlement {
            id: snowflake_id(),
            group_id: allocation.group_id,
            bill_id: allocation.bill_id,
            payer_member_id: member.member_id,
            payer_name: member.member_name.clone(),
            receiver_member_id,
            amount: member.breakdown.total,
            status: SettlementStatus::Pending,
            created_at,
            paid_at: None,
        })
        .collect())
}

/// Apply a status update, enforcing the one-way transition
pub fn update_status(
    settlement: &mut Settlement,
    next: SettlementStatus,
    at: i64,
) -> Result<(), SettlementError> {
    if !settlement.status.can_transition_to(next) {
        return Err(SettlementError::InvalidStatusTransition {
            settlement_id: settlement.id,
            from: settlement.status,
            to: next,
        });
    }
    settlement.status = next;
    if next == SettlementStatus::Paid {
        settlement.paid_at = Some(at);
    }
    Ok(())
}

/// Aggregate settlement counts and amounts for display
pub fn summarize(settlements: &[Settlement], currency_exponent: u32) -> SettlementSummary {
    let mut pending_count = 0;
    let mut paid_count = 0;
    let mut pending_amount = Decimal::ZERO;
    let mut paid_amount = Decimal::ZERO;
    for settlement in settlements {
        match settlement.status {
            SettlementStatus::Pending => {
                pending_count += 1;
                pending_amount += money::to_decimal(settlement.amount);
            }
            SettlementStatus::Paid => {
                paid_count += 1;
                paid_amount += money::to_decimal(settlement.amount);
            }
        }
    }
    SettlementSummary {
        total_count: settlements.len(),
        pending_count,
        paid_count,
        total_amount: money::to_f64(pending_amount + paid_amount, currency_exponent),
        pending_amount: money::to_f64(pending_amount, currency_exponent),
        paid_amount: money::to_f64(paid_amount, currency_exponent),
    }
}
