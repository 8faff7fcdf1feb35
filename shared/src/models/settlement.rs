//! Settlement Model
//!
//! Rows derived from a finalized allocation: one per non-receiver member,
//! tracking whether that member has paid the receiver back.

use serde::{Deserialize, Serialize};

/// Settlement status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementStatus {
    #[default]
    Pending,
    Paid,
}

impl SettlementStatus {
    /// Whether a transition to `next` is allowed (pending → paid only,
    /// there is no un-paying)
    pub fn can_transition_to(&self, next: SettlementStatus) -> bool {
        matches!(
            (self, next),
            (SettlementStatus::Pending, SettlementStatus::Paid)
        )
    }
}

/// What one member owes the bill's receiver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub id: i64,
    pub group_id: i64,
    pub bill_id: i64,
    /// Member who owes
    pub payer_member_id: i64,
    /// Payer name snapshot (display survives membership changes)
    pub payer_name: String,
    /// Member who fronted the bill
    pub receiver_member_id: i64,
    pub amount: f64,
    pub status: SettlementStatus,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<i64>,
}

/// Aggregate view over a bill's settlements (payment summary)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SettlementSummary {
    pub total_count: usize,
    pub pending_count: usize,
    pub paid_count: usize,
    pub total_amount: f64,
    pub pending_amount: f64,
    pub paid_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(SettlementStatus::Pending.can_transition_to(SettlementStatus::Paid));
        assert!(!SettlementStatus::Paid.can_transition_to(SettlementStatus::Pending));
        assert!(!SettlementStatus::Paid.can_transition_to(SettlementStatus::Paid));
        assert!(!SettlementStatus::Pending.can_transition_to(SettlementStatus::Pending));
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&SettlementStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");

        let status: SettlementStatus = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(status, SettlementStatus::Paid);
    }

    #[test]
    fn test_settlement_serde_skips_unpaid_timestamp() {
        let settlement = Settlement {
            id: 1,
            group_id: 2,
            bill_id: 3,
            payer_member_id: 10,
            payer_name: "Budi".to_string(),
            receiver_member_id: 11,
            amount: 35000.0,
            status: SettlementStatus::Pending,
            created_at: 0,
            paid_at: None,
        };

        let json = serde_json::to_string(&settlement).unwrap();
        assert!(!json.contains("paid_at"));

        let back: Settlement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settlement);
    }
}
