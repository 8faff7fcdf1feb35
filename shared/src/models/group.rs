//! Group Model

use serde::{Deserialize, Serialize};

/// Group member reference: ID plus a display-name snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupMember {
    pub id: i64,
    pub name: String,
}

/// Group entity
///
/// `members` is ordered; allocation output follows this order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub members: Vec<GroupMember>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Group {
    /// Look up a member by ID
    pub fn member(&self, member_id: i64) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Whether the given ID belongs to this group
    pub fn contains_member(&self, member_id: i64) -> bool {
        self.member(member_id).is_some()
    }
}
