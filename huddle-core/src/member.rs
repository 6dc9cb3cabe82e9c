//! The member roster.
//!
//! Membership is fixed at compile time: huddle is a tool for one small
//! group of friends, not a multi-tenant service. The remote store carries
//! a matching `members` table so RSVPs and time-away rows can join
//! against it, but the client never creates or edits members at runtime.

use serde::{Deserialize, Serialize};

/// A member of the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Display color as a hex string (e.g. "#ef4444").
    pub color: String,
}

/// The ten (id, name, color) entries of the roster.
const ROSTER: &[(&str, &str, &str)] = &[
    ("monalisa", "Monalisa", "#ef4444"),
    ("steffin", "Steffin", "#3b82f6"),
    ("kiana", "Kiana", "#10b981"),
    ("ira", "Ira", "#f59e0b"),
    ("saylee", "Saylee", "#8b5cf6"),
    ("manali", "Manali", "#ec4899"),
    ("minh_hai", "Minh Hai", "#06b6d4"),
    ("zhan_wei", "Zhan Wei", "#84cc16"),
    ("ben", "Ben", "#f97316"),
    ("shawn", "Shawn", "#6366f1"),
];

impl Member {
    /// All members, in roster order.
    pub fn roster() -> Vec<Member> {
        ROSTER
            .iter()
            .map(|(id, name, color)| Member {
                id: (*id).to_string(),
                name: (*name).to_string(),
                color: (*color).to_string(),
            })
            .collect()
    }

    /// Look up a member by id.
    pub fn find(id: &str) -> Option<Member> {
        Self::roster().into_iter().find(|m| m.id == id)
    }

    /// Look up a member by id or (case-insensitive) name.
    pub fn resolve(name_or_id: &str) -> Option<Member> {
        Self::roster()
            .into_iter()
            .find(|m| m.id == name_or_id || m.name.eq_ignore_ascii_case(name_or_id))
    }
}
