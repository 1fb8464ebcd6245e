//! Family member record.

use crate::model::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a family member.
pub type MemberId = Uuid;

/// One member of the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Assigned once at creation and never changed; tasks refer to it.
    pub id: MemberId,
    /// Display name. Never blank when built through `FamilyService`.
    pub name: String,
    /// Free-form relationship label, e.g. `Mother` or `Cousin`.
    pub relationship: String,
    /// Serialized as an ISO-8601 UTC string; omitted when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Timestamp>,
}

impl Member {
    /// Creates a member with a freshly generated ID and no birthday.
    pub fn new(name: impl Into<String>, relationship: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, relationship)
    }

    /// Creates a member with a caller-provided ID.
    ///
    /// Used by import paths where identity already exists.
    pub fn with_id(
        id: MemberId,
        name: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            relationship: relationship.into(),
            birthday: None,
        }
    }
}
