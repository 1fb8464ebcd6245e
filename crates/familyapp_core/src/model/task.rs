//! Household task record.

use crate::model::member::MemberId;
use crate::model::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Something a household member needs to get done.
///
/// `assigned_member_id` is a weak reference: it names a member without
/// guaranteeing that member still exists. Readers must treat an unknown ID
/// the same as "unassigned".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned once at creation and never changed.
    pub id: TaskId,
    pub title: String,
    /// `None` and `Some("")` are distinct and both survive a round trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Wire name `dueDate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    /// Wire name `assignedMemberId`. Not cleared when the member is removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_member_id: Option<MemberId>,
}

impl Task {
    /// Creates an unassigned task with a fresh ID and no description or due date.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    pub fn with_id(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            due_date: None,
            assigned_member_id: None,
        }
    }

    /// Returns whether this task names an assignee, regardless of whether
    /// that member still exists.
    pub fn has_assignee(&self) -> bool {
        self.assigned_member_id.is_some()
    }
}
