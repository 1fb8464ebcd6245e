//! Scheduled family event record.

use crate::model::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an event.
pub type EventId = Uuid;

/// A dated happening involving the family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Assigned once at creation and never changed.
    pub id: EventId,
    pub title: String,
    /// Required; serialized as an ISO-8601 UTC string.
    pub date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Creates an event with a fresh ID and no description.
    pub fn new(title: impl Into<String>, date: Timestamp) -> Self {
        Self::with_id(Uuid::new_v4(), title, date)
    }

    pub fn with_id(id: EventId, title: impl Into<String>, date: Timestamp) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            description: None,
        }
    }
}
