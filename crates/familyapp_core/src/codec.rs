//! JSON codec for the full store state.
//!
//! # Responsibility
//! - Encode the three collections as one self-describing JSON document.
//! - Decode that document back, preserving order and optional-field presence.
//!
//! # Invariants
//! - The document is an object with exactly the keys `members`, `tasks` and
//!   `events`, each an ordered array of records.
//! - Unknown fields are ignored on decode; missing top-level keys are a
//!   decode failure.
//! - `decode(encode(s)) == s` for every snapshot `s`.

use crate::model::event::Event;
use crate::model::member::Member;
use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Failure to convert between store state and its persisted bytes.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid store document: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Owned copy of the full store state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub members: Vec<Member>,
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
}

impl StoreSnapshot {
    /// Returns whether all three collections are empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.tasks.is_empty() && self.events.is_empty()
    }
}

/// Borrowed view used to encode live collections without cloning them.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    members: &'a [Member],
    tasks: &'a [Task],
    events: &'a [Event],
}

/// Encodes an owned snapshot.
pub fn encode(snapshot: &StoreSnapshot) -> CodecResult<Vec<u8>> {
    encode_parts(&snapshot.members, &snapshot.tasks, &snapshot.events)
}

/// Encodes the three collections as one pretty-printed JSON document.
pub fn encode_parts(
    members: &[Member],
    tasks: &[Task],
    events: &[Event],
) -> CodecResult<Vec<u8>> {
    let document = SnapshotRef {
        members,
        tasks,
        events,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Decodes a store document.
///
/// Empty, truncated or wrongly shaped input returns `CodecError`; callers
/// decide whether that means "no prior state".
pub fn decode(bytes: &[u8]) -> CodecResult<StoreSnapshot> {
    Ok(serde_json::from_slice(bytes)?)
}
