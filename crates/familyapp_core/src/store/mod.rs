//! In-memory household store with whole-document persistence.
//!
//! # Responsibility
//! - Own the member/task/event collections for the process lifetime.
//! - Persist the full state after every successful mutation.
//! - Notify subscribers synchronously with the updated collection.
//!
//! # Invariants
//! - IDs are unique within their collection and never reassigned.
//! - Collections keep insertion order; nothing is sorted implicitly.
//! - A failed load yields empty collections; a failed save is logged and
//!   swallowed, leaving in-memory state authoritative.
//! - Out-of-range removal is the only mutation error surfaced to callers,
//!   and it leaves the store untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

mod data_store;
mod observer;

pub use data_store::DataStore;
pub use observer::{ObserverRegistry, StoreChange, SubscriptionId};

pub type StoreResult<T> = Result<T, StoreError>;

/// Identifies one of the three store collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Members,
    Tasks,
    Events,
}

impl Collection {
    /// Stable label used in logs and wire keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::Tasks => "tasks",
            Self::Events => "events",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-facing store mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A removal position was outside the pre-removal collection bounds.
    OutOfRange {
        collection: Collection,
        position: usize,
        len: usize,
    },
    /// An added record reused an ID already present in the collection.
    DuplicateId { collection: Collection, id: Uuid },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                collection,
                position,
                len,
            } => write!(
                f,
                "position {position} is out of range for {collection} (len {len})"
            ),
            Self::DuplicateId { collection, id } => {
                write!(f, "id {id} already exists in {collection}")
            }
        }
    }
}

impl Error for StoreError {}
