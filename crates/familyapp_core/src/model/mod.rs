//! Household domain model: members, tasks and events.
//!
//! # Responsibility
//! - Define the plain records owned by the store.
//! - Keep wire naming (`camelCase`, ISO-8601 dates) next to the types.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reassigned.
//! - Optional fields distinguish "absent" from "empty"; absent fields are not
//!   written to the wire at all.
//! - Records carry no validation; callers validate before construction.

pub mod event;
pub mod member;
pub mod task;

use chrono::{DateTime, Utc};

/// Point in time used by every date field.
///
/// Serialized as an RFC 3339 / ISO-8601 string in UTC.
pub type Timestamp = DateTime<Utc>;
