//! Core store for the FamilyApp household organizer.
//! This crate owns the member/task/event collections and their persistence.

pub mod codec;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;

pub use codec::{decode, encode, CodecError, CodecResult, StoreSnapshot};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId};
pub use model::member::{Member, MemberId};
pub use model::task::{Task, TaskId};
pub use model::Timestamp;
pub use service::family_service::{
    FamilyService, NewEvent, NewMember, NewTask, ServiceError, ServiceResult, ValidationError,
};
pub use storage::{
    default_store_path, FileBacking, MemoryBacking, StorageError, StorageResult, StoreBacking,
};
pub use store::{Collection, DataStore, StoreChange, StoreError, StoreResult, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
