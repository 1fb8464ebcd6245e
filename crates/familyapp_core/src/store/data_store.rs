//! `DataStore` implementation.
//!
//! # Invariants
//! - Construction always succeeds; a store is `Ready` as soon as it exists.
//! - Every successful mutation notifies subscribers, then rewrites the whole
//!   document through the backing.
//! - Update with an unknown ID and removal with an empty position set are
//!   no-ops: no notification, no write.

use super::observer::{ObserverRegistry, StoreChange, SubscriptionId};
use super::{Collection, StoreError, StoreResult};
use crate::codec::{self, StoreSnapshot};
use crate::model::event::{Event, EventId};
use crate::model::member::{Member, MemberId};
use crate::model::task::{Task, TaskId};
use crate::storage::StoreBacking;
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::time::Instant;
use uuid::Uuid;

/// Records addressable by their stable ID.
trait Identified {
    fn record_id(&self) -> Uuid;
}

impl Identified for Member {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Task {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Event {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

/// Single owner of the household collections.
///
/// Generic over its persistence target the same way services are generic
/// over repositories: `FileBacking` in production, `MemoryBacking` for
/// ephemeral use.
#[derive(Debug)]
pub struct DataStore<B: StoreBacking> {
    members: Vec<Member>,
    tasks: Vec<Task>,
    events: Vec<Event>,
    backing: B,
    observers: ObserverRegistry,
}

impl<B: StoreBacking> DataStore<B> {
    /// Loads the persisted document from `backing` and returns a ready store.
    ///
    /// A missing, unreadable or malformed document yields three empty
    /// collections. First run and corruption are not distinguished.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with source, counts and duration.
    pub fn open(backing: B) -> Self {
        let started_at = Instant::now();
        let target = backing.describe();
        info!("event=store_open module=store status=start backing={target}");

        let (snapshot, source) = match backing.read_all() {
            Ok(Some(bytes)) => match codec::decode(&bytes) {
                Ok(snapshot) => (snapshot, "file"),
                Err(err) => {
                    warn!(
                        "event=store_open module=store status=recovered error_code=decode_failed backing={target} error={err}"
                    );
                    (StoreSnapshot::default(), "empty")
                }
            },
            Ok(None) => (StoreSnapshot::default(), "empty"),
            Err(err) => {
                warn!(
                    "event=store_open module=store status=recovered error_code=read_failed backing={target} error={err}"
                );
                (StoreSnapshot::default(), "empty")
            }
        };

        info!(
            "event=store_open module=store status=ok source={source} members={} tasks={} events={} duration_ms={}",
            snapshot.members.len(),
            snapshot.tasks.len(),
            snapshot.events.len(),
            started_at.elapsed().as_millis()
        );

        Self {
            members: snapshot.members,
            tasks: snapshot.tasks,
            events: snapshot.events,
            backing,
            observers: ObserverRegistry::new(),
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Clones the full current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            members: self.members.clone(),
            tasks: self.tasks.clone(),
            events: self.events.clone(),
        }
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Current position of a member, for use with `remove_members`.
    pub fn member_position(&self, id: MemberId) -> Option<usize> {
        position_of(&self.members, id)
    }

    pub fn task_position(&self, id: TaskId) -> Option<usize> {
        position_of(&self.tasks, id)
    }

    pub fn event_position(&self, id: EventId) -> Option<usize> {
        position_of(&self.events, id)
    }

    /// Resolves a task's weak member reference.
    ///
    /// Returns `None` both for unassigned tasks and for assignees that no
    /// longer exist.
    pub fn assignee_of(&self, task: &Task) -> Option<&Member> {
        task.assigned_member_id.and_then(|id| self.member(id))
    }

    /// Registers a listener called after every successful mutation.
    ///
    /// Listeners run synchronously on the mutating thread.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(StoreChange<'_>) + Send + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Appends a member.
    ///
    /// # Errors
    /// - `DuplicateId` when a member with the same ID already exists.
    pub fn add_member(&mut self, member: Member) -> StoreResult<()> {
        append(&mut self.members, member, Collection::Members)?;
        self.observers.notify(StoreChange::Members(&self.members));
        self.persist();
        Ok(())
    }

    /// Replaces the member with the same ID in place.
    ///
    /// Returns `false`, without notifying or persisting, when no member has
    /// that ID.
    pub fn update_member(&mut self, member: Member) -> bool {
        if !replace(&mut self.members, member, Collection::Members) {
            return false;
        }
        self.observers.notify(StoreChange::Members(&self.members));
        self.persist();
        true
    }

    /// Removes the members at `positions`, addressed against the ordering
    /// before removal.
    ///
    /// # Errors
    /// - `OutOfRange` when any position is past the end; nothing is removed.
    pub fn remove_members(&mut self, positions: &[usize]) -> StoreResult<()> {
        if remove_positions(&mut self.members, positions, Collection::Members)? == 0 {
            return Ok(());
        }
        self.observers.notify(StoreChange::Members(&self.members));
        self.persist();
        Ok(())
    }

    pub fn add_task(&mut self, task: Task) -> StoreResult<()> {
        append(&mut self.tasks, task, Collection::Tasks)?;
        self.observers.notify(StoreChange::Tasks(&self.tasks));
        self.persist();
        Ok(())
    }

    pub fn update_task(&mut self, task: Task) -> bool {
        if !replace(&mut self.tasks, task, Collection::Tasks) {
            return false;
        }
        self.observers.notify(StoreChange::Tasks(&self.tasks));
        self.persist();
        true
    }

    pub fn remove_tasks(&mut self, positions: &[usize]) -> StoreResult<()> {
        if remove_positions(&mut self.tasks, positions, Collection::Tasks)? == 0 {
            return Ok(());
        }
        self.observers.notify(StoreChange::Tasks(&self.tasks));
        self.persist();
        Ok(())
    }

    pub fn add_event(&mut self, event: Event) -> StoreResult<()> {
        append(&mut self.events, event, Collection::Events)?;
        self.observers.notify(StoreChange::Events(&self.events));
        self.persist();
        Ok(())
    }

    pub fn update_event(&mut self, event: Event) -> bool {
        if !replace(&mut self.events, event, Collection::Events) {
            return false;
        }
        self.observers.notify(StoreChange::Events(&self.events));
        self.persist();
        true
    }

    pub fn remove_events(&mut self, positions: &[usize]) -> StoreResult<()> {
        if remove_positions(&mut self.events, positions, Collection::Events)? == 0 {
            return Ok(());
        }
        self.observers.notify(StoreChange::Events(&self.events));
        self.persist();
        Ok(())
    }

    /// Rewrites the whole document. Failures are logged and swallowed.
    fn persist(&mut self) {
        let started_at = Instant::now();
        let bytes = match codec::encode_parts(&self.members, &self.tasks, &self.events) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(
                    "event=store_save module=store status=error error_code=encode_failed error={err}"
                );
                return;
            }
        };

        match self.backing.write_all(&bytes) {
            Ok(()) => info!(
                "event=store_save module=store status=ok bytes={} duration_ms={}",
                bytes.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error error_code=write_failed backing={} duration_ms={} error={}",
                self.backing.describe(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
    }
}

fn position_of<T: Identified>(items: &[T], id: Uuid) -> Option<usize> {
    items.iter().position(|item| item.record_id() == id)
}

fn append<T: Identified>(items: &mut Vec<T>, record: T, collection: Collection) -> StoreResult<()> {
    let id = record.record_id();
    if position_of(items, id).is_some() {
        return Err(StoreError::DuplicateId { collection, id });
    }
    items.push(record);
    debug!("event=store_mutation module=store op=add collection={collection} id={id}");
    Ok(())
}

fn replace<T: Identified>(items: &mut [T], record: T, collection: Collection) -> bool {
    let id = record.record_id();
    match position_of(items, id) {
        Some(index) => {
            items[index] = record;
            debug!(
                "event=store_mutation module=store op=update collection={collection} id={id} position={index}"
            );
            true
        }
        None => {
            debug!("event=update_miss module=store status=skip collection={collection} id={id}");
            false
        }
    }
}

/// Removes a batch of positions; returns how many records were removed.
///
/// Duplicate positions collapse into one. Bounds are checked before anything
/// is removed.
fn remove_positions<T>(
    items: &mut Vec<T>,
    positions: &[usize],
    collection: Collection,
) -> StoreResult<usize> {
    let len = items.len();
    let targets: BTreeSet<usize> = positions.iter().copied().collect();
    if let Some(&position) = targets.iter().next_back().filter(|&&p| p >= len) {
        return Err(StoreError::OutOfRange {
            collection,
            position,
            len,
        });
    }
    if targets.is_empty() {
        return Ok(0);
    }

    let mut index = 0;
    items.retain(|_| {
        let keep = !targets.contains(&index);
        index += 1;
        keep
    });
    debug!(
        "event=store_mutation module=store op=remove collection={collection} count={}",
        targets.len()
    );
    Ok(targets.len())
}

#[cfg(test)]
mod tests {
    use super::remove_positions;
    use crate::store::{Collection, StoreError};

    #[test]
    fn remove_positions_uses_pre_removal_ordering() {
        let mut items = vec!["a", "b", "c", "d", "e"];
        let removed = remove_positions(&mut items, &[3, 0, 1], Collection::Tasks).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(items, vec!["c", "e"]);
    }

    #[test]
    fn remove_positions_collapses_duplicates() {
        let mut items = vec!["a", "b", "c"];
        let removed = remove_positions(&mut items, &[1, 1], Collection::Events).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(items, vec!["a", "c"]);
    }

    #[test]
    fn remove_positions_rejects_out_of_range_without_mutating() {
        let mut items = vec!["a", "b"];
        let err = remove_positions(&mut items, &[0, 2], Collection::Members).unwrap_err();
        assert_eq!(
            err,
            StoreError::OutOfRange {
                collection: Collection::Members,
                position: 2,
                len: 2,
            }
        );
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn remove_positions_with_empty_set_is_a_no_op() {
        let mut items = vec!["a"];
        assert_eq!(remove_positions(&mut items, &[], Collection::Tasks).unwrap(), 0);
        assert_eq!(items, vec!["a"]);
    }
}
