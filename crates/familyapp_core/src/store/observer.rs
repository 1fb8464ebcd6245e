//! Synchronous change subscriptions.

use super::Collection;
use crate::model::event::Event;
use crate::model::member::Member;
use crate::model::task::Task;
use std::collections::BTreeMap;

/// Full updated collection delivered after a successful mutation.
///
/// Listeners only ever see shared slices, so they cannot mutate the store
/// from inside a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange<'a> {
    Members(&'a [Member]),
    Tasks(&'a [Task]),
    Events(&'a [Event]),
}

impl StoreChange<'_> {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Members(_) => Collection::Members,
            Self::Tasks(_) => Collection::Tasks,
            Self::Events(_) => Collection::Events,
        }
    }

    /// Length of the delivered collection.
    pub fn len(&self) -> usize {
        match self {
            Self::Members(items) => items.len(),
            Self::Tasks(items) => items.len(),
            Self::Events(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(StoreChange<'_>) + Send>;

/// Registered listeners, invoked in subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(StoreChange<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener; returns `false` when the ID is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn notify(&mut self, change: StoreChange<'_>) {
        for listener in self.listeners.values_mut() {
            listener(change);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
