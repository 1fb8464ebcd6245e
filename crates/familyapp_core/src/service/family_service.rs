//! Household use-case service.
//!
//! # Responsibility
//! - Trim and validate user input for new members, tasks and events.
//! - Delegate storage, persistence and notification to `DataStore`.
//!
//! # Invariants
//! - Records built here always have non-blank required text fields.
//! - A blank description is stored as an empty string, not as absent.
//! - Assignee IDs are passed through unchecked (weak reference).

use crate::model::event::{Event, EventId};
use crate::model::member::{Member, MemberId};
use crate::model::task::{Task, TaskId};
use crate::model::Timestamp;
use crate::storage::StoreBacking;
use crate::store::{DataStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Rejected user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    EmptyRelationship,
    EmptyTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyRelationship => write!(f, "relationship must not be empty"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
        }
    }
}

impl Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Validation(ValidationError),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Input for creating a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub relationship: String,
    pub birthday: Option<Timestamp>,
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub assigned_member_id: Option<MemberId>,
}

/// Input for scheduling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub date: Timestamp,
    pub description: Option<String>,
}

impl NewMember {
    /// Builds a member with a fresh ID from trimmed input.
    pub fn into_member(self) -> Result<Member, ValidationError> {
        let name = required(&self.name, ValidationError::EmptyName)?;
        let relationship = required(&self.relationship, ValidationError::EmptyRelationship)?;
        let mut member = Member::new(name, relationship);
        member.birthday = self.birthday;
        Ok(member)
    }
}

impl NewTask {
    pub fn into_task(self) -> Result<Task, ValidationError> {
        let title = required(&self.title, ValidationError::EmptyTitle)?;
        let mut task = Task::new(title);
        task.description = optional(self.description.as_deref());
        task.due_date = self.due_date;
        task.assigned_member_id = self.assigned_member_id;
        Ok(task)
    }
}

impl NewEvent {
    pub fn into_event(self) -> Result<Event, ValidationError> {
        let title = required(&self.title, ValidationError::EmptyTitle)?;
        let mut event = Event::new(title, self.date);
        event.description = optional(self.description.as_deref());
        Ok(event)
    }
}

/// Use-case wrapper that owns the process store.
#[derive(Debug)]
pub struct FamilyService<B: StoreBacking> {
    store: DataStore<B>,
}

impl<B: StoreBacking> FamilyService<B> {
    pub fn new(store: DataStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DataStore<B> {
        &self.store
    }

    /// Direct store access for update/remove and subscriptions.
    pub fn store_mut(&mut self) -> &mut DataStore<B> {
        &mut self.store
    }

    pub fn into_store(self) -> DataStore<B> {
        self.store
    }

    /// Validates and adds a member; returns its new ID.
    pub fn add_member(&mut self, request: NewMember) -> ServiceResult<MemberId> {
        let member = request.into_member()?;
        let id = member.id;
        self.store.add_member(member)?;
        Ok(id)
    }

    /// Validates and adds a task; returns its new ID.
    pub fn add_task(&mut self, request: NewTask) -> ServiceResult<TaskId> {
        let task = request.into_task()?;
        let id = task.id;
        self.store.add_task(task)?;
        Ok(id)
    }

    /// Validates and schedules an event; returns its new ID.
    pub fn add_event(&mut self, request: NewEvent) -> ServiceResult<EventId> {
        let event = request.into_event()?;
        let id = event.id;
        self.store.add_event(event)?;
        Ok(id)
    }

    /// Display name of a task's assignee, if the member still exists.
    pub fn assignee_name(&self, task_id: TaskId) -> Option<&str> {
        let task = self.store.task(task_id)?;
        self.store
            .assignee_of(task)
            .map(|member| member.name.as_str())
    }

    /// Tasks whose assignee reference names `member_id`.
    pub fn tasks_assigned_to(&self, member_id: MemberId) -> Vec<&Task> {
        self.store
            .tasks()
            .iter()
            .filter(|task| task.assigned_member_id == Some(member_id))
            .collect()
    }
}

/// Trims spaces and tabs; line breaks are part of the value.
fn required(value: &str, missing: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim_matches(is_inline_space);
    if trimmed.is_empty() {
        return Err(missing);
    }
    Ok(trimmed.to_string())
}

/// Trims all whitespace. A blank description is kept as an empty string.
fn optional(value: Option<&str>) -> Option<String> {
    value.map(|text| text.trim().to_string())
}

fn is_inline_space(c: char) -> bool {
    c.is_whitespace()
        && !matches!(
            c,
            '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
}
