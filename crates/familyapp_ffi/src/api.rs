//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Own the single process-wide store and expose its operations to Dart.
//! - Flatten records into FRB-friendly items (string IDs, epoch millis).
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported in response envelopes, never thrown.
//! - The store is opened lazily on first use and then reused.

use chrono::{DateTime, TimeZone, Utc};
use familyapp_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, DataStore, Event, FamilyService, FileBacking, Member, NewEvent, NewMember,
    NewTask, StoreResult, Task,
};
use log::info;
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

/// Overrides the store file location for the whole process.
pub const STORE_PATH_ENV: &str = "FAMILYAPP_STORE_PATH";

static SERVICE: Mutex<Option<FamilyService<FileBacking>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberItem {
    /// Hyphenated UUID string.
    pub id: String,
    pub name: String,
    pub relationship: String,
    /// Unix epoch milliseconds (UTC).
    pub birthday_epoch_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Hyphenated UUID string.
    pub id: String,
    pub title: String,
    /// `Some("")` when a blank description was entered.
    pub description: Option<String>,
    /// Unix epoch milliseconds (UTC).
    pub due_epoch_ms: Option<i64>,
    /// Weak reference to a member; may name a member that no longer exists.
    pub assigned_member_id: Option<String>,
    /// Resolved assignee name; `None` when unassigned or the member is gone.
    pub assignee_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    /// Hyphenated UUID string.
    pub id: String,
    pub title: String,
    /// Unix epoch milliseconds (UTC).
    pub date_epoch_ms: i64,
    pub description: Option<String>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// ID of the created or updated record, when there is one.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Lists members in store order. Returns an empty list if the store
/// cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn members_list() -> Vec<MemberItem> {
    with_service(|service| {
        service
            .store()
            .members()
            .iter()
            .map(to_member_item)
            .collect::<Vec<_>>()
    })
    .unwrap_or_default()
}

#[flutter_rust_bridge::frb(sync)]
pub fn member_add(
    name: String,
    relationship: String,
    birthday_epoch_ms: Option<i64>,
) -> ActionResponse {
    let birthday = match optional_timestamp(birthday_epoch_ms) {
        Ok(value) => value,
        Err(err) => return ActionResponse::failure(format!("member_add failed: {err}")),
    };
    let request = NewMember {
        name,
        relationship,
        birthday,
    };
    match with_service(|service| service.add_member(request).map_err(|err| err.to_string())) {
        Ok(Ok(id)) => ActionResponse::success("Member added.", Some(id.to_string())),
        Ok(Err(err)) | Err(err) => ActionResponse::failure(format!("member_add failed: {err}")),
    }
}

/// Replaces a member by ID. An unknown ID is not an error.
#[flutter_rust_bridge::frb(sync)]
pub fn member_update(
    id: String,
    name: String,
    relationship: String,
    birthday_epoch_ms: Option<i64>,
) -> ActionResponse {
    let built = parse_id(&id).and_then(|id| {
        let mut member = NewMember {
            name,
            relationship,
            birthday: optional_timestamp(birthday_epoch_ms)?,
        }
        .into_member()
        .map_err(|err| err.to_string())?;
        member.id = id;
        Ok(member)
    });
    let member = match built {
        Ok(member) => member,
        Err(err) => return ActionResponse::failure(format!("member_update failed: {err}")),
    };
    update_response(
        "member",
        member.id,
        with_service(|service| service.store_mut().update_member(member)),
    )
}

/// Removes members at positions taken from the current `members_list` order.
#[flutter_rust_bridge::frb(sync)]
pub fn members_remove(positions: Vec<u32>) -> ActionResponse {
    let positions = to_positions(&positions);
    remove_response(
        "members_remove",
        with_service(|service| service.store_mut().remove_members(&positions)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list() -> Vec<TaskItem> {
    with_service(|service| {
        let store = service.store();
        store
            .tasks()
            .iter()
            .map(|task| to_task_item(task, store.assignee_of(task)))
            .collect::<Vec<_>>()
    })
    .unwrap_or_default()
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    title: String,
    description: Option<String>,
    due_epoch_ms: Option<i64>,
    assigned_member_id: Option<String>,
) -> ActionResponse {
    let request = match build_new_task(title, description, due_epoch_ms, assigned_member_id) {
        Ok(request) => request,
        Err(err) => return ActionResponse::failure(format!("task_add failed: {err}")),
    };
    match with_service(|service| service.add_task(request).map_err(|err| err.to_string())) {
        Ok(Ok(id)) => ActionResponse::success("Task added.", Some(id.to_string())),
        Ok(Err(err)) | Err(err) => ActionResponse::failure(format!("task_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_update(
    id: String,
    title: String,
    description: Option<String>,
    due_epoch_ms: Option<i64>,
    assigned_member_id: Option<String>,
) -> ActionResponse {
    let built = parse_id(&id).and_then(|id| {
        let mut task = build_new_task(title, description, due_epoch_ms, assigned_member_id)?
            .into_task()
            .map_err(|err| err.to_string())?;
        task.id = id;
        Ok(task)
    });
    let task = match built {
        Ok(task) => task,
        Err(err) => return ActionResponse::failure(format!("task_update failed: {err}")),
    };
    update_response(
        "task",
        task.id,
        with_service(|service| service.store_mut().update_task(task)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn tasks_remove(positions: Vec<u32>) -> ActionResponse {
    let positions = to_positions(&positions);
    remove_response(
        "tasks_remove",
        with_service(|service| service.store_mut().remove_tasks(&positions)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn events_list() -> Vec<EventItem> {
    with_service(|service| {
        service
            .store()
            .events()
            .iter()
            .map(to_event_item)
            .collect::<Vec<_>>()
    })
    .unwrap_or_default()
}

#[flutter_rust_bridge::frb(sync)]
pub fn event_add(title: String, date_epoch_ms: i64, description: Option<String>) -> ActionResponse {
    let request = match timestamp(date_epoch_ms) {
        Ok(date) => NewEvent {
            title,
            date,
            description,
        },
        Err(err) => return ActionResponse::failure(format!("event_add failed: {err}")),
    };
    match with_service(|service| service.add_event(request).map_err(|err| err.to_string())) {
        Ok(Ok(id)) => ActionResponse::success("Event added.", Some(id.to_string())),
        Ok(Err(err)) | Err(err) => ActionResponse::failure(format!("event_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn event_update(
    id: String,
    title: String,
    date_epoch_ms: i64,
    description: Option<String>,
) -> ActionResponse {
    let built = parse_id(&id).and_then(|id| {
        let mut event = NewEvent {
            title,
            date: timestamp(date_epoch_ms)?,
            description,
        }
        .into_event()
        .map_err(|err| err.to_string())?;
        event.id = id;
        Ok(event)
    });
    let event = match built {
        Ok(event) => event,
        Err(err) => return ActionResponse::failure(format!("event_update failed: {err}")),
    };
    update_response(
        "event",
        event.id,
        with_service(|service| service.store_mut().update_event(event)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn events_remove(positions: Vec<u32>) -> ActionResponse {
    let positions = to_positions(&positions);
    remove_response(
        "events_remove",
        with_service(|service| service.store_mut().remove_events(&positions)),
    )
}

fn with_service<T>(f: impl FnOnce(&mut FamilyService<FileBacking>) -> T) -> Result<T, String> {
    let mut guard = SERVICE
        .lock()
        .map_err(|_| "store lock poisoned by an earlier panic".to_string())?;
    if guard.is_none() {
        let path = resolve_store_path()?;
        let backing =
            FileBacking::open(&path).map_err(|err| format!("store open failed: {err}"))?;
        info!(
            "event=ffi_store_open module=ffi status=ok path={}",
            path.display()
        );
        *guard = Some(FamilyService::new(DataStore::open(backing)));
    }
    let service = guard
        .as_mut()
        .ok_or_else(|| "store is unavailable".to_string())?;
    Ok(f(service))
}

fn resolve_store_path() -> Result<PathBuf, String> {
    if let Ok(raw) = std::env::var(STORE_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    fallback_store_path()
}

#[cfg(not(test))]
fn fallback_store_path() -> Result<PathBuf, String> {
    familyapp_core::default_store_path().map_err(|err| err.to_string())
}

#[cfg(test)]
fn fallback_store_path() -> Result<PathBuf, String> {
    // Keep unit tests away from the real per-user store.
    Ok(std::env::temp_dir()
        .join(format!("familyapp-ffi-test-{}", std::process::id()))
        .join(familyapp_core::storage::STORE_FILE_NAME))
}

fn update_response(kind: &str, id: Uuid, outcome: Result<bool, String>) -> ActionResponse {
    match outcome {
        Ok(true) => ActionResponse::success(format!("Updated {kind}."), Some(id.to_string())),
        Ok(false) => {
            ActionResponse::success(format!("No {kind} with that id; nothing changed."), None)
        }
        Err(err) => ActionResponse::failure(format!("{kind} update failed: {err}")),
    }
}

fn remove_response(op: &str, outcome: Result<StoreResult<()>, String>) -> ActionResponse {
    match outcome {
        Ok(Ok(())) => ActionResponse::success("Removed.", None),
        Ok(Err(err)) => ActionResponse::failure(format!("{op} failed: {err}")),
        Err(err) => ActionResponse::failure(format!("{op} failed: {err}")),
    }
}

fn build_new_task(
    title: String,
    description: Option<String>,
    due_epoch_ms: Option<i64>,
    assigned_member_id: Option<String>,
) -> Result<NewTask, String> {
    let assigned_member_id = match assigned_member_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_id(raw)?),
        _ => None,
    };
    Ok(NewTask {
        title,
        description,
        due_date: optional_timestamp(due_epoch_ms)?,
        assigned_member_id,
    })
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{raw}`"))
}

fn timestamp(epoch_ms: i64) -> Result<DateTime<Utc>, String> {
    Utc.timestamp_millis_opt(epoch_ms)
        .single()
        .ok_or_else(|| format!("timestamp {epoch_ms} is out of range"))
}

fn optional_timestamp(epoch_ms: Option<i64>) -> Result<Option<DateTime<Utc>>, String> {
    epoch_ms.map(timestamp).transpose()
}

fn to_positions(positions: &[u32]) -> Vec<usize> {
    positions.iter().map(|&position| position as usize).collect()
}

fn to_member_item(member: &Member) -> MemberItem {
    MemberItem {
        id: member.id.to_string(),
        name: member.name.clone(),
        relationship: member.relationship.clone(),
        birthday_epoch_ms: member.birthday.map(|date| date.timestamp_millis()),
    }
}

fn to_task_item(task: &Task, assignee: Option<&Member>) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        due_epoch_ms: task.due_date.map(|date| date.timestamp_millis()),
        assigned_member_id: task.assigned_member_id.map(|id| id.to_string()),
        assignee_name: assignee.map(|member| member.name.clone()),
    }
}

fn to_event_item(event: &Event) -> EventItem {
    EventItem {
        id: event.id.to_string(),
        title: event.title.clone(),
        date_epoch_ms: event.date.timestamp_millis(),
        description: event.description.clone(),
    }
}
