use chrono::{TimeZone, Utc};
use familyapp_core::{
    decode, Collection, DataStore, Event, Member, MemoryBacking, StoreChange, StoreError, Task,
};
use std::sync::{Arc, Mutex};

fn empty_store() -> DataStore<MemoryBacking> {
    DataStore::open(MemoryBacking::new())
}

fn titles(store: &DataStore<MemoryBacking>) -> Vec<String> {
    store.tasks().iter().map(|task| task.title.clone()).collect()
}

#[test]
fn add_appends_last_and_persists() {
    let mut store = empty_store();
    store.add_member(Member::new("Alice", "Mother")).unwrap();
    let bob = Member::new("Bob", "Father");
    store.add_member(bob.clone()).unwrap();

    assert_eq!(store.members().len(), 2);
    assert_eq!(store.members().last(), Some(&bob));
    assert_eq!(store.backing().write_count(), 2);

    let persisted = decode(store.backing().contents().unwrap()).unwrap();
    assert_eq!(persisted.members, store.members());
}

#[test]
fn add_allows_duplicate_names_but_rejects_duplicate_ids() {
    let mut store = empty_store();
    let task = Task::new("Dishes");
    store.add_task(task.clone()).unwrap();
    store.add_task(Task::new("Dishes")).unwrap();

    let err = store.add_task(task.clone()).unwrap_err();
    assert_eq!(
        err,
        StoreError::DuplicateId {
            collection: Collection::Tasks,
            id: task.id,
        }
    );
    assert_eq!(store.tasks().len(), 2);
    assert_eq!(store.backing().write_count(), 2);
}

#[test]
fn update_replaces_in_place() {
    let mut store = empty_store();
    let first = Task::new("first");
    let mut second = Task::new("second");
    store.add_task(first).unwrap();
    store.add_task(second.clone()).unwrap();
    store.add_task(Task::new("third")).unwrap();

    second.title = "second, revised".to_string();
    second.description = Some("now with notes".to_string());
    assert!(store.update_task(second.clone()));

    assert_eq!(store.tasks().len(), 3);
    assert_eq!(store.tasks()[1], second);
    assert_eq!(titles(&store), vec!["first", "second, revised", "third"]);
    assert_eq!(store.backing().write_count(), 4);
}

#[test]
fn update_with_unknown_id_is_silent_no_op() {
    let mut store = empty_store();
    store
        .add_event(Event::new("Picnic", Utc.with_ymd_and_hms(2026, 6, 1, 11, 0, 0).unwrap()))
        .unwrap();
    let before = store.backing().contents().unwrap().to_vec();

    let stranger = Event::new("Unknown", Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    assert!(!store.update_event(stranger));

    assert_eq!(store.events().len(), 1);
    assert_eq!(store.backing().write_count(), 1);
    assert_eq!(store.backing().contents().unwrap(), before.as_slice());
}

#[test]
fn remove_first_of_three_tasks_shifts_survivors() {
    let mut store = empty_store();
    for title in ["a", "b", "c"] {
        store.add_task(Task::new(title)).unwrap();
    }
    let survivors = store.tasks()[1..].to_vec();

    store.remove_tasks(&[0]).unwrap();

    assert_eq!(store.tasks(), survivors.as_slice());
    assert_eq!(titles(&store), vec!["b", "c"]);
}

#[test]
fn remove_batch_preserves_relative_order() {
    let mut store = empty_store();
    for name in ["a", "b", "c", "d", "e"] {
        store.add_member(Member::new(name, "Cousin")).unwrap();
    }

    store.remove_members(&[4, 1, 2]).unwrap();

    let names = store
        .members()
        .iter()
        .map(|member| member.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["a", "d"]);
}

#[test]
fn remove_out_of_range_fails_without_side_effects() {
    let mut store = empty_store();
    store.add_task(Task::new("only")).unwrap();

    let err = store.remove_tasks(&[0, 1]).unwrap_err();
    assert_eq!(
        err,
        StoreError::OutOfRange {
            collection: Collection::Tasks,
            position: 1,
            len: 1,
        }
    );
    assert_eq!(titles(&store), vec!["only"]);
    assert_eq!(store.backing().write_count(), 1);

    store.remove_tasks(&[0]).unwrap();
    assert!(store.remove_tasks(&[0]).is_err());
}

#[test]
fn removing_member_leaves_assigned_task_dangling_but_intact() {
    let mut store = empty_store();
    let alice = Member::new("Alice", "Mother");
    store.add_member(alice.clone()).unwrap();
    let mut task = Task::new("Pick up groceries");
    task.assigned_member_id = Some(alice.id);
    store.add_task(task.clone()).unwrap();
    assert_eq!(store.assignee_of(&task), Some(&alice));

    let position = store.member_position(alice.id).unwrap();
    store.remove_members(&[position]).unwrap();

    assert_eq!(store.tasks(), std::slice::from_ref(&task));
    assert_eq!(store.tasks()[0].assigned_member_id, Some(alice.id));
    assert_eq!(store.assignee_of(&store.tasks()[0]), None);
}

#[test]
fn lookups_find_records_by_id() {
    let mut store = empty_store();
    let member = Member::new("Alice", "Mother");
    let event = Event::new("Recital", Utc.with_ymd_and_hms(2026, 4, 2, 18, 0, 0).unwrap());
    store.add_member(member.clone()).unwrap();
    store.add_event(event.clone()).unwrap();

    assert_eq!(store.member(member.id), Some(&member));
    assert_eq!(store.event(event.id), Some(&event));
    assert_eq!(store.event_position(event.id), Some(0));
    assert_eq!(store.task(member.id), None);
    assert_eq!(store.task_position(member.id), None);
}

#[test]
fn observers_receive_full_collection_after_each_mutation() {
    let mut store = empty_store();
    let seen: Arc<Mutex<Vec<(Collection, Vec<String>)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |change| {
        let names: Vec<String> = match change {
            StoreChange::Members(items) => items.iter().map(|m| m.name.clone()).collect(),
            StoreChange::Tasks(items) => items.iter().map(|t| t.title.clone()).collect(),
            StoreChange::Events(items) => items.iter().map(|e| e.title.clone()).collect(),
        };
        sink.lock().unwrap().push((change.collection(), names));
    });

    let mut alice = Member::new("Alice", "Mother");
    store.add_member(alice.clone()).unwrap();
    store.add_member(Member::new("Bob", "Father")).unwrap();
    alice.name = "Alicia".to_string();
    assert!(store.update_member(alice));
    store.add_task(Task::new("Dishes")).unwrap();
    store.remove_members(&[1]).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (Collection::Members, vec!["Alice".to_string()]),
            (Collection::Members, vec!["Alice".to_string(), "Bob".to_string()]),
            (Collection::Members, vec!["Alicia".to_string(), "Bob".to_string()]),
            (Collection::Tasks, vec!["Dishes".to_string()]),
            (Collection::Members, vec!["Alicia".to_string()]),
        ]
    );
}

#[test]
fn failed_and_no_op_mutations_do_not_notify() {
    let mut store = empty_store();
    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    let subscription = store.subscribe(move |_| *counter.lock().unwrap() += 1);

    assert!(!store.update_member(Member::new("Ghost", "None")));
    assert!(store.remove_events(&[0]).is_err());
    store.remove_events(&[]).unwrap();
    assert_eq!(*calls.lock().unwrap(), 0);

    store.add_member(Member::new("Alice", "Mother")).unwrap();
    assert_eq!(*calls.lock().unwrap(), 1);

    assert!(store.unsubscribe(subscription));
    store.add_member(Member::new("Bob", "Father")).unwrap();
    assert_eq!(*calls.lock().unwrap(), 1);
}
