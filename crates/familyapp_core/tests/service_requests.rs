use chrono::{TimeZone, Utc};
use familyapp_core::{
    DataStore, FamilyService, Member, MemoryBacking, NewEvent, NewMember, NewTask, ServiceError,
    ValidationError,
};

fn service() -> FamilyService<MemoryBacking> {
    FamilyService::new(DataStore::open(MemoryBacking::new()))
}

#[test]
fn add_member_trims_input_and_returns_new_id() {
    let mut service = service();
    let id = service
        .add_member(NewMember {
            name: "  Alice ".to_string(),
            relationship: "Mother\t".to_string(),
            birthday: None,
        })
        .unwrap();

    let member = service.store().member(id).unwrap();
    assert_eq!(member.name, "Alice");
    assert_eq!(member.relationship, "Mother");
}

#[test]
fn add_member_requires_name_and_relationship() {
    let mut service = service();
    let missing_name = service
        .add_member(NewMember {
            name: "   ".to_string(),
            relationship: "Aunt".to_string(),
            birthday: None,
        })
        .unwrap_err();
    assert_eq!(
        missing_name,
        ServiceError::Validation(ValidationError::EmptyName)
    );

    let missing_relationship = service
        .add_member(NewMember {
            name: "Carol".to_string(),
            relationship: String::new(),
            birthday: None,
        })
        .unwrap_err();
    assert_eq!(
        missing_relationship,
        ServiceError::Validation(ValidationError::EmptyRelationship)
    );
    assert!(service.store().members().is_empty());
    assert_eq!(service.store().backing().write_count(), 0);
}

#[test]
fn add_task_keeps_blank_description_as_empty_and_keeps_assignee() {
    let mut service = service();
    let member_id = service
        .add_member(NewMember {
            name: "Bob".to_string(),
            relationship: "Son".to_string(),
            birthday: None,
        })
        .unwrap();

    let task_id = service
        .add_task(NewTask {
            title: " Homework ".to_string(),
            description: Some("  ".to_string()),
            due_date: Some(Utc.with_ymd_and_hms(2026, 10, 21, 16, 0, 0).unwrap()),
            assigned_member_id: Some(member_id),
        })
        .unwrap();

    let task = service.store().task(task_id).unwrap();
    assert_eq!(task.title, "Homework");
    assert_eq!(task.description.as_deref(), Some(""));
    assert_eq!(service.assignee_name(task_id), Some("Bob"));
    assert_eq!(service.tasks_assigned_to(member_id).len(), 1);
}

#[test]
fn add_task_rejects_blank_title() {
    let mut service = service();
    let err = service
        .add_task(NewTask {
            title: " \t ".to_string(),
            ..NewTask::default()
        })
        .unwrap_err();
    assert_eq!(err, ServiceError::Validation(ValidationError::EmptyTitle));
}

#[test]
fn assignee_name_is_none_for_dangling_reference() {
    let mut service = service();
    let ghost = Member::new("Ghost", "Unknown");
    let task_id = service
        .add_task(NewTask {
            title: "Haunt".to_string(),
            assigned_member_id: Some(ghost.id),
            ..NewTask::default()
        })
        .unwrap();

    assert_eq!(service.assignee_name(task_id), None);
    assert!(service.store().task(task_id).unwrap().has_assignee());
}

#[test]
fn add_event_trims_title_and_description() {
    let mut service = service();
    let date = Utc.with_ymd_and_hms(2026, 12, 24, 18, 0, 0).unwrap();
    let id = service
        .add_event(NewEvent {
            title: "Dinner ".to_string(),
            date,
            description: Some(" at grandma's ".to_string()),
        })
        .unwrap();

    let event = service.store().event(id).unwrap();
    assert_eq!(event.title, "Dinner");
    assert_eq!(event.date, date);
    assert_eq!(event.description.as_deref(), Some("at grandma's"));

    let store = service.into_store();
    assert_eq!(store.events().len(), 1);
}
