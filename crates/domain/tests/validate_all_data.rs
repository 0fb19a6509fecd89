use roster_domain::{
    fields, validate_all_data, validate_kind, Record, RecordKind, RecordSet, ValidationContext,
    ValidationErrorKind, ValidationResult,
};
use serde_json::{json, Value};

fn records(value: Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}

fn fixture() -> RecordSet {
    RecordSet::new(
        records(json!([
            {
                "_id": "a1",
                "ClientID": "C1",
                "ClientName": "Acme",
                "PriorityLevel": "3",
                "RequestedTaskIDs": "T1,T2",
                "GroupTag": "GroupA",
                "AttributesJSON": "{\"location\":\"NY\"}"
            },
            {
                "_id": "a2",
                "ClientID": "C2",
                "ClientName": "Globex",
                "PriorityLevel": 5,
                "RequestedTaskIDs": "T2",
                "AttributesJSON": "{}"
            }
        ])),
        records(json!([
            {
                "_id": "b1",
                "worker_id": "W1",
                "worker_name": "Ada",
                "available_slots": "[1,2,3]",
                "max_load_per_phase": "2"
            }
        ])),
        records(json!([
            {"_id": "c1", "Task ID": "T1", "Task Name": "Ingest", "Duration": "2"},
            {"_id": "c2", "Task ID": "T2", "Task Name": "Report", "Duration": 1}
        ])),
    )
}

fn kinds(result: &ValidationResult, kind: RecordKind) -> Vec<ValidationErrorKind> {
    result.errors_for(kind).iter().map(|e| e.kind).collect()
}

#[test]
fn test_clean_fixture_is_valid() {
    let result = fixture().validate();
    assert!(result.is_valid);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn test_empty_inputs_are_valid() {
    let result = validate_all_data(&[], &[], &[]);
    assert!(result.is_valid);
}

#[test]
fn test_missing_client_id_end_to_end() {
    let clients = records(json!([{
        "ClientID": "",
        "ClientName": "A",
        "PriorityLevel": "3",
        "AttributesJSON": "{}",
        "RequestedTaskIDs": ""
    }]));

    let result = validate_all_data(&clients, &[], &[]);

    assert!(!result.is_valid);
    assert_eq!(result.errors.clients.len(), 1);
    let error = &result.errors.clients[0];
    assert_eq!(error.row_index, 0);
    assert_eq!(error.field, "ClientID");
    assert_eq!(error.message, "ClientID is required");
    assert_eq!(error.kind, ValidationErrorKind::MissingRequiredField);
    assert!(result.errors.workers.is_empty());
    assert!(result.errors.tasks.is_empty());
}

#[test]
fn test_dangling_reference_names_unknown_task() {
    let mut set = fixture();
    set.clients[0].insert(fields::REQUESTED_TASK_IDS, "T1,T9");

    let result = set.validate();

    assert_eq!(
        kinds(&result, RecordKind::Clients),
        vec![ValidationErrorKind::DanglingReference]
    );
    assert_eq!(result.errors.clients[0].message, "Unknown TaskID: T9");
    assert_eq!(result.errors.clients[0].field, "RequestedTaskIDs");
}

#[test]
fn test_task_references_see_whole_task_collection() {
    let mut set = fixture();
    set.tasks.clear();

    let result = set.validate();

    let messages: Vec<_> = result
        .errors_for(RecordKind::Clients)
        .iter()
        .map(|e| e.message.clone())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Unknown TaskID: T1",
            "Unknown TaskID: T2",
            "Unknown TaskID: T2"
        ]
    );
}

#[test]
fn test_duplicate_task_ids_flag_both_rows() {
    let mut set = fixture();
    set.tasks[1].insert(fields::TASK_ID, "T1");

    let result = set.validate();

    let rows: Vec<_> = result
        .errors_for(RecordKind::Tasks)
        .iter()
        .filter(|e| e.kind == ValidationErrorKind::DuplicateIdentifier)
        .map(|e| e.row_index)
        .collect();
    assert_eq!(rows, vec![0, 1]);
}

#[test]
fn test_worker_capacity() {
    let mut set = fixture();
    set.workers[0].insert(fields::AVAILABLE_SLOTS, "[1,2]");
    set.workers[0].insert(fields::MAX_LOAD_PER_PHASE, "3");
    let result = set.validate();
    assert_eq!(
        kinds(&result, RecordKind::Workers),
        vec![ValidationErrorKind::CapacityViolation]
    );
    assert_eq!(result.errors.workers[0].message, "Slots < Max Load");

    set.workers[0].insert(fields::MAX_LOAD_PER_PHASE, "2");
    assert!(set.validate().is_valid);
}

#[test]
fn test_errors_ordered_by_row_then_rule() {
    let clients = records(json!([
        {"ClientID": "C1", "ClientName": "", "PriorityLevel": "9", "AttributesJSON": "[]"},
        {"ClientID": "C1", "ClientName": "B", "PriorityLevel": "2", "RequestedTaskIDs": "X"}
    ]));

    let result = validate_all_data(&clients, &[], &[]);

    let lines = result.issue_lines(RecordKind::Clients);
    assert_eq!(
        lines,
        vec![
            "Row 1 — ClientName: ClientName is required",
            "Row 1 — PriorityLevel: Priority must be 1-5",
            "Row 1 — AttributesJSON: Invalid JSON format",
            "Row 2 — ClientID: Duplicate ClientID",
            "Row 2 — RequestedTaskIDs: Unknown TaskID: X",
        ]
    );
}

#[test]
fn test_validation_is_idempotent() {
    let mut set = fixture();
    set.clients[1].insert(fields::PRIORITY_LEVEL, "7");
    set.workers[0].insert(fields::AVAILABLE_SLOTS, "oops");
    set.tasks[0].insert(fields::DURATION, "0");

    let first = set.validate();
    let second = set.validate();
    assert_eq!(first, second);
    assert_eq!(first.error_count(), 3);
}

#[test]
fn test_is_valid_matches_error_lists() {
    let mut set = fixture();
    for (field, value) in [
        (fields::CLIENT_NAME, json!("")),
        (fields::PRIORITY_LEVEL, json!("0")),
        (fields::ATTRIBUTES_JSON, json!("nope")),
    ] {
        set.clients[0].insert(field, value);
        let result = set.validate();
        assert_eq!(result.is_valid, result.errors.total() == 0);
        assert!(!result.is_valid);
    }
}

#[test]
fn test_validate_kind_dispatch() {
    let set = fixture();
    let context = ValidationContext::from_tasks(&set.tasks);
    for kind in RecordKind::ALL {
        assert!(validate_kind(kind, set.get(kind), &context).is_empty());
    }

    let broken = records(json!([{"Task ID": "T1", "Task Name": "X", "Duration": "-1"}]));
    let errors = validate_kind(RecordKind::Tasks, &broken, &context);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationErrorKind::OutOfRangeValue);
}

#[test]
fn test_inputs_not_mutated() {
    let set = fixture();
    let before = set.clone();
    let _ = set.validate();
    assert_eq!(set, before);
}
