//! Text format: decoding responses and encoding request bodies.

mod common;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use redmine_core::{
    CustomFieldValue, Error, Issue, IssueCustomField, IssueRelation, Project, ProjectEnabledModule,
    ProjectMembership, ProjectStatus, ProjectTracker, Reference, Registry, RelationType, TimeEntry,
    User, Version, VersionSharing, VersionStatus,
};
use redmine_core::{Codec, Format, MembershipRole};

use common::json;

fn body(document: &str) -> Value {
    serde_json::from_str(document).unwrap()
}

#[test]
fn test_decode_issue() {
    let document = json!({
        "issue": {
            "id": 42,
            "project": {"id": 1, "name": "Redmine"},
            "tracker": {"id": 1, "name": "Bug"},
            "subject": "Crash on save",
            "description": null,
            "done_ratio": 0,
            "estimated_hours": null,
            "spent_hours": 1.5,
            "is_private": false,
            "created_on": "2024-03-01T09:30:00Z",
            "custom_fields": [
                {"id": 2, "name": "Affected version", "value": "1.0.3"},
                {"id": 3, "name": "Platforms", "multiple": true, "value": ["Linux", "Windows"]}
            ],
            "relations": [
                {"id": 9, "issue_id": 42, "issue_to_id": 43, "relation_type": "follows", "delay": 2}
            ],
            "total_estimated_hours": null,
            "sprocket": {"teeth": 12}
        }
    })
    .to_string();

    let issue = json().deserialize::<Issue>(&document).unwrap().unwrap();
    assert_eq!(issue.id, 42);
    assert_eq!(issue.project, Some(Reference::new(1, "Redmine")));
    assert_eq!(issue.description, None);
    assert_eq!(issue.done_ratio, Some(0));
    assert_eq!(issue.estimated_hours, None);
    assert_eq!(issue.spent_hours, Some(1.5));
    assert_eq!(
        issue.created_on,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
    );

    let fields = issue.custom_fields.unwrap();
    assert_eq!(fields[0].value, Some(CustomFieldValue::Text("1.0.3".into())));
    assert!(fields[1].multiple);
    assert_eq!(
        fields[1].value,
        Some(CustomFieldValue::List(vec!["Linux".into(), "Windows".into()]))
    );

    let relation = &issue.relations.unwrap()[0];
    assert_eq!(relation.relation_type, Some(RelationType::Follows));
    assert_eq!(relation.delay, Some(2));
}

#[test]
fn test_legacy_timestamps() {
    let document = r#"{"time_entry":{"id":1,"hours":"2.5","spent_on":"2024-03-01","created_on":"2024/03/01 10:30:00 +0100"}}"#;
    let entry = json().deserialize::<TimeEntry>(document).unwrap().unwrap();
    assert_eq!(entry.hours, Some(2.5));
    assert_eq!(
        entry.created_on,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
    );
}

#[test]
fn test_enumerated_fields() {
    let document = r#"{"version":{"id":2,"name":"1.0","status":"locked","sharing":"system"}}"#;
    let version = json().deserialize::<Version>(document).unwrap().unwrap();
    assert_eq!(version.status, Some(VersionStatus::Locked));
    assert_eq!(version.sharing, Some(VersionSharing::System));

    let err = json()
        .deserialize::<Version>(r#"{"version":{"status":"frozen"}}"#)
        .unwrap_err();
    match err {
        Error::FieldDecode(err) => assert_eq!(err.field, "status"),
        other => panic!("unexpected error: {other}"),
    }

    let project = json()
        .deserialize::<Project>(r#"{"project":{"id":1,"status":9}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(project.status, Some(ProjectStatus::Archived));
}

#[test]
fn test_missing_root_and_empty_input() {
    assert!(json().deserialize::<Issue>(r#"{"project":{"id":1}}"#).unwrap().is_none());
    assert!(json().deserialize::<Issue>(r#"{"issue":null}"#).unwrap().is_none());
    assert!(json().deserialize::<Issue>("").unwrap().is_none());
}

#[test]
fn test_malformed_documents() {
    for document in ["{\"issue\":", "[1, 2]", "\"issue\""] {
        let err = json().deserialize::<Issue>(document).unwrap_err();
        assert!(
            matches!(err, Error::MalformedDocument(_)),
            "{document}: {err}"
        );
    }
}

#[test]
fn test_wrong_shapes_are_field_errors() {
    let err = json()
        .deserialize::<Issue>(r#"{"issue":{"journals":{"id":1}}}"#)
        .unwrap_err();
    assert!(matches!(err, Error::FieldDecode(ref e) if e.field == "journals"));

    let err = json()
        .deserialize::<Issue>(r#"{"issue":{"project":7}}"#)
        .unwrap_err();
    assert!(matches!(err, Error::FieldDecode(ref e) if e.field == "project"));
}

#[test]
fn test_unregistered_type() {
    let registry = Registry::builder().register::<Project>().build().unwrap();
    let codec = Codec::new(&registry, Format::Json);
    let err = codec.deserialize::<Issue>(r#"{"issue":{}}"#).unwrap_err();
    assert!(matches!(err, Error::UnknownType { .. }));
    let err = codec.serialize(&Issue::default()).unwrap_err();
    assert!(matches!(err, Error::UnknownType { .. }));
}

#[test]
fn test_encode_issue() {
    let issue = Issue {
        subject: "Crash".into(),
        project: Some(Reference::new(1, "Redmine")),
        status: Some(Reference::with_id(2)),
        done_ratio: Some(0),
        story_points: Some(3.0),
        custom_fields: Some(vec![IssueCustomField::list(3, ["a", "b"])]),
        ..Default::default()
    };
    let document = json().serialize(&issue).unwrap();
    assert_eq!(
        body(&document),
        json!({
            "issue": {
                "subject": "Crash",
                "is_private": false,
                "project_id": 1,
                "status_id": 2,
                "done_ratio": 0,
                "story_points": 3.0,
                "custom_fields": [{"id": 3, "value": ["a", "b"]}]
            }
        })
    );
}

#[test]
fn test_absent_versus_zero() {
    let mut entry = TimeEntry {
        issue: Some(Reference::with_id(5)),
        ..Default::default()
    };
    let document = body(&json().serialize(&entry).unwrap());
    assert_eq!(document, json!({"time_entry": {"issue_id": 5}}));

    entry.hours = Some(0.0);
    let document = body(&json().serialize(&entry).unwrap());
    assert_eq!(document["time_entry"]["hours"], json!(0.0));
}

#[test]
fn test_project_id_and_name_lists() {
    let project = Project {
        name: Some("Codec".into()),
        identifier: Some("codec".into()),
        trackers: Some(vec![
            ProjectTracker {
                id: 1,
                name: Some("Bug".into()),
            },
            ProjectTracker {
                id: 2,
                name: Some("Feature".into()),
            },
        ]),
        enabled_modules: Some(vec![ProjectEnabledModule {
            id: 10,
            name: Some("wiki".into()),
        }]),
        ..Default::default()
    };
    let document = body(&json().serialize(&project).unwrap());
    assert_eq!(
        document,
        json!({
            "project": {
                "name": "Codec",
                "identifier": "codec",
                "tracker_ids": [1, 2],
                "enabled_module_names": ["wiki"]
            }
        })
    );
}

#[test]
fn test_membership_and_user_bodies() {
    let membership = ProjectMembership {
        user: Some(Reference::new(7, "jsmith")),
        roles: Some(vec![MembershipRole {
            id: 3,
            ..Default::default()
        }]),
        ..Default::default()
    };
    let document = body(&json().serialize(&membership).unwrap());
    assert_eq!(
        document,
        json!({"membership": {"user_id": 7, "role_ids": [3]}})
    );

    let user = User {
        login: Some("jsmith".into()),
        password: Some("secret".into()),
        api_key: Some("abc".into()),
        ..Default::default()
    };
    let document = body(&json().serialize(&user).unwrap());
    assert_eq!(
        document,
        json!({"user": {"login": "jsmith", "password": "secret"}})
    );
    let decoded = json()
        .deserialize::<User>(r#"{"user":{"login":"jsmith","password":"secret"}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(decoded.password, None);
}

#[test]
fn test_relation_delay_policy() {
    let mut relation = IssueRelation {
        issue_to_id: 43,
        relation_type: Some(RelationType::Blocks),
        delay: Some(2),
        ..Default::default()
    };
    let document = body(&json().serialize(&relation).unwrap());
    assert_eq!(
        document,
        json!({"relation": {"issue_to_id": 43, "relation_type": "blocks"}})
    );

    relation.relation_type = Some(RelationType::Precedes);
    let document = body(&json().serialize(&relation).unwrap());
    assert_eq!(document["relation"]["delay"], json!(2));
}

#[test]
fn test_dump_includes_read_only_fields() {
    let issue = Issue {
        id: 42,
        subject: "Crash".into(),
        author: Some(Reference::new(3, "John")),
        project: Some(Reference::new(1, "Redmine")),
        ..Default::default()
    };
    let dumped = body(&json().dump(&issue.into()).unwrap());
    let fields = &dumped["issue"];
    assert_eq!(fields["id"], json!(42));
    assert_eq!(fields["author"], json!({"id": 3, "name": "John"}));
    assert_eq!(fields["project"], json!({"id": 1, "name": "Redmine"}));
    assert!(fields.get("project_id").is_none());
}
