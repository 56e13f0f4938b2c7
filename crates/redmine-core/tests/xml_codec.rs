//! Markup format: decoding responses and encoding request bodies.

mod common;

use chrono::{NaiveDate, TimeZone, Utc};

use redmine_core::{
    CustomFieldValue, Error, Issue, IssueCustomField, Reference, RelationType, Role, ServerError,
    Upload, User, UserStatus, Watcher, WikiPage,
};

use common::{ISSUE_XML, xml};

#[test]
fn test_decode_full_issue() {
    let issue = xml().deserialize::<Issue>(ISSUE_XML).unwrap().unwrap();

    assert_eq!(issue.id, 42);
    assert_eq!(issue.project, Some(Reference::new(1, "Redmine")));
    assert_eq!(issue.status, Some(Reference::new(2, "In Progress")));
    assert_eq!(issue.parent, Some(Reference::with_id(40)));
    assert_eq!(issue.subject, "Crash on save");
    assert_eq!(issue.description.as_deref(), Some("Steps & details"));
    assert_eq!(issue.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(issue.done_ratio, Some(30));
    assert_eq!(issue.estimated_hours, Some(4.5));
    assert_eq!(issue.spent_hours, Some(1.25));
    assert_eq!(
        issue.created_on,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
    );
}

#[test]
fn test_decode_nested_collections() {
    let issue = xml().deserialize::<Issue>(ISSUE_XML).unwrap().unwrap();

    let fields = issue.custom_fields.unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].value, Some(CustomFieldValue::Text("1.0.3".into())));
    assert!(fields[1].multiple);
    assert_eq!(
        fields[1].value,
        Some(CustomFieldValue::List(vec!["Linux".into(), "Windows".into()]))
    );

    let journals = issue.journals.unwrap();
    assert_eq!(journals[0].id, 100);
    assert_eq!(journals[0].user, Some(Reference::new(3, "John Smith")));
    let detail = &journals[0].details.as_ref().unwrap()[0];
    assert_eq!(detail.property.as_deref(), Some("attr"));
    assert_eq!(detail.name.as_deref(), Some("status_id"));
    assert_eq!(detail.new_value.as_deref(), Some("2"));

    assert_eq!(
        issue.watchers.unwrap(),
        [Watcher {
            id: 5,
            name: Some("Jane Doe".into()),
        }]
    );

    let relation = &issue.relations.unwrap()[0];
    assert_eq!(relation.issue_to_id, 43);
    assert_eq!(relation.relation_type, Some(RelationType::Blocks));
    assert_eq!(relation.delay, None);

    let child = &issue.children.unwrap()[0];
    assert_eq!(child.id, 44);
    assert_eq!(child.subject.as_deref(), Some("Child"));
}

#[test]
fn test_empty_elements_are_absent() {
    let issue = xml().deserialize::<Issue>(ISSUE_XML).unwrap().unwrap();
    assert_eq!(issue.due_date, None);
    assert_eq!(issue.closed_on, None);

    let issue = xml()
        .deserialize::<Issue>("<issue><estimated_hours/><subject></subject><notes>  </notes></issue>")
        .unwrap()
        .unwrap();
    assert_eq!(issue.estimated_hours, None);
    assert_eq!(issue.subject, "");
    assert_eq!(issue.notes, None);
}

#[test]
fn test_unknown_elements_are_skipped() {
    let user = xml()
        .deserialize::<User>(
            r#"<user><id>3</id><login>jsmith</login><twofa_scheme>totp</twofa_scheme><avatar url="x"><size>2</size></avatar><status>3</status></user>"#,
        )
        .unwrap()
        .unwrap();
    assert_eq!(user.login.as_deref(), Some("jsmith"));
    assert_eq!(user.status, Some(UserStatus::Locked));
}

#[test]
fn test_decode_errors_name_the_field() {
    let err = xml()
        .deserialize::<Issue>("<issue><done_ratio>most</done_ratio></issue>")
        .unwrap_err();
    match err {
        Error::FieldDecode(err) => {
            assert_eq!(err.field, "done_ratio");
            assert!(err.to_string().starts_with("issue.done_ratio"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = xml()
        .deserialize::<Issue>(r#"<issue><project name="no id"/></issue>"#)
        .unwrap_err();
    assert!(matches!(err, Error::FieldDecode(_)));
}

#[test]
fn test_malformed_document() {
    let err = xml().deserialize::<Issue>("<issue><subject>x</issue>").unwrap_err();
    assert!(matches!(err, Error::MalformedDocument(_)));
}

#[test]
fn test_other_root_yields_nothing() {
    let decoded = xml().deserialize::<Issue>("<project><id>1</id></project>").unwrap();
    assert!(decoded.is_none());
    assert!(xml().deserialize::<Issue>("  \n").unwrap().is_none());
}

#[test]
fn test_role_permissions_from_text_content() {
    let role = xml()
        .deserialize::<Role>(
            r#"<role><id>3</id><name>Developer</name><assignable>true</assignable>
               <permissions type="array"><permission>add_issues</permission><permission>edit_issues</permission></permissions>
               </role>"#,
        )
        .unwrap()
        .unwrap();
    let permissions: Vec<_> = role
        .permissions
        .unwrap()
        .into_iter()
        .map(|p| p.info)
        .collect();
    assert_eq!(permissions, ["add_issues", "edit_issues"]);
    assert_eq!(role.assignable, Some(true));
}

#[test]
fn test_encode_issue_body() {
    let issue = Issue {
        id: 0,
        subject: "Crash & burn".into(),
        project: Some(Reference::new(1, "Redmine")),
        estimated_hours: Some(0.0),
        author: Some(Reference::new(3, "John Smith")),
        private_notes: true,
        uploads: Some(vec![Upload {
            token: Some("abc".into()),
            filename: Some("a.png".into()),
            ..Default::default()
        }]),
        custom_fields: Some(vec![
            IssueCustomField::text(2, "1.0"),
            IssueCustomField::list(3, ["a", "b"]),
        ]),
        watchers: Some(vec![Watcher {
            id: 5,
            name: Some("Jane".into()),
        }]),
        ..Default::default()
    };

    let body = xml().serialize(&issue).unwrap();
    assert_eq!(
        body,
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            "<issue>",
            "<subject>Crash &amp; burn</subject>",
            "<is_private>false</is_private>",
            "<project_id>1</project_id>",
            "<estimated_hours>0</estimated_hours>",
            r#"<uploads type="array"><upload><token>abc</token><filename>a.png</filename></upload></uploads>"#,
            r#"<custom_fields type="array">"#,
            r#"<custom_field id="2"><value>1.0</value></custom_field>"#,
            r#"<custom_field id="3"><value type="array"><value>a</value><value>b</value></value></custom_field>"#,
            "</custom_fields>",
            r#"<watcher_user_ids type="array"><watcher_user_id>5</watcher_user_id></watcher_user_ids>"#,
            "</issue>",
        )
    );
}

#[test]
fn test_private_notes_only_for_existing_issues() {
    let mut issue = Issue {
        subject: "s".into(),
        notes: Some("n".into()),
        private_notes: true,
        ..Default::default()
    };
    assert!(!xml().serialize(&issue).unwrap().contains("private_notes"));

    issue.id = 12;
    let body = xml().serialize(&issue).unwrap();
    assert!(body.contains("<notes>n</notes><private_notes>true</private_notes>"));
    assert!(!body.contains("<id>"));
}

#[test]
fn test_id_only_never_inline() {
    let issue = Issue {
        subject: "s".into(),
        tracker: Some(Reference::new(1, "Bug")),
        assigned_to: Some(Reference::new(5, "Jane")),
        ..Default::default()
    };
    let body = xml().serialize(&issue).unwrap();
    assert!(body.contains("<tracker_id>1</tracker_id>"));
    assert!(body.contains("<assigned_to_id>5</assigned_to_id>"));
    assert!(!body.contains("<tracker "));
    assert!(!body.contains("Jane"));
}

#[test]
fn test_fragment_and_empty_collections() {
    let page = WikiPage {
        title: Some("Home".into()),
        text: Some("h1. Welcome".into()),
        uploads: Some(Vec::new()),
        ..Default::default()
    };
    let body = xml().serialize_fragment(&page).unwrap();
    assert_eq!(
        body,
        r#"<wiki_page><text>h1. Welcome</text><uploads type="array"/></wiki_page>"#
    );
}

#[test]
fn test_error_content_encoding() {
    let body = xml()
        .serialize_fragment(&ServerError::new("Name can't be blank"))
        .unwrap();
    assert_eq!(body, "<error>Name can&apos;t be blank</error>");
}
