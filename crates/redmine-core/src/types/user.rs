//! Users and groups.

use chrono::{DateTime, Utc};

use super::{IssueCustomField, Membership};
use crate::schema::{collection, field, int_enum, Entity, FieldDef};

int_enum! {
    /// Account state of a user.
    pub enum UserStatus {
        Active = 1,
        Registered = 2,
        Locked = 3,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub login: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub mail: Option<String>,
    /// Sent on create/update, never returned.
    pub password: Option<String>,
    pub auth_source_id: Option<i32>,
    pub must_change_passwd: Option<bool>,
    pub mail_notification: Option<String>,
    pub status: Option<UserStatus>,
    pub api_key: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub last_login_on: Option<DateTime<Utc>>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub memberships: Option<Vec<Membership>>,
    pub groups: Option<Vec<UserGroup>>,
}

impl Entity for User {
    const ROOT: &'static str = "user";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(User, "id", Int, id).read_only(),
        field!(User, "login", Str, login),
        field!(User, "firstname", Str, firstname),
        field!(User, "lastname", Str, lastname),
        field!(User, "mail", Str, mail),
        field!(User, "password", Str, password).write_only(),
        field!(User, "auth_source_id", Int, auth_source_id),
        field!(User, "must_change_passwd", Bool, must_change_passwd),
        field!(User, "mail_notification", Str, mail_notification),
        field!(User, "status", Int, status).persisted_only(),
        collection!(User, "custom_fields", "custom_field", IssueCustomField, custom_fields),
        field!(User, "api_key", Str, api_key).read_only(),
        field!(User, "created_on", DateTime, created_on).read_only(),
        field!(User, "last_login_on", DateTime, last_login_on).read_only(),
        collection!(User, "memberships", "membership", Membership, memberships).read_only(),
        collection!(User, "groups", "group", UserGroup, groups).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.login.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    pub id: i32,
    pub name: Option<String>,
    pub users: Option<Vec<GroupUser>>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub memberships: Option<Vec<Membership>>,
}

impl Entity for Group {
    const ROOT: &'static str = "group";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Group, "id", Int, id).read_only(),
        field!(Group, "name", Str, name),
        collection!(Group, "users", "user", GroupUser, users).id_list("user_ids", "user_id"),
        collection!(Group, "custom_fields", "custom_field", IssueCustomField, custom_fields),
        collection!(Group, "memberships", "membership", Membership, memberships).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

named_record! {
    /// A member of a group.
    GroupUser, "user"
}

named_record! {
    /// A group a user belongs to.
    UserGroup, "group"
}
