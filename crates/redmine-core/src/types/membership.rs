//! Roles, permissions and project memberships.

use super::Reference;
use crate::schema::{collection, field, Entity, FieldDef};

/// A role, as returned by `/roles/:id`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: Option<String>,
    pub assignable: Option<bool>,
    pub permissions: Option<Vec<Permission>>,
}

impl Entity for Role {
    const ROOT: &'static str = "role";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Role, "id", Int, id).read_only(),
        field!(Role, "name", Str, name).read_only(),
        field!(Role, "assignable", Bool, assignable).read_only(),
        collection!(Role, "permissions", "permission", Permission, permissions).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A permission granted by a role.
///
/// Carried as the element text in markup (`<permission>add_issues</permission>`)
/// and as a bare string in the text format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Permission {
    pub info: String,
}

impl Entity for Permission {
    const ROOT: &'static str = "permission";
    const FIELDS: &'static [FieldDef<Self>] = &[field!(Permission, "info", Str, info).content()];

    fn name(&self) -> Option<&str> {
        Some(&self.info)
    }
}

/// A membership as embedded in a user (`/users/:id?include=memberships`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Membership {
    pub id: i32,
    pub project: Option<Reference>,
    pub roles: Option<Vec<MembershipRole>>,
}

impl Entity for Membership {
    const ROOT: &'static str = "membership";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(Membership, "id", Int, id).read_only(),
        field!(Membership, "project", Ref, project).read_only(),
        collection!(Membership, "roles", "role", MembershipRole, roles).read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}

/// A role held through a membership; `inherited` marks roles granted
/// through a group or a parent project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MembershipRole {
    pub id: i32,
    pub name: Option<String>,
    pub inherited: Option<bool>,
}

impl Entity for MembershipRole {
    const ROOT: &'static str = "role";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(MembershipRole, "id", Int, id).attribute().read_only(),
        field!(MembershipRole, "name", Str, name).attribute().read_only(),
        field!(MembershipRole, "inherited", Bool, inherited)
            .attribute()
            .read_only(),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A project membership, as managed through `/projects/:id/memberships`.
///
/// Created for a user (or group) by id with a list of role ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectMembership {
    pub id: i32,
    pub project: Option<Reference>,
    pub user: Option<Reference>,
    pub group: Option<Reference>,
    pub roles: Option<Vec<MembershipRole>>,
}

impl Entity for ProjectMembership {
    const ROOT: &'static str = "membership";
    const FIELDS: &'static [FieldDef<Self>] = &[
        field!(ProjectMembership, "id", Int, id).read_only(),
        field!(ProjectMembership, "project", Ref, project).read_only(),
        field!(ProjectMembership, "user", Ref, user).id_only("user_id"),
        field!(ProjectMembership, "group", Ref, group).read_only(),
        collection!(ProjectMembership, "roles", "role", MembershipRole, roles)
            .id_list("role_ids", "role_id"),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}
