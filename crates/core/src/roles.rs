//! Ranked role model and the page access policy.
//!
//! Roles are an enumerated, ordered type rather than free-form strings so a
//! typo in a role claim can never silently grant (or deny) access: parsing an
//! unknown role fails loudly at the boundary.
//!
//! The policy functions are pure and total over `(Role, membership)`:
//!
//! | role        | read            | write           | delete |
//! |-------------|-----------------|-----------------|--------|
//! | viewer      | member only     | never           | never  |
//! | editor      | member only     | member only     | never  |
//! | admin       | always          | always          | always |
//! | superadmin  | always          | always          | always |

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A principal's role, ordered by privilege.
///
/// The derived `Ord` follows declaration order, so rank comparisons like
/// `role >= Role::Admin` are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Viewer,
    Editor,
    Admin,
    Superadmin,
}

impl Role {
    /// All roles, lowest privilege first.
    pub const ALL: [Role; 4] = [Role::Viewer, Role::Editor, Role::Admin, Role::Superadmin];

    /// The canonical wire name of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    /// Whether this role has admin-level privileges (admin or superadmin).
    pub fn is_admin(self) -> bool {
        self >= Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// May the principal read pages in a space?
///
/// Admins read everywhere; everyone else must be a member of the space.
pub fn can_read(role: Role, is_space_member: bool) -> bool {
    role.is_admin() || is_space_member
}

/// May the principal create or edit pages in a space?
///
/// Admins write everywhere; editors only in spaces they are members of.
/// Viewers never write, member or not.
pub fn can_write(role: Role, is_space_member: bool) -> bool {
    role.is_admin() || (role == Role::Editor && is_space_member)
}

/// May the principal delete pages? Admin-level only, regardless of membership.
pub fn can_delete(role: Role) -> bool {
    role.is_admin()
}
