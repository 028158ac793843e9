//! Role domain model
//!
//! Four privilege levels with a fixed ordering:
//! `SUPER_ADMIN > ADMIN > MANAGER > MEMBER`. Callers reason about privilege
//! through the named predicates only; the underlying rank is private.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::Error;

/// Privilege level of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Member,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::Manager, Role::Member];

    fn rank(self) -> u8 {
        match self {
            Role::SuperAdmin => 3,
            Role::Admin => 2,
            Role::Manager => 1,
            Role::Member => 0,
        }
    }

    pub fn is_super_admin(self) -> bool {
        self == Role::SuperAdmin
    }

    /// True for ADMIN and SUPER_ADMIN
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_manager(self) -> bool {
        self == Role::Manager
    }

    pub fn is_member(self) -> bool {
        self == Role::Member
    }

    /// Strictly higher privilege than `other`
    pub fn outranks(self, other: Role) -> bool {
        self.rank() > other.rank()
    }

    /// Whether the role is bound to a family unit
    pub fn is_family_scoped(self) -> bool {
        matches!(self, Role::Manager | Role::Member)
    }

    /// Managers and above get the administration console
    pub fn can_open_admin_console(self) -> bool {
        !self.is_member()
    }

    /// Human-readable label for UI surfaces
    pub fn label(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Administrator",
            Role::Manager => "Family Manager",
            Role::Member => "Member",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Member => "MEMBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "super_admin" | "superadmin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "member" => Ok(Role::Member),
            other => Err(Error::invalid_request(format!("unknown role: {}", other))),
        }
    }
}
