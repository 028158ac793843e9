//! Permission policy - the single authorization decision point
//!
//! Every "may actor do X to target" question in the system is answered by
//! [`authorize`]. Rules are evaluated per action; within an action the first
//! matching rule wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::{same_family, Account};

/// Something an actor wants to do to a target account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewRoster,
    EditUser,
    DeleteUser,
    ResetPassword,
    ViewFinancials,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::ViewRoster,
        Action::EditUser,
        Action::DeleteUser,
        Action::ResetPassword,
        Action::ViewFinancials,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::ViewRoster => "view_roster",
            Action::EditUser => "edit_user",
            Action::DeleteUser => "delete_user",
            Action::ResetPassword => "reset_password",
            Action::ViewFinancials => "view_financials",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| Error::invalid_request(format!("unknown action: {}", s.trim())))
    }
}

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    SelfDeletionForbidden,
    /// Own credential goes through the self-service change instead
    SelfResetForbidden,
    OutsideFamily,
    InsufficientPrivilege,
    /// Administrators leave member resets to the family manager
    ResetDelegatedToManager,
    /// The member has not allowed the manager to see their figures
    ConsentWithheld,
    NotVisible,
    NotRecordOwner,
}

impl DenialReason {
    /// User-facing explanation
    pub fn message(self) -> &'static str {
        match self {
            DenialReason::SelfDeletionForbidden => "You cannot delete your own account",
            DenialReason::SelfResetForbidden => {
                "Use the credential change form to update your own password"
            }
            DenialReason::OutsideFamily => "This account belongs to another family",
            DenialReason::InsufficientPrivilege => "Your role does not allow this action",
            DenialReason::ResetDelegatedToManager => {
                "Member passwords are reset by their family manager"
            }
            DenialReason::ConsentWithheld => "This member keeps their figures private",
            DenialReason::NotVisible => "This account is not visible to you",
            DenialReason::NotRecordOwner => "You can only edit your own records",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DenialReason::SelfDeletionForbidden => "self_deletion_forbidden",
            DenialReason::SelfResetForbidden => "self_reset_forbidden",
            DenialReason::OutsideFamily => "outside_family",
            DenialReason::InsufficientPrivilege => "insufficient_privilege",
            DenialReason::ResetDelegatedToManager => "reset_delegated_to_manager",
            DenialReason::ConsentWithheld => "consent_withheld",
            DenialReason::NotVisible => "not_visible",
            DenialReason::NotRecordOwner => "not_record_owner",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`authorize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Allowed,
    Denied(DenialReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn reason(&self) -> Option<DenialReason> {
        match self {
            Decision::Allowed => None,
            Decision::Denied(reason) => Some(*reason),
        }
    }

    /// Convert into the error taxonomy for operations gated on this decision
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(DenialReason::SelfDeletionForbidden) => {
                Err(Error::SelfDeletionForbidden)
            }
            Decision::Denied(reason) => Err(Error::insufficient_privilege(reason.message())),
        }
    }
}

/// Decide whether `actor` may perform `action` on `target`.
///
/// Never fails for well-formed accounts; `InvalidRequest` is returned when
/// either account violates its structural invariants.
pub fn authorize(actor: &Account, target: &Account, action: Action) -> Result<Decision> {
    actor.validate()?;
    target.validate()?;

    let decision = match action {
        Action::ViewRoster => view_roster(actor, target),
        Action::EditUser => manage_user(actor, target),
        Action::DeleteUser => {
            if actor.id == target.id {
                Decision::Denied(DenialReason::SelfDeletionForbidden)
            } else {
                manage_user(actor, target)
            }
        }
        Action::ResetPassword => reset_password(actor, target),
        Action::ViewFinancials => view_financials(actor, target),
    };

    Ok(decision)
}

/// The accounts `actor` can see in the user roster, in input order
pub fn roster_for<'a>(actor: &Account, accounts: &'a [Account]) -> Result<Vec<&'a Account>> {
    let mut visible = Vec::new();
    for account in accounts {
        if authorize(actor, account, Action::ViewRoster)?.is_allowed() {
            visible.push(account);
        }
    }
    Ok(visible)
}

fn view_roster(actor: &Account, target: &Account) -> Decision {
    if actor.role.is_admin() {
        Decision::Allowed
    } else if actor.role.is_manager() {
        if same_family(actor, target) {
            Decision::Allowed
        } else {
            Decision::Denied(DenialReason::OutsideFamily)
        }
    } else if actor.id == target.id {
        Decision::Allowed
    } else {
        Decision::Denied(DenialReason::NotVisible)
    }
}

fn manage_user(actor: &Account, target: &Account) -> Decision {
    if let Decision::Denied(reason) = view_roster(actor, target) {
        return Decision::Denied(reason);
    }
    if actor.role.is_member() {
        return Decision::Denied(DenialReason::InsufficientPrivilege);
    }
    if actor.role.is_admin() || (actor.role.is_manager() && same_family(actor, target)) {
        Decision::Allowed
    } else {
        Decision::Denied(DenialReason::OutsideFamily)
    }
}

fn reset_password(actor: &Account, target: &Account) -> Decision {
    if actor.id == target.id {
        return Decision::Denied(DenialReason::SelfResetForbidden);
    }

    if actor.role.is_admin() {
        // Member resets stay with the family manager
        if target.role.is_member() {
            Decision::Denied(DenialReason::ResetDelegatedToManager)
        } else {
            Decision::Allowed
        }
    } else if actor.role.is_manager() {
        if !same_family(actor, target) {
            Decision::Denied(DenialReason::OutsideFamily)
        } else if target.role.is_member() {
            Decision::Allowed
        } else {
            Decision::Denied(DenialReason::InsufficientPrivilege)
        }
    } else {
        Decision::Denied(DenialReason::InsufficientPrivilege)
    }
}

fn view_financials(actor: &Account, target: &Account) -> Decision {
    if actor.id == target.id || actor.role.is_admin() {
        return Decision::Allowed;
    }

    if actor.role.is_manager() {
        if !same_family(actor, target) {
            Decision::Denied(DenialReason::OutsideFamily)
        } else if target.allow_parent_view {
            Decision::Allowed
        } else {
            Decision::Denied(DenialReason::ConsentWithheld)
        }
    } else {
        Decision::Denied(DenialReason::NotVisible)
    }
}
