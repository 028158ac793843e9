//! Account domain model

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::family::FamilyId;
use super::result::{Error, Result};
use super::role::Role;

/// Review state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
}

impl AccountStatus {
    /// Approved and rejected are terminal
    pub fn is_terminal(self) -> bool {
        !matches!(self, AccountStatus::Pending)
    }

    /// Only `PENDING -> APPROVED` and `PENDING -> REJECTED` exist
    pub fn can_transition_to(self, next: AccountStatus) -> bool {
        self == AccountStatus::Pending && next.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Pending => "PENDING",
            AccountStatus::Approved => "APPROVED",
            AccountStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sealed secret as produced by a [`crate::ports::CredentialStore`].
///
/// The sealed form is opaque to the core. `Debug` never prints it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn from_sealed(sealed: impl Into<String>) -> Self {
        Self(sealed.into())
    }

    pub fn sealed(&self) -> &str {
        &self.0
    }

    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Security question used for self-service recovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryChallenge {
    pub question: String,
    /// Sealed the same way as the account credential
    pub answer: Credential,
}

/// A household member's login account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub role: Role,
    /// Present for MANAGER and MEMBER, absent for administrators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<FamilyId>,
    pub status: AccountStatus,
    #[serde(default)]
    pub credential: Credential,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_challenge: Option<RecoveryChallenge>,
    /// Audit reference to the creating account, not an ownership relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    /// Member consent to have financial data shown to the family manager
    #[serde(default)]
    pub allow_parent_view: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a pending account with no credential
    pub fn new(username: impl Into<String>, role: Role, family_id: Option<FamilyId>) -> Self {
        let username = username.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: username.clone(),
            username,
            role,
            family_id,
            status: AccountStatus::Pending,
            credential: Credential::default(),
            recovery_challenge: None,
            created_by: None,
            allow_parent_view: false,
            birth_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Only approved accounts may sign in
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Approved
    }

    /// Normalize a username for lookups and uniqueness checks
    pub fn normalize_username(username: &str) -> String {
        username.trim().to_lowercase()
    }

    /// Check the structural invariants of the account
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::invalid_request("username cannot be empty"));
        }
        match (self.role.is_family_scoped(), &self.family_id) {
            (true, None) => Err(Error::invalid_request(format!(
                "{} account {} has no family",
                self.role, self.username
            ))),
            (false, Some(_)) => Err(Error::invalid_request(format!(
                "{} account {} cannot belong to a family",
                self.role, self.username
            ))),
            _ => Ok(()),
        }
    }

    /// Mark the account as modified now
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
