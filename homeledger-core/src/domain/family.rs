//! Family partition
//!
//! Accounts are grouped into households by a flat, optional family id.
//! Grouping is plain equality; there is no hierarchy between families.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::account::Account;

/// Identifier of a household unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(String);

impl FamilyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FamilyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// True iff both accounts carry a family id and the ids are equal
pub fn same_family(a: &Account, b: &Account) -> bool {
    match (&a.family_id, &b.family_id) {
        (Some(fa), Some(fb)) => fa == fb,
        _ => false,
    }
}

/// Accounts belonging to `family_id`, in input order
pub fn family_members_of<'a>(accounts: &'a [Account], family_id: &FamilyId) -> Vec<&'a Account> {
    accounts
        .iter()
        .filter(|a| a.family_id.as_ref() == Some(family_id))
        .collect()
}

/// Whether `owner` lives in the same family context as `actor`.
///
/// Unlike [`same_family`], two family-less accounts share a context, so
/// administrators see each other's records but never a household's.
pub fn shares_family_context(actor: &Account, owner: &Account) -> bool {
    actor.id == owner.id || actor.family_id == owner.family_id
}
