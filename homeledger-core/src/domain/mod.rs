//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
pub mod family;
mod record;
mod role;
pub mod result;

pub use account::{Account, AccountStatus, Credential, RecoveryChallenge};
pub use family::{family_members_of, same_family, shares_family_context, FamilyId};
pub use record::{FinancialRecord, Frequency, MaskedRecord, RecordKind};
pub use role::Role;
