//! Service layer - business logic orchestration
//!
//! `permission`, `lifecycle` and `visibility` are pure: they work on the
//! snapshots they are given and return new values. `logging` is the only
//! service that touches disk, and only callers at the edge use it.

pub mod lifecycle;
pub mod logging;
pub mod permission;
pub mod visibility;

pub use lifecycle::{
    AccountService, AccountUpdate, ChallengeInput, CredentialChange, Deletion, NewAccount,
    Registration,
};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use permission::{authorize, roster_for, Action, Decision, DenialReason};
pub use visibility::{
    can_edit_record, filter_visibility, filter_visibility_for, VisibilitySummary, VisibilityView,
};
