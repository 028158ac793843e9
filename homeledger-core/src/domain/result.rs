//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::account::AccountStatus;

/// Core library error type
///
/// `InvalidRequest` and `UnknownAccount` signal caller bugs (malformed input or
/// an incomplete roster snapshot). Every other variant is a user-facing refusal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Insufficient privilege: {0}")]
    InsufficientPrivilege(String),

    #[error("Forbidden role assignment: {0}")]
    ForbiddenRoleAssignment(String),

    #[error("An account cannot delete itself")]
    SelfDeletionForbidden,

    #[error("Current credential does not match")]
    CredentialMismatch,

    #[error("New credential and confirmation do not match")]
    ConfirmationMismatch,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown account: {0}")]
    UnknownAccount(Uuid),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: AccountStatus,
        to: AccountStatus,
    },

    #[error("Account is not active ({0})")]
    AccountNotActive(AccountStatus),
}

impl Error {
    /// Create an insufficient privilege error
    pub fn insufficient_privilege(msg: impl Into<String>) -> Self {
        Self::InsufficientPrivilege(msg.into())
    }

    /// Create a forbidden role assignment error
    pub fn forbidden_role(msg: impl Into<String>) -> Self {
        Self::ForbiddenRoleAssignment(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Whether the error points at a caller bug rather than a user refusal
    pub fn is_logic_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::UnknownAccount(_))
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientPrivilege(_) => "insufficient_privilege",
            Self::ForbiddenRoleAssignment(_) => "forbidden_role_assignment",
            Self::SelfDeletionForbidden => "self_deletion_forbidden",
            Self::CredentialMismatch => "credential_mismatch",
            Self::ConfirmationMismatch => "confirmation_mismatch",
            Self::InvalidRequest(_) => "invalid_request",
            Self::UnknownAccount(_) => "unknown_account",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::AccountNotActive(_) => "account_not_active",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for UI serialization)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            error_code: None,
            context: None,
        }
    }

    /// Attach context to the result
    pub fn with_context(mut self, context: HashMap<String, serde_json::Value>) -> Self {
        self.context = Some(context);
        self
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                let mut failed = Self::fail(e.to_string());
                failed.error_code = Some(e.code().to_string());
                failed
            }
        }
    }
}
