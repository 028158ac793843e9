//! Homeledger Core - authorization and visibility for household finance
//!
//! The crate follows a hexagonal layout:
//!
//! - **domain**: roles, families, accounts and financial records
//! - **ports**: traits for external collaborators (credential sealing)
//! - **services**: the permission policy, account lifecycle, visibility
//!   filter and the event log
//! - **adapters**: default port implementations
//!
//! Policy code works on snapshots handed in by the caller and returns new
//! entities instead of writing them anywhere.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use adapters::DigestCredentialStore;
use config::Config;
use ports::CredentialStore;
use services::AccountService;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Account, AccountStatus, Credential, FamilyId, FinancialRecord, MaskedRecord, RecordKind, Role,
};
pub use services::{
    authorize, filter_visibility, Action, Decision, DenialReason, EntryPoint, LogEvent,
    LoggingService,
};

/// Main context for Homeledger front ends
///
/// Bundles configuration with the services a front end needs. Holds no
/// account data; callers pass snapshots into each operation.
pub struct HomeledgerContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub credentials: Arc<dyn CredentialStore>,
    pub account_service: AccountService,
}

impl HomeledgerContext {
    /// Create a context with the default credential store
    pub fn new(data_dir: &Path) -> Result<Self> {
        Self::with_credentials(data_dir, Arc::new(DigestCredentialStore::new()))
    }

    /// Create a context with a caller-supplied credential store
    pub fn with_credentials(
        data_dir: &Path,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let account_service = AccountService::new(Arc::clone(&credentials));

        Ok(Self {
            config,
            data_dir: data_dir.to_path_buf(),
            credentials,
            account_service,
        })
    }

    /// Path of the household snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.config.snapshot_path(&self.data_dir)
    }

    /// Open the event log if logging is enabled
    pub fn logger(&self, entry_point: EntryPoint, app_version: &str) -> Option<LoggingService> {
        if !self.config.logging_enabled {
            return None;
        }
        LoggingService::new(&self.data_dir, entry_point, app_version).ok()
    }
}
