//! Household snapshot persistence
//!
//! The core never stores anything; the CLI keeps accounts and records in a
//! single JSON file and writes back whatever entity an operation returns.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homeledger_core::{Account, FinancialRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Household {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub records: Vec<FinancialRecord>,
}

impl Household {
    /// Load the snapshot, or an empty household if the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("Corrupt household file {:?}", path))
    }

    /// Write the snapshot atomically (temp file + rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp: PathBuf = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&tmp, content).with_context(|| format!("Failed to write {:?}", tmp))?;
        std::fs::rename(&tmp, path).with_context(|| format!("Failed to replace {:?}", path))?;
        Ok(())
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        let wanted = Account::normalize_username(username);
        self.accounts
            .iter()
            .find(|a| Account::normalize_username(&a.username) == wanted)
    }

    /// Like `find_by_username`, but a miss is an error naming the account
    pub fn account(&self, username: &str) -> Result<&Account> {
        match self.find_by_username(username) {
            Some(account) => Ok(account),
            None => bail!("No account named '{}'", username),
        }
    }

    pub fn account_by_id(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Usernames are unique case-insensitively; `except` skips the account being renamed
    pub fn ensure_username_free(&self, username: &str, except: Option<Uuid>) -> Result<()> {
        if let Some(existing) = self.find_by_username(username) {
            if Some(existing.id) != except {
                bail!("Username '{}' is already taken", username);
            }
        }
        Ok(())
    }

    /// Insert a new account or replace the stored copy with the same id
    pub fn upsert_account(&mut self, account: Account) {
        match self.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(slot) => *slot = account,
            None => self.accounts.push(account),
        }
    }

    /// Drop an account together with the records it owns
    pub fn remove_account(&mut self, id: Uuid) -> usize {
        self.accounts.retain(|a| a.id != id);
        let before = self.records.len();
        self.records.retain(|r| r.user_id != id);
        before - self.records.len()
    }

    pub fn remove_record(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before != self.records.len()
    }
}
