//! CLI command implementations

pub mod account;
pub mod authorize;
pub mod credential;
pub mod family;
pub mod init;
pub mod logs;
pub mod record;
pub mod register;
pub mod review;
pub mod roster;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use dialoguer::Password;
use homeledger_core::{Account, EntryPoint, HomeledgerContext, LogEvent, LoggingService};

use crate::store::Household;

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the homeledger directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("HOMELEDGER_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".homeledger"))
        .ok_or_else(|| anyhow!("Could not find home directory; set HOMELEDGER_DIR"))
}

/// Get or create the homeledger context
pub fn get_context() -> Result<HomeledgerContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create homeledger directory: {:?}", data_dir))?;

    HomeledgerContext::new(&data_dir).context("Failed to initialize homeledger context")
}

/// Prompt for a secret, optionally asking twice
pub fn prompt_secret(prompt: &str, confirm: bool) -> Result<String> {
    let mut input = Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Repeat to confirm", "Entries do not match");
    }
    Ok(input.interact()?)
}

/// Loaded household plus the services a command needs
pub struct Session {
    pub ctx: HomeledgerContext,
    pub household: Household,
    pub logger: Option<LoggingService>,
}

impl Session {
    pub fn open() -> Result<Self> {
        let ctx = get_context()?;
        let household = Household::load(&ctx.snapshot_path())?;
        let logger = ctx.logger(EntryPoint::Cli, env!("CARGO_PKG_VERSION"));
        Ok(Self {
            ctx,
            household,
            logger,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.household.save(&self.ctx.snapshot_path())
    }

    pub fn log(&self, event: LogEvent) {
        log_event(&self.logger, event);
    }

    /// Resolve `--as` and check the acting account's secret.
    ///
    /// The secret comes from `HOMELEDGER_SECRET` when set, otherwise from a prompt.
    pub fn sign_in(&self, acting: Option<&str>) -> Result<Account> {
        let username =
            acting.context("This command needs an acting account: pass --as <username>")?;
        let account = self.household.account(username)?.clone();

        let secret = match std::env::var("HOMELEDGER_SECRET") {
            Ok(secret) => secret,
            Err(_) => prompt_secret(&format!("Password for {}", account.username), false)?,
        };

        if let Err(e) = self.ctx.account_service.sign_in(&account, &secret) {
            self.log(
                LogEvent::new("sign_in_failed")
                    .with_actor(account.id)
                    .with_error(e.code()),
            );
            return Err(e).context(format!("Cannot act as '{}'", account.username));
        }
        Ok(account)
    }

    /// Log a failed core operation before handing the error to anyhow
    pub fn check<T>(
        &self,
        command: &str,
        actor: &Account,
        result: homeledger_core::domain::result::Result<T>,
    ) -> Result<T> {
        result.map_err(|e| {
            self.log(
                LogEvent::new("command_failed")
                    .with_command(command)
                    .with_actor(actor.id)
                    .with_error(e.code())
                    .with_error_details(e.to_string()),
            );
            anyhow!(e)
        })
    }
}
