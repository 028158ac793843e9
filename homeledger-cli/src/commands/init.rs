//! Init command - seed the first super admin

use anyhow::Result;
use colored::Colorize;
use homeledger_core::services::NewAccount;
use homeledger_core::{LogEvent, Role};

use super::{prompt_secret, Session};
use crate::output;

pub fn run(username: &str, name: Option<String>, password: Option<String>) -> Result<()> {
    let mut session = Session::open()?;
    session.household.ensure_username_free(username, None)?;

    let secret = match password {
        Some(p) => p,
        None => prompt_secret("Choose a password", true)?,
    };

    let mut fields = NewAccount::new(username, Role::SuperAdmin, secret);
    if let Some(name) = name {
        fields = fields.named(name);
    }

    let root = session
        .ctx
        .account_service
        .bootstrap_super_admin(fields, &session.household.accounts)?;
    let root_id = root.id;
    session.household.upsert_account(root);
    session.save()?;

    session.log(
        LogEvent::new("household_initialized")
            .with_actor(root_id)
            .with_command("init"),
    );
    output::success(&format!("Super admin '{}' created", username));
    println!(
        "{}",
        format!("Household file: {}", session.ctx.snapshot_path().display()).dimmed()
    );
    Ok(())
}
