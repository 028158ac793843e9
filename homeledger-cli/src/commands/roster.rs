//! Roster and pending commands - list accounts the actor may see

use anyhow::Result;
use homeledger_core::services::roster_for;
use homeledger_core::{Account, LogEvent};

use super::Session;
use crate::output;

pub fn run(acting: Option<&str>, json: bool) -> Result<()> {
    let session = Session::open()?;
    let actor = session.sign_in(acting)?;

    let visible = session.check(
        "roster",
        &actor,
        roster_for(&actor, &session.household.accounts),
    )?;
    session.log(
        LogEvent::new("roster_viewed")
            .with_command("roster")
            .with_actor(actor.id),
    );

    print_accounts(&visible, json, "No accounts visible.")
}

pub fn run_pending(acting: Option<&str>, json: bool) -> Result<()> {
    let session = Session::open()?;
    let actor = session.sign_in(acting)?;

    let pending = session
        .ctx
        .account_service
        .pending_accounts(&actor, &session.household.accounts);
    session.log(
        LogEvent::new("pending_viewed")
            .with_command("pending")
            .with_actor(actor.id),
    );

    if !actor.role.is_admin() && !json {
        output::warning("Only administrators review registrations.");
        return Ok(());
    }
    print_accounts(&pending, json, "No registrations awaiting review.")
}

fn print_accounts(accounts: &[&Account], json: bool, empty: &str) -> Result<()> {
    if json {
        // Credentials stay out of the output
        let rows: Vec<serde_json::Value> = accounts
            .iter()
            .map(|a| {
                serde_json::json!({
                    "id": a.id,
                    "username": a.username,
                    "name": a.name,
                    "role": a.role,
                    "familyId": a.family_id,
                    "status": a.status,
                    "allowParentView": a.allow_parent_view,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("{}", empty);
        return Ok(());
    }
    println!("{}", output::account_table(accounts));
    Ok(())
}
