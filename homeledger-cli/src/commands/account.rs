//! Create, update, delete and consent commands

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use dialoguer::Confirm;
use homeledger_core::services::{AccountUpdate, NewAccount};
use homeledger_core::{LogEvent, Role};

use super::{prompt_secret, Session};
use crate::output;

pub struct CreateArgs {
    pub username: String,
    pub role: Role,
    pub family: Option<String>,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub password: Option<String>,
}

pub fn create(acting: Option<&str>, args: CreateArgs) -> Result<()> {
    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;
    session.household.ensure_username_free(&args.username, None)?;

    let secret = match args.password {
        Some(p) => p,
        None => prompt_secret(&format!("Initial password for {}", args.username), true)?,
    };

    let mut fields = NewAccount::new(args.username.as_str(), args.role, secret);
    if let Some(family) = args.family.as_deref() {
        fields = fields.in_family(family);
    }
    if let Some(name) = args.name {
        fields = fields.named(name);
    }
    fields.birth_date = args.birth_date;

    let account = session.check(
        "create",
        &actor,
        session.ctx.account_service.create_account(&actor, fields),
    )?;
    let summary = format!(
        "{} '{}' created{}",
        account.role.label(),
        account.username,
        account
            .family_id
            .as_ref()
            .map(|f| format!(" in family {}", f))
            .unwrap_or_default()
    );
    let id = account.id;
    session.household.upsert_account(account);
    session.save()?;

    session.log(
        LogEvent::new("account_created")
            .with_command("create")
            .with_actor(actor.id)
            .with_target(id),
    );
    output::success(&summary);
    Ok(())
}

pub struct UpdateArgs {
    pub name: Option<String>,
    pub new_username: Option<String>,
    pub role: Option<Role>,
    pub birth_date: Option<NaiveDate>,
}

pub fn update(acting: Option<&str>, username: &str, args: UpdateArgs) -> Result<()> {
    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;
    let target = session.household.account(username)?.clone();

    if let Some(new_username) = args.new_username.as_deref() {
        session.household.ensure_username_free(new_username, Some(target.id))?;
    }

    let update = AccountUpdate {
        name: args.name,
        username: args.new_username,
        role: args.role,
        birth_date: args.birth_date,
        allow_parent_view: None,
    };
    let updated = session.check(
        "update",
        &actor,
        session.ctx.account_service.update_account(&actor, &target, update),
    )?;

    let role_changed = updated.role != target.role;
    let new_role = updated.role;
    session.household.upsert_account(updated);
    session.save()?;

    let mut event = LogEvent::new("account_updated")
        .with_command("update")
        .with_actor(actor.id)
        .with_target(target.id);
    if role_changed {
        event = event.with_outcome(format!("role:{}", new_role));
    }
    session.log(event);

    output::success(&format!("Account '{}' updated", target.username));
    if role_changed {
        output::info(&format!("Role is now {}", new_role.label()));
    }
    Ok(())
}

pub fn delete(acting: Option<&str>, username: &str, force: bool) -> Result<()> {
    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;
    let target = session.household.account(username)?.clone();

    let deletion = session.check(
        "delete",
        &actor,
        session.ctx.account_service.delete_account(&actor, &target),
    )?;

    if !force {
        let owned = session
            .household
            .records
            .iter()
            .filter(|r| r.user_id == deletion.account_id)
            .count();
        println!(
            "\n{}",
            format!(
                "This will delete '{}' and {} record(s) they own.",
                deletion.username, owned
            )
            .yellow()
        );
        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let removed = session.household.remove_account(deletion.account_id);
    session.save()?;

    session.log(
        LogEvent::new("account_deleted")
            .with_command("delete")
            .with_actor(actor.id)
            .with_target(deletion.account_id),
    );
    output::success(&format!(
        "Account '{}' deleted ({} record(s) removed)",
        deletion.username, removed
    ));
    Ok(())
}

pub fn consent(acting: Option<&str>, allow: bool) -> Result<()> {
    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;

    let updated = session.check(
        "consent",
        &actor,
        session.ctx.account_service.set_parent_view_consent(&actor, allow),
    )?;
    session.household.upsert_account(updated);
    session.save()?;

    session.log(
        LogEvent::new("consent_changed")
            .with_command("consent")
            .with_actor(actor.id)
            .with_outcome(if allow { "on" } else { "off" }),
    );
    if allow {
        output::success("Your family manager can now see your figures");
    } else {
        output::success("Your figures are hidden from your family manager");
    }
    Ok(())
}
