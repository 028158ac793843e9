//! Register command - self-registration awaiting review

use anyhow::Result;
use homeledger_core::services::{NewAccount, Registration};
use homeledger_core::{LogEvent, Role};

use super::{prompt_secret, Session};
use crate::output;

pub struct RegisterArgs {
    pub username: String,
    pub role: Role,
    pub family: String,
    pub name: Option<String>,
    pub allow_parent_view: bool,
    pub password: Option<String>,
}

pub fn run(args: RegisterArgs) -> Result<()> {
    let mut session = Session::open()?;
    session.household.ensure_username_free(&args.username, None)?;

    let secret = match args.password {
        Some(p) => p,
        None => prompt_secret("Choose a password", true)?,
    };

    let mut fields = NewAccount::new(args.username.as_str(), args.role, secret)
        .in_family(args.family.as_str());
    if let Some(name) = args.name {
        fields = fields.named(name);
    }

    let account = session.ctx.account_service.register(Registration {
        account: fields,
        allow_parent_view: args.allow_parent_view,
    })?;
    let id = account.id;
    session.household.upsert_account(account);
    session.save()?;

    session.log(
        LogEvent::new("account_registered")
            .with_command("register")
            .with_target(id),
    );
    output::success(&format!("Account '{}' registered", args.username));
    output::info("An administrator must approve it before you can sign in.");
    Ok(())
}
