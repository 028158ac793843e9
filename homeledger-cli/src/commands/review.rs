//! Approve and reject commands

use anyhow::Result;
use homeledger_core::LogEvent;

use super::Session;
use crate::output;

pub fn run(acting: Option<&str>, username: &str, approve: bool) -> Result<()> {
    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;
    let target = session.household.account(username)?.clone();

    let (command, result) = if approve {
        ("approve", session.ctx.account_service.request_approval(&actor, &target))
    } else {
        ("reject", session.ctx.account_service.request_rejection(&actor, &target))
    };
    let reviewed = session.check(command, &actor, result)?;

    let status = reviewed.status;
    session.household.upsert_account(reviewed);
    session.save()?;

    session.log(
        LogEvent::new("account_reviewed")
            .with_command(command)
            .with_actor(actor.id)
            .with_target(target.id)
            .with_outcome(status.as_str()),
    );
    output::success(&format!("'{}' is now {}", target.username, output::status_label(status)));
    Ok(())
}
