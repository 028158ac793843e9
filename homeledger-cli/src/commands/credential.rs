//! Password commands: forced reset, self-service change and recovery

use anyhow::{Context, Result};
use dialoguer::Input;
use homeledger_core::services::{ChallengeInput, CredentialChange};
use homeledger_core::{authorize, Action, LogEvent};

use super::{prompt_secret, Session};
use crate::output;

pub fn reset(acting: Option<&str>, username: &str, password: Option<String>) -> Result<()> {
    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;
    let target = session.household.account(username)?.clone();

    // Decide before prompting so a denied reset never asks for a password
    let decision = session.check(
        "reset-password",
        &actor,
        authorize(&actor, &target, Action::ResetPassword),
    )?;
    session.log(LogEvent::decision(Action::ResetPassword, actor.id, target.id, decision));
    session.check("reset-password", &actor, decision.into_result())?;

    let secret = match password {
        Some(p) => p,
        None => prompt_secret(&format!("New password for {}", target.username), true)?,
    };
    let updated = session.check(
        "reset-password",
        &actor,
        session.ctx.account_service.reset_credential(&actor, &target, &secret),
    )?;
    session.household.upsert_account(updated);
    session.save()?;

    output::success(&format!("Password for '{}' reset", target.username));
    Ok(())
}

pub fn change_own(acting: Option<&str>, question: Option<String>) -> Result<()> {
    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;

    let current = prompt_secret("Current password", false)?;
    let new = prompt_secret("New password", false)?;
    let confirmation = prompt_secret("Repeat new password", false)?;

    let challenge = match question {
        Some(question) => {
            let answer: String = Input::new()
                .with_prompt(format!("Answer to \"{}\"", question))
                .interact_text()?;
            Some(ChallengeInput { question, answer })
        }
        None => None,
    };

    let updated = session.check(
        "passwd",
        &actor,
        session.ctx.account_service.change_own_credential(
            &actor,
            CredentialChange {
                current,
                new,
                confirmation: Some(confirmation),
                challenge,
            },
        ),
    )?;
    let has_challenge = updated.recovery_challenge.is_some();
    session.household.upsert_account(updated);
    session.save()?;

    session.log(
        LogEvent::new("credential_changed")
            .with_command("passwd")
            .with_actor(actor.id),
    );
    output::success("Password changed");
    if !has_challenge {
        output::warning("No recovery question is set; pass --question to add one.");
    }
    Ok(())
}

pub fn recover(username: &str) -> Result<()> {
    let mut session = Session::open()?;
    let account = session.household.account(username)?.clone();

    let question = account
        .recovery_challenge
        .as_ref()
        .map(|c| c.question.clone())
        .context("This account has no recovery question; ask your family manager to reset it")?;

    let answer: String = Input::new().with_prompt(question).interact_text()?;
    let secret = prompt_secret("New password", true)?;

    let updated = match session
        .ctx
        .account_service
        .recover_credential(&account, &answer, &secret)
    {
        Ok(updated) => updated,
        Err(e) => {
            session.log(
                LogEvent::new("recovery_failed")
                    .with_command("recover")
                    .with_target(account.id)
                    .with_error(e.code()),
            );
            return Err(e.into());
        }
    };
    session.household.upsert_account(updated);
    session.save()?;

    session.log(
        LogEvent::new("credential_recovered")
            .with_command("recover")
            .with_target(account.id),
    );
    output::success("Password replaced; you can sign in again");
    Ok(())
}
