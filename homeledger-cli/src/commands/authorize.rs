//! Authorize command - ask the policy whether an action is allowed

use anyhow::Result;
use homeledger_core::{authorize, Action, LogEvent};

use super::Session;
use crate::output;

pub fn run(acting: Option<&str>, target: &str, actions: Vec<Action>, json: bool) -> Result<()> {
    let session = Session::open()?;
    let actor = session.sign_in(acting)?;
    let target = session.household.account(target)?;

    let actions = if actions.is_empty() { Action::ALL.to_vec() } else { actions };

    let mut decisions = Vec::with_capacity(actions.len());
    for action in actions {
        let decision = session.check("authorize", &actor, authorize(&actor, target, action))?;
        session.log(
            LogEvent::decision(action, actor.id, target.id, decision).with_command("authorize"),
        );
        decisions.push((action, decision));
    }

    if json {
        let rows: Vec<serde_json::Value> = decisions
            .iter()
            .map(|(action, decision)| {
                serde_json::json!({
                    "action": action,
                    "allowed": decision.is_allowed(),
                    "reason": decision.reason(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Action", "Decision"]);
    for (action, decision) in &decisions {
        table.add_row(vec![action.to_string(), output::decision_label(decision)]);
    }
    println!("{} → {}", actor.username, target.username);
    println!("{}", table);
    Ok(())
}
