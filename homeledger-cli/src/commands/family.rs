//! Family command - the actor's view of household records

use anyhow::Result;
use colored::Colorize;
use homeledger_core::services::filter_visibility_for;
use homeledger_core::{LogEvent, RecordKind};
use uuid::Uuid;

use super::Session;
use crate::output;

pub fn run(acting: Option<&str>, members: Vec<String>, json: bool) -> Result<()> {
    let session = Session::open()?;
    let actor = session.sign_in(acting)?;

    let selection: Option<Vec<Uuid>> = if members.is_empty() {
        None
    } else {
        Some(
            members
                .iter()
                .map(|m| session.household.account(m).map(|a| a.id))
                .collect::<Result<Vec<_>>>()?,
        )
    };

    let mut view = session.check(
        "family",
        &actor,
        filter_visibility_for(
            &session.household.records,
            &actor,
            &session.household.accounts,
            selection.as_deref(),
        ),
    )?;
    view.records.sort_by(|a, b| b.record.date.cmp(&a.record.date));
    let summary = view.summary();

    session.log(
        LogEvent::new("family_viewed")
            .with_command("family")
            .with_actor(actor.id)
            .with_outcome(format!("masked:{}", summary.masked_count)),
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "records": view.records,
                "summary": summary,
            }))?
        );
        return Ok(());
    }

    if view.records.is_empty() {
        println!("No records visible.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Date", "Owner", "Kind", "Category", "Description", "Amount"]);
    for entry in &view.records {
        let record = &entry.record;
        let owner = session
            .household
            .account_by_id(record.user_id)
            .map(|a| a.username.clone())
            .unwrap_or_else(|| record.user_id.to_string());
        let kind = match record.kind {
            RecordKind::Income => "income".green().to_string(),
            RecordKind::Expense => "expense".red().to_string(),
        };
        table.add_row(vec![
            record.date.to_string(),
            owner,
            kind,
            record.category.clone(),
            record.description.clone(),
            output::format_amount(record.amount, entry.is_masked),
        ]);
    }
    println!("{}", table);

    println!();
    println!("  Income:  {}", output::format_amount(summary.total_income, false));
    println!("  Expense: {}", output::format_amount(summary.total_expense, false));
    println!("  Balance: {}", output::format_amount(summary.balance, false).bold());
    if summary.any_masked {
        output::warning(&format!(
            "  {} record(s) hidden by member privacy settings; totals are partial.",
            summary.masked_count
        ));
    }
    Ok(())
}
