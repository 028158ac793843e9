//! Record commands - add and remove the actor's own income and expenses

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Subcommand, ValueEnum};
use homeledger_core::domain::Frequency;
use homeledger_core::services::can_edit_record;
use homeledger_core::{FinancialRecord, LogEvent, RecordKind};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Session;
use crate::output;

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for RecordKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => RecordKind::Income,
            KindArg::Expense => RecordKind::Expense,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Weekly,
    Monthly,
    Yearly,
}

impl From<FrequencyArg> for Frequency {
    fn from(frequency: FrequencyArg) -> Self {
        match frequency {
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
            FrequencyArg::Yearly => Frequency::Yearly,
        }
    }
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// Add an income or expense owned by the acting account
    Add {
        /// Income or expense
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Amount, always positive
        #[arg(long)]
        amount: Decimal,
        /// What the money was for
        #[arg(long)]
        description: String,
        /// Category label
        #[arg(long, default_value = "")]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Mark as recurring with the given frequency
        #[arg(long, value_enum)]
        every: Option<FrequencyArg>,
    },
    /// Remove one of the acting account's records
    Remove {
        /// Record ID
        id: String,
    },
}

pub fn run(acting: Option<&str>, command: RecordCommands) -> Result<()> {
    match command {
        RecordCommands::Add {
            kind,
            amount,
            description,
            category,
            date,
            every,
        } => add(
            acting,
            kind.into(),
            amount,
            description,
            category,
            date,
            every.map(Into::into),
        ),
        RecordCommands::Remove { id } => remove(acting, &id),
    }
}

fn add(
    acting: Option<&str>,
    kind: RecordKind,
    amount: Decimal,
    description: String,
    category: String,
    date: Option<NaiveDate>,
    frequency: Option<Frequency>,
) -> Result<()> {
    if amount.is_sign_negative() || amount.is_zero() {
        bail!("Amount must be positive; use --kind to record an expense");
    }
    if description.trim().is_empty() {
        bail!("Description cannot be empty");
    }

    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let mut record = FinancialRecord::new(actor.id, kind, amount, description.trim(), date)
        .with_category(category.trim());
    if let Some(frequency) = frequency {
        record = record.recurring(frequency);
    }
    let id = record.id;
    session.household.records.push(record);
    session.save()?;

    session.log(
        LogEvent::new("record_added")
            .with_command("record add")
            .with_actor(actor.id),
    );
    output::success(&format!("Record {} added", id));
    Ok(())
}

fn remove(acting: Option<&str>, id: &str) -> Result<()> {
    let id = Uuid::parse_str(id).with_context(|| format!("Invalid record ID: {}", id))?;

    let mut session = Session::open()?;
    let actor = session.sign_in(acting)?;

    let record = session
        .household
        .records
        .iter()
        .find(|r| r.id == id)
        .with_context(|| format!("No record with ID {}", id))?;

    let decision = can_edit_record(&actor, record);
    session.log(
        LogEvent::new("record_edit_checked")
            .with_command("record remove")
            .with_actor(actor.id)
            .with_target(record.user_id)
            .with_outcome(if decision.is_allowed() { "allowed" } else { "denied" }),
    );
    session.check("record remove", &actor, decision.into_result())?;

    session.household.remove_record(id);
    session.save()?;
    output::success(&format!("Record {} removed", id));
    Ok(())
}
