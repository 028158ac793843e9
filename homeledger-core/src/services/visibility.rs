//! Visibility filter - what one viewer sees of the household's records
//!
//! Records owned outside the viewer's family context are dropped. Records the
//! viewer may not see in detail are kept but masked: the amount becomes zero
//! and `is_masked` is set, so shared activity stays visible without its size.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{shares_family_context, Account, FinancialRecord, MaskedRecord, RecordKind};

use super::permission::{authorize, Action, Decision, DenialReason};

/// Records as seen by one viewer, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityView {
    pub records: Vec<MaskedRecord>,
}

/// Totals over the unmasked part of a [`VisibilityView`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibilitySummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Totals are partial when true
    pub any_masked: bool,
    pub visible_count: usize,
    pub masked_count: usize,
}

impl VisibilityView {
    pub fn any_masked(&self) -> bool {
        self.records.iter().any(|r| r.is_masked)
    }

    /// Sum only what the viewer is allowed to see
    pub fn summary(&self) -> VisibilitySummary {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        let mut masked_count = 0;

        for entry in &self.records {
            if entry.is_masked {
                masked_count += 1;
                continue;
            }
            match entry.record.kind {
                RecordKind::Income => total_income += entry.record.amount,
                RecordKind::Expense => total_expense += entry.record.amount,
            }
        }

        VisibilitySummary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            any_masked: masked_count > 0,
            visible_count: self.records.len() - masked_count,
            masked_count,
        }
    }

    /// Drop the per-viewer flag, e.g. to filter again for another viewer
    pub fn into_records(self) -> Vec<FinancialRecord> {
        self.records.into_iter().map(MaskedRecord::into_record).collect()
    }
}

/// Apply the visibility policy to `records` for `actor`.
///
/// `roster` must contain the owner of every record; an owner missing from
/// the snapshot is reported as `UnknownAccount`.
pub fn filter_visibility(
    records: &[FinancialRecord],
    actor: &Account,
    roster: &[Account],
) -> Result<VisibilityView> {
    filter_visibility_for(records, actor, roster, None)
}

/// Like [`filter_visibility`], narrowed to the selected owners.
///
/// Selection is applied after the family partition, so selecting an account
/// from another family never brings its records back.
pub fn filter_visibility_for(
    records: &[FinancialRecord],
    actor: &Account,
    roster: &[Account],
    selection: Option<&[Uuid]>,
) -> Result<VisibilityView> {
    let owners: HashMap<Uuid, &Account> = roster
        .iter()
        .map(|a| (a.id, a))
        .chain(std::iter::once((actor.id, actor)))
        .collect();

    let mut visible = Vec::with_capacity(records.len());
    for record in records {
        let owner = owners
            .get(&record.user_id)
            .copied()
            .ok_or(Error::UnknownAccount(record.user_id))?;

        if !shares_family_context(actor, owner) {
            continue;
        }
        if let Some(selected) = selection {
            if !selected.contains(&owner.id) {
                continue;
            }
        }

        let entry = match authorize(actor, owner, Action::ViewFinancials)? {
            Decision::Allowed => MaskedRecord::visible(record.clone()),
            Decision::Denied(_) => MaskedRecord::masked(record.clone()),
        };
        visible.push(entry);
    }

    Ok(VisibilityView { records: visible })
}

/// Records are edited by their owner only
pub fn can_edit_record(actor: &Account, record: &FinancialRecord) -> Decision {
    if record.user_id == actor.id {
        Decision::Allowed
    } else {
        Decision::Denied(DenialReason::NotRecordOwner)
    }
}
