//! Financial record domain model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Income,
    Expense,
}

/// Repetition of a recurring record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

/// A single income or expense entry owned by one account.
///
/// The owning family is derived from `user_id`; it is never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: Uuid,
    /// Owning account
    pub user_id: Uuid,
    pub kind: RecordKind,
    /// Always non-negative; `kind` carries the sign
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
}

impl FinancialRecord {
    pub fn new(
        user_id: Uuid,
        kind: RecordKind,
        amount: Decimal,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            amount,
            description: description.into(),
            category: String::new(),
            date,
            is_recurring: false,
            frequency: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn recurring(mut self, frequency: Frequency) -> Self {
        self.is_recurring = true;
        self.frequency = Some(frequency);
        self
    }

    /// Signed contribution to a balance
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            RecordKind::Income => self.amount,
            RecordKind::Expense => -self.amount,
        }
    }
}

/// A record as seen by one particular viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedRecord {
    #[serde(flatten)]
    pub record: FinancialRecord,
    /// Computed per viewing context, never persisted
    pub is_masked: bool,
}

impl MaskedRecord {
    /// Record shown as-is
    pub fn visible(record: FinancialRecord) -> Self {
        Self {
            record,
            is_masked: false,
        }
    }

    /// Record with its amount replaced by the zero sentinel.
    /// Description, date and category stay visible.
    pub fn masked(mut record: FinancialRecord) -> Self {
        record.amount = Decimal::ZERO;
        Self {
            record,
            is_masked: true,
        }
    }

    pub fn into_record(self) -> FinancialRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: RecordKind, cents: i64) -> FinancialRecord {
        FinancialRecord::new(
            Uuid::new_v4(),
            kind,
            Decimal::new(cents, 2),
            "Supermarket",
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        )
        .with_category("Food")
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(record(RecordKind::Income, 1000).signed_amount(), Decimal::new(1000, 2));
        assert_eq!(record(RecordKind::Expense, 1000).signed_amount(), Decimal::new(-1000, 2));
    }

    #[test]
    fn test_masking_keeps_metadata() {
        let original = record(RecordKind::Expense, 4599);
        let masked = MaskedRecord::masked(original.clone());

        assert!(masked.is_masked);
        assert_eq!(masked.record.amount, Decimal::ZERO);
        assert_eq!(masked.record.description, original.description);
        assert_eq!(masked.record.category, original.category);
        assert_eq!(masked.record.date, original.date);
    }

    #[test]
    fn test_masked_record_serializes_flat() {
        let masked = MaskedRecord::masked(record(RecordKind::Income, 100));
        let json = serde_json::to_value(&masked).unwrap();
        assert_eq!(json["isMasked"], serde_json::json!(true));
        assert_eq!(json["description"], serde_json::json!("Supermarket"));
        assert_eq!(json["kind"], serde_json::json!("INCOME"));
    }
}
