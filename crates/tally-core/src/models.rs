//! Domain models for Tally

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category label used when a transaction has no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Largest accepted amount (one quadrillion). Keeps every total over a
/// realistic history well inside `Decimal` range.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000_000, 0)
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dated, typed money movement on one account.
///
/// Owned by the storage layer; the analytics engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Always non-negative; direction comes from `transaction_type`
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category name, `None` means uncategorized
    #[serde(default)]
    pub category: Option<String>,
    /// Timestamp in the account's (fixed) local time
    pub date: NaiveDateTime,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Category name used for grouping
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Calendar month key, e.g. "2024-03"
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.amount < Decimal::ZERO {
            return Err(format!(
                "transaction {} has negative amount {}",
                self.id, self.amount
            ));
        }
        if self.amount > max_amount() {
            return Err(format!(
                "transaction {} amount {} exceeds the maximum of {}",
                self.id,
                self.amount,
                max_amount()
            ));
        }
        if matches!(self.category.as_deref(), Some(c) if c.trim().is_empty()) {
            return Err(format!(
                "transaction {} has an empty category (use none instead)",
                self.id
            ));
        }
        Ok(())
    }
}
