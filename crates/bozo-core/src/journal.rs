//! Journal entry domain model and write-time validation.
//!
//! A journal entry is a set of line items where every amount is positive
//! and the debit and credit totals agree exactly. Validation is pure and
//! runs before anything touches the database, so a rejected entry never
//! leaves partial state behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account;
use crate::error::{LedgerError, Result};

/// Which side of the ledger a line item lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    /// Stable lowercase text form, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Debit => "debit",
            Side::Credit => "credit",
        }
    }

    /// Parse the stored text form back into a side.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "debit" => Ok(Side::Debit),
            "credit" => Ok(Side::Credit),
            other => Err(LedgerError::Storage(format!("Invalid side '{}'", other))),
        }
    }
}

/// A single debit or credit against one account.
///
/// The amount is always the positive magnitude; direction is carried by
/// `side`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub account: String,
    pub side: Side,
    pub amount: Decimal,
}

/// A recorded journal entry with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub line_items: Vec<LineItem>,
}

impl JournalEntry {
    /// Sum of the entry's debit line items.
    pub fn debit_total(&self) -> Decimal {
        self.line_items
            .iter()
            .filter(|item| item.side == Side::Debit)
            .map(|item| item.amount)
            .sum()
    }
}

/// Builder for a journal entry that has not been persisted yet.
#[derive(Debug, Clone, Default)]
pub struct NewJournalEntry {
    pub description: String,
    pub line_items: Vec<LineItem>,
}

impl NewJournalEntry {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            line_items: Vec::new(),
        }
    }

    /// Add a debit line item.
    pub fn debit(self, account: impl Into<String>, amount: Decimal) -> Self {
        self.line(account, Side::Debit, amount)
    }

    /// Add a credit line item.
    pub fn credit(self, account: impl Into<String>, amount: Decimal) -> Self {
        self.line(account, Side::Credit, amount)
    }

    fn line(mut self, account: impl Into<String>, side: Side, amount: Decimal) -> Self {
        self.line_items.push(LineItem {
            account: account.into(),
            side,
            amount,
        });
        self
    }

    /// Two-line shorthand used by the `record` command: one signed amount
    /// against a debit account and a credit account.
    ///
    /// A negative amount swaps which account is debited; the line items
    /// always carry the positive magnitude.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidLineItem` for a zero amount.
    pub fn transfer(
        amount: Decimal,
        description: impl Into<String>,
        debit_account: impl Into<String>,
        credit_account: impl Into<String>,
    ) -> Result<Self> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidLineItem(
                "amount must be non-zero".to_string(),
            ));
        }
        let debit_account = debit_account.into();
        let credit_account = credit_account.into();
        let (debit_account, credit_account) = if amount.is_sign_negative() {
            (credit_account, debit_account)
        } else {
            (debit_account, credit_account)
        };
        Ok(Self::new(description)
            .debit(debit_account, amount.abs())
            .credit(credit_account, amount.abs()))
    }

    /// Validate the entry's invariants without touching storage.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidLineItem` when there are no line items, a
    ///   side has no line item, an amount is not strictly positive, or an
    ///   account name is malformed.
    /// - `LedgerError::Unbalanced` when the debit and credit totals
    ///   differ.
    pub fn validate(&self) -> Result<()> {
        if self.line_items.is_empty() {
            return Err(LedgerError::InvalidLineItem(
                "entry has no line items".to_string(),
            ));
        }

        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        for item in &self.line_items {
            account::validate_name(&item.account)?;
            if item.amount <= Decimal::ZERO {
                return Err(LedgerError::InvalidLineItem(format!(
                    "amount {} for account '{}' must be positive",
                    item.amount, item.account
                )));
            }
            match item.side {
                Side::Debit => debits += item.amount,
                Side::Credit => credits += item.amount,
            }
        }

        if !self.line_items.iter().any(|item| item.side == Side::Debit) {
            return Err(LedgerError::InvalidLineItem(
                "entry has no debit line item".to_string(),
            ));
        }
        if !self.line_items.iter().any(|item| item.side == Side::Credit) {
            return Err(LedgerError::InvalidLineItem(
                "entry has no credit line item".to_string(),
            ));
        }
        if debits != credits {
            return Err(LedgerError::Unbalanced { debits, credits });
        }
        Ok(())
    }
}
