//! Account naming, hierarchy, and kind inference.
//!
//! Account names are case-sensitive, colon-separated paths
//! (`assets:bank:checking`). Accounts come into existence the first time an
//! entry references them; there is no explicit create operation.

use serde::Serialize;

use crate::error::{LedgerError, Result};

/// Broad accounting category inferred from an account's root segment.
///
/// Inference is best-effort: unrecognized roots are allowed and simply
/// carry no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    Liability,
    Income,
    Expense,
    Capital,
    Drawings,
}

impl AccountKind {
    /// Stable lowercase text form, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Asset => "asset",
            AccountKind::Liability => "liability",
            AccountKind::Income => "income",
            AccountKind::Expense => "expense",
            AccountKind::Capital => "capital",
            AccountKind::Drawings => "drawings",
        }
    }

    /// Parse a kind name (e.g. a CLI filter value).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Parse` for an unknown kind.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "asset" => Ok(AccountKind::Asset),
            "liability" => Ok(AccountKind::Liability),
            "income" => Ok(AccountKind::Income),
            "expense" => Ok(AccountKind::Expense),
            "capital" => Ok(AccountKind::Capital),
            "drawings" => Ok(AccountKind::Drawings),
            other => Err(LedgerError::Parse(format!(
                "unknown account kind '{}' (expected asset, liability, income, expense, capital, or drawings)",
                other
            ))),
        }
    }

    /// Infer the kind from the root segment of an account path, if the
    /// root is one of the conventional names (singular or plural).
    pub fn from_root(segment: &str) -> Option<Self> {
        match segment.to_ascii_lowercase().as_str() {
            "asset" | "assets" => Some(AccountKind::Asset),
            "liability" | "liabilities" => Some(AccountKind::Liability),
            "income" => Some(AccountKind::Income),
            "expense" | "expenses" => Some(AccountKind::Expense),
            "capital" => Some(AccountKind::Capital),
            "drawings" => Some(AccountKind::Drawings),
            _ => None,
        }
    }
}

/// A row in the chart of accounts.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: Option<AccountKind>,
    pub parent_id: Option<i64>,
}

/// Validate an account name: non-empty, with no empty `:` segments.
///
/// # Errors
///
/// Returns `LedgerError::InvalidLineItem` describing the offending name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LedgerError::InvalidLineItem(
            "account name is empty".to_string(),
        ));
    }
    if name.split(':').any(|segment| segment.is_empty()) {
        return Err(LedgerError::InvalidLineItem(format!(
            "account name '{}' has an empty segment",
            name
        )));
    }
    Ok(())
}

/// Every path from the root of `name` down to `name` itself, shortest
/// first: `"a:b:c"` yields `["a", "a:b", "a:b:c"]`.
pub fn ancestry(name: &str) -> Vec<String> {
    let segments: Vec<&str> = name.split(':').collect();
    (1..=segments.len())
        .map(|depth| segments[..depth].join(":"))
        .collect()
}

/// Root segment of an account path.
pub fn root_segment(name: &str) -> &str {
    name.split(':').next().unwrap_or(name)
}

/// Nesting depth of an account path (0 for a root account).
pub fn depth(name: &str) -> usize {
    name.matches(':').count()
}

/// Last path segment, used for indented tree display.
pub fn leaf_segment(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}
