//! Output formatting helpers for the CLI.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::Decimal;

use bozo_core::account::{self, Account};
use bozo_core::journal::{JournalEntry, Side};
use bozo_core::storage::AccountTotals;

/// Fixed two-place money formatting for display. Storage keeps the exact
/// canonical text; this is presentation only.
pub fn money(amount: &Decimal) -> String {
    let mut value = *amount;
    value.rescale(2);
    value.to_string()
}

fn new_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn money_cell(amount: &Decimal) -> Cell {
    Cell::new(money(amount)).set_alignment(CellAlignment::Right)
}

/// Indented label for hierarchical account names.
fn account_label(name: &str) -> String {
    format!(
        "{}{}",
        "  ".repeat(account::depth(name)),
        account::leaf_segment(name)
    )
}

pub fn print_entry_table(entries: &[JournalEntry]) {
    let mut table = new_table(vec![
        "ID",
        "Date",
        "Description",
        "Debit Acct",
        "Credit Acct",
        "Amount",
    ]);
    for entry in entries {
        let debit = entry
            .line_items
            .iter()
            .find(|item| item.side == Side::Debit);
        let credit = entry
            .line_items
            .iter()
            .find(|item| item.side == Side::Credit);
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(entry.created_at.format("%Y-%m-%d")),
            Cell::new(&entry.description),
            Cell::new(debit.map(|item| item.account.as_str()).unwrap_or("")),
            Cell::new(credit.map(|item| item.account.as_str()).unwrap_or("")),
            money_cell(&entry.debit_total()),
        ]);
    }
    println!("{table}");
}

pub fn print_trial_balance(totals: &[AccountTotals]) {
    let mut table = new_table(vec!["Account", "Debits", "Credits", "Net"]);
    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;
    for row in totals {
        table.add_row(vec![
            Cell::new(account_label(&row.account)),
            money_cell(&row.debits),
            money_cell(&row.credits),
            money_cell(&row.net),
        ]);
        total_debits += row.debits;
        total_credits += row.credits;
    }
    table.add_row(vec![
        Cell::new("TOTAL"),
        money_cell(&total_debits),
        money_cell(&total_credits),
        money_cell(&(total_debits - total_credits)),
    ]);
    println!("{table}");
}

pub fn print_account_table(accounts: &[Account]) {
    let mut table = new_table(vec!["Account", "Kind"]);
    for acct in accounts {
        table.add_row(vec![
            Cell::new(account_label(&acct.name)),
            Cell::new(acct.kind.map(|k| k.as_str()).unwrap_or("-")),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_pads_to_two_places() {
        assert_eq!(money(&Decimal::from(50)), "50.00");
        assert_eq!(money(&Decimal::new(255, 1)), "25.50");
        assert_eq!(money(&Decimal::from(-50)), "-50.00");
    }

    #[test]
    fn test_account_label_indents_by_depth() {
        assert_eq!(account_label("assets"), "assets");
        assert_eq!(account_label("assets:bank"), "  bank");
        assert_eq!(account_label("assets:bank:checking"), "    checking");
    }
}
