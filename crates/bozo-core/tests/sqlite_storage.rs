use std::path::PathBuf;

use rust_decimal::Decimal;
use tempfile::{tempdir, TempDir};

use bozo_core::journal::{NewJournalEntry, Side};
use bozo_core::money::parse_amount;
use bozo_core::storage::{EntryFilter, SqliteStorage, StorageEngine};
use bozo_core::LedgerError;

fn amount(text: &str) -> Decimal {
    parse_amount(text).expect("test amount should parse")
}

fn fresh_storage() -> (TempDir, PathBuf, SqliteStorage) {
    let dir = tempdir().expect("tempdir should be created");
    let path = dir.path().join("test.bozo");
    let storage = SqliteStorage::initialize(&path).expect("initialize should succeed");
    (dir, path, storage)
}

fn record(
    storage: &mut SqliteStorage,
    description: &str,
    debit: &str,
    credit: &str,
    value: &str,
) -> i64 {
    let entry = NewJournalEntry::new(description)
        .debit(debit, amount(value))
        .credit(credit, amount(value));
    storage.record_entry(&entry).expect("record should succeed")
}

#[test]
fn test_initialize_creates_file() {
    let (_dir, path, _storage) = fresh_storage();
    assert!(path.exists());
}

#[test]
fn test_initialize_twice_fails_and_preserves_data() {
    let (_dir, path, mut storage) = fresh_storage();
    record(&mut storage, "Salary", "assets:cash", "income:salary", "100.00");
    drop(storage);

    match SqliteStorage::initialize(&path) {
        Err(LedgerError::AlreadyExists(p)) => assert_eq!(p, path),
        other => panic!("expected AlreadyExists, got {:?}", other.map(|_| ())),
    }

    // Nothing was lost from the first initialization.
    let storage = SqliteStorage::open(&path).expect("open should succeed");
    let entries = storage.list_entries(&EntryFilter::new()).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_initialize_missing_folder_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-folder").join("test.bozo");
    assert!(matches!(
        SqliteStorage::initialize(&path),
        Err(LedgerError::Path(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nonexistent.bozo");
    match SqliteStorage::open(&path) {
        Err(LedgerError::NotInitialized(p)) => assert_eq!(p, path),
        other => panic!("expected NotInitialized, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_record_and_list_round_trip() {
    let (_dir, _path, mut storage) = fresh_storage();
    let entry = NewJournalEntry::new("Rent with deposit")
        .debit("expenses:rent", amount("900.00"))
        .debit("assets:deposit", amount("100.00"))
        .credit("assets:cash", amount("1000.00"));
    let id = storage.record_entry(&entry).unwrap();

    let entries = storage.list_entries(&EntryFilter::new()).unwrap();
    assert_eq!(entries.len(), 1);
    let listed = &entries[0];
    assert_eq!(listed.id, id);
    assert_eq!(listed.description, "Rent with deposit");
    assert_eq!(listed.line_items.len(), 3);
    assert_eq!(listed.line_items[0].account, "expenses:rent");
    assert_eq!(listed.line_items[0].side, Side::Debit);
    assert_eq!(listed.line_items[0].amount, amount("900.00"));
    assert_eq!(listed.line_items[2].account, "assets:cash");
    assert_eq!(listed.line_items[2].side, Side::Credit);
    assert_eq!(listed.line_items[2].amount, amount("1000.00"));
}

#[test]
fn test_get_entry_by_id() {
    let (_dir, _path, mut storage) = fresh_storage();
    let id = record(&mut storage, "Salary", "assets:cash", "income:salary", "50.00");

    let entry = storage.entry(id).unwrap().expect("entry should exist");
    assert_eq!(entry.description, "Salary");
    assert_eq!(entry.line_items.len(), 2);

    assert!(storage.entry(999).unwrap().is_none());
}

#[test]
fn test_unbalanced_entry_leaves_no_rows() {
    let (_dir, path, mut storage) = fresh_storage();
    let entry = NewJournalEntry::new("Unbalanced")
        .debit("assets:cash", amount("10.00"))
        .credit("income:salary", amount("9.99"));
    assert!(matches!(
        storage.record_entry(&entry),
        Err(LedgerError::Unbalanced { .. })
    ));

    assert!(storage.list_entries(&EntryFilter::new()).unwrap().is_empty());
    drop(storage);

    // Verify directly that no table gained a row, accounts included.
    let conn = rusqlite::Connection::open(&path).unwrap();
    for table in ["journal_entries", "line_items", "accounts"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 0, "table {} should be empty", table);
    }
}

#[test]
fn test_invalid_line_item_rejected_before_write() {
    let (_dir, _path, mut storage) = fresh_storage();
    let entry = NewJournalEntry::new("Zero amount")
        .debit("a", Decimal::ZERO)
        .credit("b", Decimal::ZERO);
    assert!(matches!(
        storage.record_entry(&entry),
        Err(LedgerError::InvalidLineItem(_))
    ));
    assert!(storage.list_entries(&EntryFilter::new()).unwrap().is_empty());
}

#[test]
fn test_history_is_immutable_at_the_database_level() {
    let (_dir, path, mut storage) = fresh_storage();
    let id = record(&mut storage, "Salary", "assets:cash", "income:salary", "50.00");
    drop(storage);

    // Raw statements against the file, bypassing the public API entirely.
    let conn = rusqlite::Connection::open(&path).unwrap();

    let attempts = [
        format!("UPDATE journal_entries SET description = 'hacked' WHERE id = {}", id),
        format!("DELETE FROM journal_entries WHERE id = {}", id),
        "UPDATE line_items SET amount = '999.99'".to_string(),
        "DELETE FROM line_items".to_string(),
    ];
    for sql in &attempts {
        let err = conn.execute(sql, []).expect_err("mutation should be rejected");
        assert!(
            err.to_string().contains("immutable"),
            "unexpected error for '{}': {}",
            sql,
            err
        );
        // The storage error taxonomy classifies the trigger abort.
        assert!(matches!(LedgerError::from(err), LedgerError::Immutable(_)));
    }

    // The row survived every attempt.
    let storage = SqliteStorage::open(&path).unwrap();
    let entry = storage.entry(id).unwrap().expect("entry should still exist");
    assert_eq!(entry.description, "Salary");
    assert_eq!(entry.line_items.len(), 2);
}

#[test]
fn test_account_created_once_per_name() {
    let (_dir, _path, mut storage) = fresh_storage();
    record(&mut storage, "One", "assets:cash", "income:salary", "10.00");
    record(&mut storage, "Two", "assets:cash", "income:salary", "20.00");

    let names: Vec<String> = storage
        .accounts(None)
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["assets", "assets:cash", "income", "income:salary"]);
}

#[test]
fn test_ancestor_chain_created_with_parents() {
    let (_dir, _path, mut storage) = fresh_storage();
    record(
        &mut storage,
        "Deposit",
        "assets:bank:checking",
        "income:salary",
        "100.00",
    );

    let accounts = storage.accounts(None).unwrap();
    let by_name: std::collections::HashMap<_, _> = accounts
        .into_iter()
        .map(|a| (a.name.clone(), a))
        .collect();

    assert!(by_name["assets"].parent_id.is_none());
    assert_eq!(by_name["assets:bank"].parent_id, Some(by_name["assets"].id));
    assert_eq!(
        by_name["assets:bank:checking"].parent_id,
        Some(by_name["assets:bank"].id)
    );
}

#[test]
fn test_account_kind_inferred_from_root() {
    let (_dir, _path, mut storage) = fresh_storage();
    record(&mut storage, "Loan", "assets:cash", "liabilities:loan", "100.00");
    record(&mut storage, "Freelance", "ledger", "income", "50.00");

    let accounts = storage.accounts(None).unwrap();
    let kind_of = |name: &str| {
        accounts
            .iter()
            .find(|a| a.name == name)
            .expect("account should exist")
            .kind
    };

    use bozo_core::account::AccountKind;
    assert_eq!(kind_of("assets"), Some(AccountKind::Asset));
    assert_eq!(kind_of("assets:cash"), Some(AccountKind::Asset));
    assert_eq!(kind_of("liabilities:loan"), Some(AccountKind::Liability));
    assert_eq!(kind_of("income"), Some(AccountKind::Income));
    // Unconventional roots are allowed; they just carry no kind.
    assert_eq!(kind_of("ledger"), None);

    let assets = storage.accounts(Some(AccountKind::Asset)).unwrap();
    assert_eq!(assets.len(), 2);
    assert!(assets.iter().all(|a| a.kind == Some(AccountKind::Asset)));
}

#[test]
fn test_balance_of_unknown_account_is_zero() {
    let (_dir, _path, storage) = fresh_storage();
    assert_eq!(storage.account_balance("nonexistent").unwrap(), Decimal::ZERO);
}

#[test]
fn test_freelance_scenario() {
    let (_dir, _path, mut storage) = fresh_storage();
    let entry =
        NewJournalEntry::transfer(amount("50.00"), "Freelance payment", "ledger", "income")
            .unwrap();
    storage.record_entry(&entry).unwrap();

    let entries = storage.list_entries(&EntryFilter::new()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line_items.len(), 2);

    // Net = debits - credits: the debited account is positive, the
    // credited (income) account negative.
    assert_eq!(storage.account_balance("ledger").unwrap(), amount("50.00"));
    assert_eq!(storage.account_balance("income").unwrap(), amount("-50.00"));
}

#[test]
fn test_signed_shorthand_swaps_sides() {
    let (_dir, _path, mut storage) = fresh_storage();
    let entry = NewJournalEntry::transfer(amount("-25.50"), "Groceries", "ledger", "food").unwrap();
    storage.record_entry(&entry).unwrap();

    let entries = storage.list_entries(&EntryFilter::new()).unwrap();
    let items = &entries[0].line_items;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.amount == amount("25.50")));
    assert_eq!(items[0].account, "food");
    assert_eq!(items[0].side, Side::Debit);
    assert_eq!(items[1].account, "ledger");
    assert_eq!(items[1].side, Side::Credit);
}

#[test]
fn test_trial_balance() {
    let (_dir, _path, mut storage) = fresh_storage();
    record(&mut storage, "Salary", "assets:cash", "income:salary", "1000.00");
    record(&mut storage, "Groceries", "expenses:food", "assets:cash", "50.00");
    record(&mut storage, "Utilities", "expenses:utilities", "assets:cash", "100.00");

    let totals = storage.trial_balance(None).unwrap();
    let row = |name: &str| {
        totals
            .iter()
            .find(|t| t.account == name)
            .expect("account should appear in trial balance")
    };

    assert_eq!(row("assets:cash").debits, amount("1000.00"));
    assert_eq!(row("assets:cash").credits, amount("150.00"));
    assert_eq!(row("assets:cash").net, amount("850.00"));
    assert_eq!(row("expenses:food").net, amount("50.00"));
    assert_eq!(row("income:salary").net, amount("-1000.00"));

    // Double entry holds in aggregate: total debits equal total credits.
    let total_debits: Decimal = totals.iter().map(|t| t.debits).sum();
    let total_credits: Decimal = totals.iter().map(|t| t.credits).sum();
    assert_eq!(total_debits, total_credits);

    // Sorted by account name.
    let names: Vec<&str> = totals.iter().map(|t| t.account.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_trial_balance_scoped_to_subtree() {
    let (_dir, _path, mut storage) = fresh_storage();
    record(&mut storage, "Salary", "assets:cash", "income:salary", "1000.00");
    record(&mut storage, "Groceries", "expenses:food", "assets:cash", "50.00");

    let totals = storage.trial_balance(Some("expenses")).unwrap();
    let names: Vec<&str> = totals.iter().map(|t| t.account.as_str()).collect();
    assert_eq!(names, vec!["expenses:food"]);
}

#[test]
fn test_list_filtered_by_account_subtree() {
    let (_dir, _path, mut storage) = fresh_storage();
    record(&mut storage, "Salary", "assets:bank:checking", "income:salary", "1000.00");
    record(&mut storage, "Groceries", "expenses:food", "assets:bank:checking", "30.00");
    record(&mut storage, "Petty cash", "assets:cash", "assets:bank:checking", "50.00");

    let all_assets = storage
        .list_entries(&EntryFilter::new().account("assets"))
        .unwrap();
    assert_eq!(all_assets.len(), 3);

    let bank = storage
        .list_entries(&EntryFilter::new().account("assets:bank"))
        .unwrap();
    assert_eq!(bank.len(), 3);

    // Exact match only for the petty cash entry.
    let cash = storage
        .list_entries(&EntryFilter::new().account("assets:cash"))
        .unwrap();
    assert_eq!(cash.len(), 1);
    assert_eq!(cash[0].description, "Petty cash");

    let none = storage
        .list_entries(&EntryFilter::new().account("nonexistent"))
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_list_insertion_order_and_limit() {
    let (_dir, _path, mut storage) = fresh_storage();
    record(&mut storage, "First", "a", "b", "1.00");
    record(&mut storage, "Second", "a", "b", "2.00");
    record(&mut storage, "Third", "a", "b", "3.00");

    let entries = storage.list_entries(&EntryFilter::new()).unwrap();
    let descriptions: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["First", "Second", "Third"]);

    // Timestamps never decrease in insertion order.
    for pair in entries.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }

    let limited = storage
        .list_entries(&EntryFilter::new().limit(2))
        .unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].description, "First");
}

#[test]
fn test_reopen_preserves_entries_and_amount_text() {
    let (_dir, path, mut storage) = fresh_storage();
    record(&mut storage, "Salary", "assets:cash", "income:salary", "1234.56");
    drop(storage);

    let storage = SqliteStorage::open(&path).unwrap();
    let entries = storage.list_entries(&EntryFilter::new()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line_items[0].amount, amount("1234.56"));
    drop(storage);

    // The stored text is the canonical decimal form, auditable by any
    // SQLite client.
    let conn = rusqlite::Connection::open(&path).unwrap();
    let stored: String = conn
        .query_row("SELECT amount FROM line_items ORDER BY id LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(stored, "1234.56");
}
