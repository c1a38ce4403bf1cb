//! Test utilities for tally-core
//!
//! Transaction builders and shared data sets used by unit tests, the
//! integration tests and the downstream CLI/server crates.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionType};

fn build(
    id: i64,
    transaction_type: TransactionType,
    amount: &str,
    category: Option<&str>,
    date: &str,
    description: &str,
) -> Transaction {
    Transaction {
        id,
        amount: Decimal::from_str(amount).unwrap(),
        transaction_type,
        category: category.map(str::to_string),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        description: description.to_string(),
    }
}

/// Expense on `date` ("YYYY-MM-DD", midnight)
pub fn expense(id: i64, amount: &str, category: Option<&str>, date: &str) -> Transaction {
    build(id, TransactionType::Expense, amount, category, date, "")
}

/// Expense with a description
pub fn expense_with(
    id: i64,
    amount: &str,
    category: &str,
    date: &str,
    description: &str,
) -> Transaction {
    build(
        id,
        TransactionType::Expense,
        amount,
        Some(category),
        date,
        description,
    )
}

/// Uncategorized income on `date`
pub fn income(id: i64, amount: &str, date: &str) -> Transaction {
    build(id, TransactionType::Income, amount, None, date, "Salary")
}

/// Four months (Jan-Apr 2024) of salary, rent, groceries and fuel
pub fn sample_history() -> Vec<Transaction> {
    let months = [
        (1, "310.40", "45.00", "22.50"),
        (2, "295.10", "52.30", "18.00"),
        (3, "342.75", "48.90", "31.25"),
        (4, "330.00", "61.20", "27.80"),
    ];

    let mut txs = Vec::new();
    for (month, groceries, fuel, coffee) in months {
        let base = month as i64 * 10;
        let day = |d: u32| format!("2024-{:02}-{:02}", month, d);

        txs.push(income(base + 1, "3200.00", &day(1)));
        txs.push(expense_with(base + 2, "1150.00", "Housing", &day(2), "Rent"));
        txs.push(expense_with(
            base + 3,
            groceries,
            "Food & Dining",
            &day(9),
            "Weekly groceries",
        ));
        txs.push(expense_with(base + 4, fuel, "Transportation", &day(14), "Gas"));
        txs.push(expense_with(
            base + 5,
            coffee,
            "Food & Dining",
            &day(20),
            "Coffee and breakfast",
        ));
    }
    txs
}

/// One salary and nineteen categorized expenses, including a 500 shopping
/// spree and a 1200 flight among otherwise small amounts
pub fn outlier_scenario() -> Vec<Transaction> {
    let expenses = [
        ("30.50", "Food & Dining", "Coffee and breakfast"),
        ("45.00", "Food & Dining", "Lunch at restaurant"),
        ("55.75", "Food & Dining", "Dinner"),
        ("120.00", "Food & Dining", "Groceries"),
        ("200.00", "Food & Dining", "Weekly groceries"),
        ("15.00", "Transportation", "Gas"),
        ("12.50", "Transportation", "Parking"),
        ("35.00", "Transportation", "Uber ride"),
        ("50.00", "Transportation", "Gas fill-up"),
        ("15.99", "Entertainment", "Netflix subscription"),
        ("20.00", "Entertainment", "Movie tickets"),
        ("50.00", "Entertainment", "Concert ticket"),
        ("75.00", "Shopping", "Clothes shopping"),
        ("40.00", "Shopping", "Books"),
        ("150.00", "Shopping", "Electronics"),
        ("500.00", "Shopping", "Black Friday purchase"),
        ("80.00", "Utilities", "Internet bill"),
        ("45.00", "Utilities", "Electricity"),
        ("1200.00", "Transportation", "Flight ticket"),
    ];

    let start = NaiveDate::from_ymd_opt(2024, 6, 29).unwrap();
    let mut txs = vec![income(1, "2500.00", "2024-06-30")];
    for (i, (amount, category, description)) in expenses.iter().enumerate() {
        let date = start - chrono::Duration::days(i as i64);
        txs.push(expense_with(
            i as i64 + 2,
            amount,
            category,
            &date.format("%Y-%m-%d").to_string(),
            description,
        ));
    }
    txs
}
