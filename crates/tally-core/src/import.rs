//! Transaction file import (CSV and JSON)
//!
//! CSV files carry a header row naming the columns
//! `id,date,type,amount,category,description`; `category` and `description`
//! may be omitted. JSON files hold an array of transactions in the same shape
//! the engine serializes them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionType};

/// Supported transaction file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Column positions resolved from the header row
struct Columns {
    id: usize,
    date: usize,
    kind: usize,
    amount: usize,
    category: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::Import(format!("Missing column: {}", name)))
        };

        Ok(Self {
            id: require("id")?,
            date: require("date")?,
            kind: require("type")?,
            amount: require("amount")?,
            category: find("category"),
            description: find("description"),
        })
    }
}

/// Parse transactions from CSV
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result?;
        let tx = parse_record(&record, &columns)
            .map_err(|e| Error::Import(format!("Row {}: {}", row, e)))?;
        tx.validate()
            .map_err(|e| Error::Import(format!("Row {}: {}", row, e)))?;
        transactions.push(tx);
    }

    debug!(count = transactions.len(), "Parsed CSV transactions");
    Ok(transactions)
}

fn parse_record(record: &StringRecord, columns: &Columns) -> std::result::Result<Transaction, String> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("missing {}", name))
    };
    let optional = |idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let id_str = field(columns.id, "id")?;
    let id = id_str
        .parse::<i64>()
        .map_err(|_| format!("invalid id: {}", id_str))?;

    Ok(Transaction {
        id,
        date: parse_date(field(columns.date, "date")?)?,
        transaction_type: TransactionType::from_str(field(columns.kind, "type")?)?,
        amount: parse_amount(field(columns.amount, "amount")?)?,
        category: optional(columns.category),
        description: optional(columns.description).unwrap_or_default(),
    })
}

/// Parse a JSON array of transactions
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;

    for (i, tx) in transactions.iter().enumerate() {
        tx.validate()
            .map_err(|e| Error::Import(format!("Entry {}: {}", i + 1, e)))?;
    }

    debug!(count = transactions.len(), "Parsed JSON transactions");
    Ok(transactions)
}

/// Load a transaction file, choosing the parser by extension
pub fn load_file(path: &Path) -> Result<Vec<Transaction>> {
    let format = FileFormat::from_path(path)
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
    let reader = BufReader::new(File::open(path)?);

    match format {
        FileFormat::Csv => parse_csv(reader),
        FileFormat::Json => parse_json(reader),
    }
}

/// Parse a date or timestamp; date-only values land on midnight
fn parse_date(s: &str) -> std::result::Result<NaiveDateTime, String> {
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("unable to parse date: {}", s))
}

/// Parse an exact amount, ignoring currency symbols and thousands separators
fn parse_amount(s: &str) -> std::result::Result<Decimal, String> {
    let cleaned = s.replace(['$', ','], "");
    Decimal::from_str(cleaned.trim()).map_err(|_| format!("unable to parse amount: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
id,date,type,amount,category,description
1,2024-01-01,income,\"$3,200.00\",,Salary
2,2024-01-02 09:15:00,expense,1150,Housing,Rent
3,2024-01-09T18:30:00,Expense,45.10,Food & Dining,Groceries
";

    #[test]
    fn test_parse_csv() {
        let txs = parse_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(txs.len(), 3);

        assert_eq!(txs[0].amount, dec!(3200.00));
        assert!(txs[0].is_income());
        assert_eq!(txs[0].category, None);
        assert_eq!(txs[0].description, "Salary");
        assert_eq!(txs[0].date.format("%H:%M:%S").to_string(), "00:00:00");

        assert_eq!(txs[1].date.format("%H:%M").to_string(), "09:15");
        assert_eq!(txs[2].category.as_deref(), Some("Food & Dining"));
        assert!(txs[2].is_expense());
    }

    #[test]
    fn test_optional_columns_and_order() {
        let csv = "type,amount,date,id\nexpense,10,2024-02-01,9\n";
        let txs = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs[0].id, 9);
        assert_eq!(txs[0].description, "");
        assert_eq!(txs[0].category, None);
    }

    #[test]
    fn test_missing_column() {
        let err = parse_csv("id,date,amount\n1,2024-01-01,5\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Missing column: type"));
    }

    #[test]
    fn test_errors_name_the_row() {
        let csv = "id,date,type,amount\n1,2024-01-01,expense,5\n2,01/02/2024,expense,5\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Row 2"), "{}", err);
        assert!(err.to_string().contains("unable to parse date"));

        let csv = "id,date,type,amount\n1,2024-01-01,transfer,5\n";
        assert!(parse_csv(csv.as_bytes()).is_err());

        let csv = "id,date,type,amount\n1,2024-01-01,expense,abc\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let csv = "id,date,type,amount\n1,2024-01-01,expense,-5\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("negative amount"));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[
            {"id": 1, "amount": 12.5, "type": "expense", "category": "Food",
             "date": "2024-03-09T14:30:00", "description": "Lunch"},
            {"id": 2, "amount": 100, "type": "income", "date": "2024-03-10T00:00:00"}
        ]"#;
        let txs = parse_json(json.as_bytes()).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, dec!(12.5));
        assert_eq!(txs[1].category, None);
        assert_eq!(txs[1].description, "");
    }

    #[test]
    fn test_parse_json_validates() {
        let json = r#"[{"id": 1, "amount": -1, "type": "expense", "date": "2024-03-09T00:00:00"}]"#;
        let err = parse_json(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Entry 1"));
    }

    #[test]
    fn test_parse_csv_rejects_oversized_amount() {
        let csv = "id,date,type,amount\n1,2024-01-01,expense,\"5,000,000,000,000,000\"\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Row 1"));
        assert!(msg.contains("exceeds the maximum"));
    }

    #[test]
    fn test_load_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("home.CSV");
        std::fs::write(&csv_path, SAMPLE).unwrap();
        assert_eq!(load_file(&csv_path).unwrap().len(), 3);

        let txt_path = dir.path().join("home.txt");
        std::fs::write(&txt_path, SAMPLE).unwrap();
        assert!(matches!(
            load_file(&txt_path),
            Err(Error::UnsupportedFormat(_))
        ));

        assert!(matches!(
            load_file(&dir.path().join("missing.csv")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("0.10").unwrap(), dec!(0.10));
        assert!(parse_amount("twelve").is_err());
    }
}
