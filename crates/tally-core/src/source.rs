//! Transaction sources
//!
//! The engine never fetches data itself. Callers take a point-in-time
//! snapshot from a `TransactionSource` and hand the owned list to
//! `BudgetEngine`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::import::{load_file, FileFormat};
use crate::models::Transaction;

/// Supplies per-account transaction snapshots
pub trait TransactionSource: Send + Sync {
    /// Known account names, sorted
    fn accounts(&self) -> Vec<String>;

    /// Owned copy of an account's transactions
    fn snapshot(&self, account: &str) -> Result<Vec<Transaction>>;
}

/// In-memory accounts guarded by a read/write lock.
///
/// Replacing an account swaps its whole list under the write lock, so a
/// snapshot sees either the old list or the new one.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: RwLock<BTreeMap<String, Vec<Transaction>>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace an account's transactions, rejecting the batch on the first
    /// invalid transaction
    pub fn insert_account(&self, name: &str, transactions: Vec<Transaction>) -> Result<()> {
        for tx in &transactions {
            tx.validate()
                .map_err(|e| Error::InvalidData(format!("account {}: {}", name, e)))?;
        }

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| Error::InvalidData("ledger lock poisoned".into()))?;
        debug!(account = name, count = transactions.len(), "Replacing account");
        accounts.insert(name.to_string(), transactions);
        Ok(())
    }

    /// Load every `*.csv` / `*.json` file in `dir` as an account named
    /// after the file stem
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let ledger = Self::new();

        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && FileFormat::from_path(p).is_some())
            .collect();
        paths.sort();

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let transactions = load_file(&path)?;
            ledger.insert_account(name, transactions)?;
        }

        info!(
            dir = %dir.display(),
            accounts = ledger.len(),
            "Loaded transaction ledger"
        );
        Ok(ledger)
    }

    pub fn len(&self) -> usize {
        self.accounts.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionSource for Ledger {
    fn accounts(&self) -> Vec<String> {
        self.accounts
            .read()
            .map(|a| a.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn snapshot(&self, account: &str) -> Result<Vec<Transaction>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| Error::InvalidData("ledger lock poisoned".into()))?;
        accounts
            .get(account)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("account {}", account)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, sample_history};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_insert_and_snapshot() {
        let ledger = Ledger::new();
        ledger.insert_account("home", sample_history()).unwrap();

        assert_eq!(ledger.accounts(), vec!["home"]);
        assert_eq!(ledger.snapshot("home").unwrap().len(), 20);
        assert!(matches!(ledger.snapshot("work"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_invalid_batch_rejected() {
        let ledger = Ledger::new();
        ledger
            .insert_account("home", vec![expense(1, "5", None, "2024-01-01")])
            .unwrap();

        let bad = vec![
            expense(2, "5", None, "2024-01-01"),
            expense(3, "-5", None, "2024-01-01"),
        ];
        assert!(ledger.insert_account("home", bad).is_err());
        // Previous contents survive
        assert_eq!(ledger.snapshot("home").unwrap().len(), 1);
    }

    #[test]
    fn test_oversized_amount_rejected() {
        let ledger = Ledger::new();
        let err = ledger
            .insert_account(
                "home",
                vec![expense(1, "1000000000000000000000", None, "2024-01-01")],
            )
            .unwrap_err();

        assert!(matches!(err, Error::InvalidData(ref msg) if msg.contains("exceeds the maximum")));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let ledger = Ledger::new();
        ledger.insert_account("home", sample_history()).unwrap();

        let before = ledger.snapshot("home").unwrap();
        ledger.insert_account("home", Vec::new()).unwrap();

        assert_eq!(before.len(), 20);
        assert!(ledger.snapshot("home").unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_snapshots_never_torn() {
        let ledger = Arc::new(Ledger::new());
        let small = vec![expense(1, "1", None, "2024-01-01")];
        ledger.insert_account("home", small.clone()).unwrap();

        let writer = {
            let ledger = Arc::clone(&ledger);
            let small = small.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let txs = if i % 2 == 0 { sample_history() } else { small.clone() };
                    ledger.insert_account("home", txs).unwrap();
                }
            })
        };

        for _ in 0..200 {
            let len = ledger.snapshot("home").unwrap().len();
            assert!(len == 1 || len == 20);
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("household.csv"),
            "id,date,type,amount,category\n1,2024-01-01,expense,10,Food\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("travel.json"),
            r#"[{"id": 1, "amount": 99, "type": "expense", "date": "2024-02-01T08:00:00"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let ledger = Ledger::load_dir(dir.path()).unwrap();
        assert_eq!(ledger.accounts(), vec!["household", "travel"]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.snapshot("travel").unwrap()[0].id, 1);
    }

    #[test]
    fn test_load_dir_bad_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.csv"), "id,date\n1,2024-01-01\n").unwrap();
        assert!(Ledger::load_dir(dir.path()).is_err());
    }
}
