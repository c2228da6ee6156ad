//! Transaction storage
//!
//! The forecast and report code only ever reads transactions through
//! [`TransactionStore::list`]. Two backends are provided:
//! - [`MemoryStore`] - in-process, used by tests and the API server
//! - [`JsonFileStore`] - a JSON array on disk, the CLI's default

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

/// Read access to the transaction collection
pub trait TransactionStore {
    /// All transactions, in store order
    fn list(&self) -> Result<Vec<Transaction>>;

    /// Look up a single transaction by id
    fn get(&self, id: &str) -> Result<Option<Transaction>> {
        Ok(self.list()?.into_iter().find(|tx| tx.id == id))
    }
}

/// Write access, for the CRUD surfaces (CLI, API)
pub trait TransactionWriter: TransactionStore {
    /// Add a transaction, assigning it a fresh id
    fn add(&self, tx: NewTransaction) -> Result<Transaction>;

    /// Insert with its existing id. Fails with [`Error::Duplicate`] if the id
    /// is already taken.
    fn insert(&self, tx: Transaction) -> Result<Transaction>;

    /// Insert a batch with existing ids in a single write.
    ///
    /// Every row is validated before anything is stored, so an invalid row
    /// leaves the store untouched. Rows whose id is already present (in the
    /// store or earlier in the batch) are skipped. Returns how many were
    /// inserted.
    fn insert_many(&self, txs: Vec<Transaction>) -> Result<usize>;

    /// Replace a transaction with the same id
    fn update(&self, tx: Transaction) -> Result<()>;

    fn delete(&self, id: &str) -> Result<()>;

    /// Flag a transaction as paid and return the updated record
    fn mark_paid(&self, id: &str) -> Result<Transaction>;
}

/// Deterministic id for a transaction: first 16 hex chars of
/// SHA-256(date, title, amount, type)
pub fn transaction_id(tx: &NewTransaction) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tx.date.to_string().as_bytes());
    hasher.update(tx.title.as_bytes());
    hasher.update(tx.amount.to_be_bytes());
    hasher.update(tx.kind.as_str().as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(16);
    id
}

/// Pick an id not already present, suffixing `-2`, `-3`, ... on collision
fn unique_id(existing: &[Transaction], base: String) -> String {
    if !existing.iter().any(|t| t.id == base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !existing.iter().any(|t| t.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn validate(tx: &Transaction) -> Result<()> {
    if !tx.amount.is_finite() || tx.amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "Amount must be a non-negative number, got {}",
            tx.amount
        )));
    }
    if tx.title.trim().is_empty() {
        return Err(Error::InvalidData("Title must not be empty".into()));
    }
    if tx.category.kind() != tx.kind {
        return Err(Error::InvalidData(format!(
            "Category '{}' is an {} category, not {}",
            tx.category,
            tx.category.kind(),
            tx.kind
        )));
    }
    Ok(())
}

// Shared mutations over an in-memory list; both backends delegate here.

fn add_to(list: &mut Vec<Transaction>, new: NewTransaction) -> Result<Transaction> {
    let id = unique_id(list, transaction_id(&new));
    let tx = new.with_id(id);
    validate(&tx)?;
    list.push(tx.clone());
    Ok(tx)
}

fn insert_into(list: &mut Vec<Transaction>, tx: Transaction) -> Result<Transaction> {
    validate(&tx)?;
    if list.iter().any(|t| t.id == tx.id) {
        return Err(Error::Duplicate(tx.id));
    }
    list.push(tx.clone());
    Ok(tx)
}

fn insert_all_into(list: &mut Vec<Transaction>, txs: Vec<Transaction>) -> Result<usize> {
    for tx in &txs {
        validate(tx)?;
    }
    let mut inserted = 0;
    for tx in txs {
        if list.iter().any(|t| t.id == tx.id) {
            warn!(id = %tx.id, "Skipping transaction with existing id");
            continue;
        }
        list.push(tx);
        inserted += 1;
    }
    Ok(inserted)
}

fn update_in(list: &mut [Transaction], tx: Transaction) -> Result<()> {
    validate(&tx)?;
    let slot = list
        .iter_mut()
        .find(|t| t.id == tx.id)
        .ok_or_else(|| Error::NotFound(format!("Transaction {}", tx.id)))?;
    *slot = tx;
    Ok(())
}

fn delete_from(list: &mut Vec<Transaction>, id: &str) -> Result<()> {
    let before = list.len();
    list.retain(|t| t.id != id);
    if list.len() == before {
        return Err(Error::NotFound(format!("Transaction {}", id)));
    }
    Ok(())
}

fn mark_paid_in(list: &mut [Transaction], id: &str) -> Result<Transaction> {
    let tx = list
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;
    tx.is_paid = true;
    Ok(tx.clone())
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut Vec<Transaction>) -> Result<R>) -> Result<R> {
        let mut guard = self.transactions.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl TransactionStore for MemoryStore {
    fn list(&self) -> Result<Vec<Transaction>> {
        let guard = self.transactions.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }
}

impl TransactionWriter for MemoryStore {
    fn add(&self, tx: NewTransaction) -> Result<Transaction> {
        self.write(|list| add_to(list, tx))
    }

    fn insert(&self, tx: Transaction) -> Result<Transaction> {
        self.write(|list| insert_into(list, tx))
    }

    fn insert_many(&self, txs: Vec<Transaction>) -> Result<usize> {
        self.write(|list| insert_all_into(list, txs))
    }

    fn update(&self, tx: Transaction) -> Result<()> {
        self.write(|list| update_in(list, tx))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.write(|list| delete_from(list, id))
    }

    fn mark_paid(&self, id: &str) -> Result<Transaction> {
        self.write(|list| mark_paid_in(list, id))
    }
}

/// Transactions persisted as a JSON array
///
/// A missing file reads as an empty list. Writes go to a temp file in the
/// same directory and are renamed over the original.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<Vec<Transaction>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Transaction file missing, starting empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let transactions: Vec<Transaction> = serde_json::from_str(&content)?;
        debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "Loaded transactions"
        );
        Ok(transactions)
    }

    /// Replace the whole file contents
    pub fn save_all(&self, transactions: &[Transaction]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, transactions)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        info!(
            path = %self.path.display(),
            count = transactions.len(),
            "Saved transactions"
        );
        Ok(())
    }

    fn modify<R>(&self, f: impl FnOnce(&mut Vec<Transaction>) -> Result<R>) -> Result<R> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut list = self.load()?;
        let result = f(&mut list)?;
        self.save_all(&list)?;
        Ok(result)
    }
}

impl TransactionStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Transaction>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load()
    }
}

impl TransactionWriter for JsonFileStore {
    fn add(&self, tx: NewTransaction) -> Result<Transaction> {
        self.modify(|list| add_to(list, tx))
    }

    fn insert(&self, tx: Transaction) -> Result<Transaction> {
        self.modify(|list| insert_into(list, tx))
    }

    fn insert_many(&self, txs: Vec<Transaction>) -> Result<usize> {
        self.modify(|list| insert_all_into(list, txs))
    }

    fn update(&self, tx: Transaction) -> Result<()> {
        self.modify(|list| update_in(list, tx))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.modify(|list| delete_from(list, id))
    }

    fn mark_paid(&self, id: &str) -> Result<Transaction> {
        self.modify(|list| mark_paid_in(list, id))
    }
}
