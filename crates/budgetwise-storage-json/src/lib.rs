//! budgetwise-storage-json
//!
//! File-backed implementation of the transaction and budget goal stores.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::RwLock,
};

use tracing::{debug, warn};
use uuid::Uuid;

use budgetwise_core::{
    ledger_warnings, BudgetGoalStore, CoreError, CoreResult, TransactionStore,
};
use budgetwise_domain::{
    BudgetGoal, Category, Ledger, Transaction, TransactionDraft, CURRENT_SCHEMA_VERSION,
};

const LEDGER_FILE: &str = "ledger.json";
const TMP_SUFFIX: &str = "tmp";

/// Keeps the whole ledger in memory and rewrites one JSON document on every mutation.
///
/// A mutation is applied to a copy first. Memory only changes after the copy is on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    ledger: RwLock<Ledger>,
}

impl JsonFileStore {
    /// Opens `<data_dir>/ledger.json`, starting empty when the file does not exist.
    pub fn open_in(data_dir: &Path) -> CoreResult<Self> {
        fs::create_dir_all(data_dir)?;
        Self::open(data_dir.join(LEDGER_FILE))
    }

    pub fn open(path: PathBuf) -> CoreResult<Self> {
        let ledger = if path.exists() {
            load_ledger_from_path(&path)?
        } else {
            Ledger::new()
        };
        for warning in ledger_warnings(&ledger) {
            warn!(path = %path.display(), "{warning}");
        }
        debug!(
            path = %path.display(),
            transactions = ledger.transactions.len(),
            goals = ledger.budget_goals.len(),
            "ledger opened"
        );
        Ok(Self {
            path,
            ledger: RwLock::new(ledger),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the stored ledger wholesale, e.g. when loading sample data.
    pub fn replace(&self, ledger: Ledger) -> CoreResult<()> {
        self.mutate(|current| {
            *current = ledger;
            current.touch();
        })
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut Ledger) -> T) -> CoreResult<T> {
        let mut guard = self.ledger.write().map_err(|_| CoreError::poisoned())?;
        let mut staged = guard.clone();
        let outcome = apply(&mut staged);
        if staged != *guard {
            save_ledger_to_path(&staged, &self.path)?;
            *guard = staged;
        }
        Ok(outcome)
    }

    fn read<T>(&self, view: impl FnOnce(&Ledger) -> T) -> CoreResult<T> {
        let guard = self.ledger.read().map_err(|_| CoreError::poisoned())?;
        Ok(view(&guard))
    }
}

impl TransactionStore for JsonFileStore {
    fn insert(&self, draft: TransactionDraft) -> CoreResult<Transaction> {
        self.mutate(|ledger| ledger.add_transaction(draft))
    }

    fn update(&self, id: Uuid, draft: TransactionDraft) -> CoreResult<Option<Transaction>> {
        self.mutate(|ledger| ledger.update_transaction(id, draft))
    }

    fn remove(&self, id: Uuid) -> CoreResult<Option<Transaction>> {
        self.mutate(|ledger| ledger.remove_transaction(id))
    }

    fn transactions(&self) -> CoreResult<Vec<Transaction>> {
        self.read(|ledger| ledger.transactions.clone())
    }
}

impl BudgetGoalStore for JsonFileStore {
    fn upsert_goal(&self, category: Category, amount: f64) -> CoreResult<BudgetGoal> {
        self.mutate(|ledger| ledger.upsert_goal(category, amount))
    }

    fn goals(&self) -> CoreResult<Vec<BudgetGoal>> {
        self.read(|ledger| ledger.budget_goals.clone())
    }
}

/// Saves a ledger to an arbitrary path on disk.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(ledger).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a ledger, refusing documents written by a newer schema.
pub fn load_ledger_from_path(path: &Path) -> CoreResult<Ledger> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    if ledger.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(CoreError::Storage(format!(
            "ledger schema version {} is newer than supported version {}",
            ledger.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(ledger)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> CoreResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
