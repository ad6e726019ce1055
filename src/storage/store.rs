// LedgerStore - Persistent key-value storage using sled
//
// Provides typed access for storing:
// - The genesis configuration
// - The world state snapshot and log position
// - Receipts, keyed by sequence number
// - Batch summaries written by the sequencer

use crate::runtime::{BatchSummary, GenesisConfig, Receipt, WorldState};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Key prefixes for organizing data
mod keys {
    pub const GENESIS: &[u8] = b"genesis:config";
    pub const STATE: &[u8] = b"state:world";
    pub const NEXT_SEQUENCE: &[u8] = b"state:next_sequence";
    pub const RECEIPT_PREFIX: &[u8] = b"receipt:";
    pub const BATCH_PREFIX: &[u8] = b"batch:";

    pub fn receipt(sequence: u64) -> Vec<u8> {
        [RECEIPT_PREFIX, &sequence.to_be_bytes()].concat()
    }

    pub fn batch(first_sequence: u64) -> Vec<u8> {
        [BATCH_PREFIX, &first_sequence.to_be_bytes()].concat()
    }
}

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    OpenFailed(String),

    #[error("Database operation failed: {0}")]
    DatabaseError(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

/// Statistics about the storage
#[derive(Clone, Debug)]
pub struct StorageStats {
    /// Number of keys in the database
    pub key_count: usize,
    /// Approximate disk size in bytes
    pub disk_size_bytes: u64,
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    postcard::to_allocvec(value).map_err(|e| StoreError::SerializationFailed(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    postcard::from_bytes(bytes).map_err(|e| StoreError::DeserializationFailed(e.to_string()))
}

/// Where the sequencer persists each sealed batch
///
/// A batch is only acknowledged to submitters after `commit_batch` and
/// `flush` have both succeeded.
pub trait BatchStore: Send {
    /// Atomically write a batch's receipts, its summary and the state reached after it
    fn commit_batch(
        &self,
        state: &WorldState,
        next_sequence: u64,
        receipts: &[Receipt],
        summary: &BatchSummary,
    ) -> Result<(), StoreError>;

    /// Make everything committed so far durable
    fn flush(&self) -> Result<(), StoreError>;
}

/// Persistent store for the ledger
///
/// Uses sled for crash-safe, embedded storage. A batch commit writes the
/// state snapshot, the log position and the batch's receipts in one atomic
/// sled batch.
#[derive(Clone)]
pub struct LedgerStore {
    db: sled::Db,
}

impl LedgerStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref()).map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        info!(path = %path.as_ref().display(), keys = db.len(), "ledger store opened");
        Ok(Self { db })
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.db.is_empty())
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
        Ok(())
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StoreError> {
        Ok(StorageStats {
            key_count: self.db.len(),
            disk_size_bytes: self.db.size_on_disk().unwrap_or(0),
        })
    }

    // ========================================================================
    // RAW KEY-VALUE OPERATIONS
    // ========================================================================

    /// Put raw bytes
    pub fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key, value)?;
        Ok(())
    }

    /// Get raw bytes
    pub fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    // ========================================================================
    // GENESIS
    // ========================================================================

    pub fn save_genesis(&self, config: &GenesisConfig) -> Result<(), StoreError> {
        self.put_raw(keys::GENESIS, &encode(config)?)
    }

    pub fn load_genesis(&self) -> Result<Option<GenesisConfig>, StoreError> {
        self.get_raw(keys::GENESIS)?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    // ========================================================================
    // STATE PERSISTENCE
    // ========================================================================

    /// Save a state snapshot together with the next log position
    pub fn save_state(&self, state: &WorldState, next_sequence: u64) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        batch.insert(keys::STATE, encode(state)?);
        batch.insert(keys::NEXT_SEQUENCE, next_sequence.to_be_bytes().to_vec());
        self.db.apply_batch(batch)?;
        Ok(())
    }

    /// Load the latest state snapshot and the next log position
    pub fn load_state(&self) -> Result<Option<(WorldState, u64)>, StoreError> {
        let Some(bytes) = self.get_raw(keys::STATE)? else {
            return Ok(None);
        };
        let state: WorldState = decode(&bytes)?;
        Ok(Some((state, self.next_sequence()?)))
    }

    /// Next sequence number to be assigned (0 for an empty log)
    pub fn next_sequence(&self) -> Result<u64, StoreError> {
        match self.get_raw(keys::NEXT_SEQUENCE)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StoreError::DeserializationFailed("Invalid sequence length".to_string())
                })?;
                Ok(u64::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }

    // ========================================================================
    // RECEIPTS
    // ========================================================================

    /// Atomically persist a batch: its receipts, its summary and the state
    /// reached after applying it
    pub fn commit_batch(
        &self,
        state: &WorldState,
        next_sequence: u64,
        receipts: &[Receipt],
        summary: &BatchSummary,
    ) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        for receipt in receipts {
            batch.insert(keys::receipt(receipt.sequence()), encode(receipt)?);
        }
        batch.insert(keys::batch(summary.first_sequence), encode(summary)?);
        batch.insert(keys::STATE, encode(state)?);
        batch.insert(keys::NEXT_SEQUENCE, next_sequence.to_be_bytes().to_vec());
        self.db.apply_batch(batch)?;
        Ok(())
    }

    pub fn load_receipt(&self, sequence: u64) -> Result<Option<Receipt>, StoreError> {
        self.get_raw(&keys::receipt(sequence))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// Receipts with sequence >= `from`, in log order
    pub fn load_receipts(&self, from: u64) -> Result<Vec<Receipt>, StoreError> {
        let start = keys::receipt(from);
        let end = keys::receipt(u64::MAX);
        let mut receipts = Vec::new();
        for result in self.db.range(start..=end) {
            let (_, value) = result?;
            receipts.push(decode(&value)?);
        }
        Ok(receipts)
    }

    /// All batch summaries, oldest first
    pub fn load_batches(&self) -> Result<Vec<BatchSummary>, StoreError> {
        let mut batches = Vec::new();
        for result in self.db.scan_prefix(keys::BATCH_PREFIX) {
            let (_, value) = result?;
            batches.push(decode(&value)?);
        }
        Ok(batches)
    }
}

impl BatchStore for LedgerStore {
    fn commit_batch(
        &self,
        state: &WorldState,
        next_sequence: u64,
        receipts: &[Receipt],
        summary: &BatchSummary,
    ) -> Result<(), StoreError> {
        LedgerStore::commit_batch(self, state, next_sequence, receipts, summary)
    }

    fn flush(&self) -> Result<(), StoreError> {
        LedgerStore::flush(self)
    }
}
