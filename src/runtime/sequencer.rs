// Sequencer - the only concurrent layer
// Many submitters, one task that owns the processor and applies calls in arrival order

use crate::runtime::command::{Command, Receipt};
use crate::runtime::processor::CommandProcessor;
use crate::storage::{BatchStore, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

// ============================================================================
// SEQUENCER CONFIG
// ============================================================================

/// Configuration for the sequencer
#[derive(Clone, Debug)]
pub struct SequencerConfig {
    /// Commands that may wait in the queue before submitters are back-pressured
    pub queue_capacity: usize,
    /// Maximum number of commands applied and persisted as one batch
    pub max_batch_size: usize,
}

impl SequencerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SequencerError> {
        if self.queue_capacity == 0 {
            return Err(SequencerError::InvalidConfig(
                "queue_capacity cannot be 0".to_string(),
            ));
        }
        if self.max_batch_size == 0 {
            return Err(SequencerError::InvalidConfig(
                "max_batch_size cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            max_batch_size: 64,
        }
    }
}

// ============================================================================
// ERRORS AND SUMMARIES
// ============================================================================

#[derive(Error, Debug)]
pub enum SequencerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Sequencer is closed")]
    Closed,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Sequencer task failed: {0}")]
    TaskFailed(String),
}

/// Record of one applied batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub first_sequence: u64,
    pub count: usize,
    pub succeeded: usize,
    pub state_root: String,
    pub sealed_at: DateTime<Utc>,
}

struct Submission {
    command: Command,
    reply: oneshot::Sender<Receipt>,
}

// ============================================================================
// HANDLE
// ============================================================================

/// Cloneable handle used to submit commands
#[derive(Clone)]
pub struct SequencerHandle {
    tx: mpsc::Sender<Submission>,
}

impl SequencerHandle {
    /// Queue a command without waiting for it to be applied.
    ///
    /// Commands queued from one task are applied in the order they were queued.
    pub async fn enqueue(&self, command: Command) -> Result<PendingReceipt, SequencerError> {
        let (reply, receipt) = oneshot::channel();
        self.tx
            .send(Submission { command, reply })
            .await
            .map_err(|_| {
                warn!("submission rejected: sequencer closed");
                SequencerError::Closed
            })?;
        Ok(PendingReceipt { receipt })
    }

    /// Submit a command and wait for its receipt
    pub async fn submit(&self, command: Command) -> Result<Receipt, SequencerError> {
        self.enqueue(command).await?.wait().await
    }
}

/// Receipt of a queued command, available once its batch is sealed
pub struct PendingReceipt {
    receipt: oneshot::Receiver<Receipt>,
}

impl PendingReceipt {
    pub async fn wait(self) -> Result<Receipt, SequencerError> {
        self.receipt.await.map_err(|_| SequencerError::Closed)
    }
}

// ============================================================================
// SEQUENCER
// ============================================================================

/// Owns the processor; the single writer of the world state
pub struct Sequencer {
    config: SequencerConfig,
    processor: CommandProcessor,
    store: Option<Box<dyn BatchStore>>,
}

impl Sequencer {
    pub fn new(
        processor: CommandProcessor,
        config: SequencerConfig,
    ) -> Result<Self, SequencerError> {
        config.validate()?;
        Ok(Self {
            config,
            processor,
            store: None,
        })
    }

    /// Persist and flush every batch to `store` before replying to submitters
    pub fn with_store<S: BatchStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Start the sequencer task.
    ///
    /// The task ends once every handle is dropped and the queue is drained,
    /// returning the processor with its final state.
    pub fn spawn(
        self,
    ) -> (
        SequencerHandle,
        JoinHandle<Result<CommandProcessor, SequencerError>>,
    ) {
        let (tx, rx) = mpsc::channel(self.config.queue_capacity);
        let handle = tokio::spawn(self.run(rx));
        (SequencerHandle { tx }, handle)
    }

    async fn run(
        mut self,
        mut rx: mpsc::Receiver<Submission>,
    ) -> Result<CommandProcessor, SequencerError> {
        while let Some(first) = rx.recv().await {
            let mut batch = vec![first];
            while batch.len() < self.config.max_batch_size {
                match rx.try_recv() {
                    Ok(submission) => batch.push(submission),
                    Err(_) => break,
                }
            }
            self.seal(batch)?;
        }
        Ok(self.processor)
    }

    /// Apply, persist, flush, then reply. Receipts are only released once durable.
    fn seal(&mut self, batch: Vec<Submission>) -> Result<(), SequencerError> {
        let first_sequence = self.processor.next_sequence();
        let receipts = self
            .processor
            .apply_batch(batch.iter().map(|submission| &submission.command));

        let summary = BatchSummary {
            first_sequence,
            count: receipts.len(),
            succeeded: receipts.iter().filter(|r| r.is_ok()).count(),
            state_root: self.processor.state().state_root(),
            sealed_at: Utc::now(),
        };

        if let Some(store) = &self.store {
            store.commit_batch(
                self.processor.state(),
                self.processor.next_sequence(),
                &receipts,
                &summary,
            )
            .and_then(|_| store.flush())
            .map_err(|err| {
                warn!(first_sequence, error = %err, "batch not persisted; stopping");
                err
            })?;
        }

        info!(
            first_sequence,
            count = summary.count,
            succeeded = summary.succeeded,
            state_root = %summary.state_root,
            "batch sealed"
        );

        for (submission, receipt) in batch.into_iter().zip(receipts) {
            // A submitter that stopped waiting still had its call applied
            let _ = submission.reply.send(receipt);
        }
        Ok(())
    }
}

/// Apply an ordered command list through a sequencer and shut it down
pub async fn replay(
    sequencer: Sequencer,
    commands: Vec<Command>,
) -> Result<(Vec<Receipt>, CommandProcessor), SequencerError> {
    let (handle, task) = sequencer.spawn();
    let mut pending = Vec::with_capacity(commands.len());
    for command in commands {
        match handle.enqueue(command).await {
            Ok(receipt) => pending.push(receipt),
            Err(closed) => return Err(stopped(task, closed).await),
        }
    }
    drop(handle);

    let mut receipts = Vec::with_capacity(pending.len());
    for receipt in pending {
        match receipt.wait().await {
            Ok(receipt) => receipts.push(receipt),
            Err(closed) => return Err(stopped(task, closed).await),
        }
    }
    let processor = join(task).await?;
    Ok((receipts, processor))
}

/// The task stopped before answering; its own error says why
async fn stopped(
    task: JoinHandle<Result<CommandProcessor, SequencerError>>,
    closed: SequencerError,
) -> SequencerError {
    match join(task).await {
        Err(err) => err,
        Ok(_) => closed,
    }
}

async fn join(
    task: JoinHandle<Result<CommandProcessor, SequencerError>>,
) -> Result<CommandProcessor, SequencerError> {
    task.await
        .map_err(|e| SequencerError::TaskFailed(e.to_string()))?
}
