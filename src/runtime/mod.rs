// Runtime module - Genesis, command log application and sequencing

mod command;
mod config;
mod processor;
mod sequencer;
mod world;

pub use command::{Call, CallValue, Command, Query, QueryValue, Receipt};
pub use config::{Allocation, ConfigError, FungibleConfig, GenesisConfig, NonFungibleConfig};
pub use processor::CommandProcessor;
pub use sequencer::{
    replay, BatchSummary, PendingReceipt, Sequencer, SequencerConfig, SequencerError,
    SequencerHandle,
};
pub use world::{WorldState, WorldStateError};
