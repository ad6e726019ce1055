// hands - command line front end for the Helping Hands ledger
//
// Every mutating path goes through the sequencer so the on-disk log and
// snapshot are always written together.

use clap::{Parser, Subcommand};
use helping_hands::identity::{AccountId, ContractId};
use helping_hands::runtime::{
    replay, Command, CommandProcessor, GenesisConfig, Sequencer, SequencerConfig, WorldState,
};
use helping_hands::storage::LedgerStore;
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Helping Hands ledger
#[derive(Parser, Debug)]
#[command(name = "hands")]
#[command(about = "Donation marketplace ledger: listings, votes and asset donations")]
struct Args {
    /// Path of the ledger database
    #[arg(long, global = true, default_value = "hands.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Create the genesis state from a JSON configuration
    Init {
        #[arg(long)]
        genesis: PathBuf,
    },
    /// Apply a JSON-lines command log and print one receipt per line
    Apply {
        commands: PathBuf,

        /// Maximum number of commands sealed per batch
        #[arg(long, default_value_t = 64)]
        batch_size: usize,
    },
    /// Show one listing
    Listing { id: u64 },
    /// Show every listing in id order
    Listings,
    /// Show an account balance (native currency unless --contract is given)
    Balance {
        account: String,

        #[arg(long)]
        contract: Option<String>,
    },
    /// Print stored receipts
    Receipts {
        #[arg(long, default_value_t = 0)]
        from: u64,
    },
    /// Print the current state root
    Root,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let store = LedgerStore::open(&args.db)?;

    match args.command {
        Cmd::Init { genesis } => init(&store, &genesis),
        Cmd::Apply {
            commands,
            batch_size,
        } => apply(store, &commands, batch_size).await,
        Cmd::Listing { id } => {
            let state = load_state(&store)?;
            let listing = state.listings().get_listing_at(id)?;
            println!("{}", serde_json::to_string_pretty(listing)?);
            Ok(())
        }
        Cmd::Listings => {
            let state = load_state(&store)?;
            for listing in state.listings().listings() {
                println!("{}", serde_json::to_string(listing)?);
            }
            Ok(())
        }
        Cmd::Balance { account, contract } => {
            let state = load_state(&store)?;
            let account = AccountId::parse(&account)?;
            let balance = match contract {
                Some(contract) => state
                    .fungible(&ContractId::parse(&contract)?)?
                    .get_balance(&account),
                None => state.stx_balance(&account),
            };
            println!("{balance}");
            Ok(())
        }
        Cmd::Receipts { from } => {
            for receipt in store.load_receipts(from)? {
                println!("{}", serde_json::to_string(&receipt)?);
            }
            Ok(())
        }
        Cmd::Root => {
            println!("{}", load_state(&store)?.state_root());
            Ok(())
        }
    }
}

fn init(store: &LedgerStore, genesis: &Path) -> CliResult<()> {
    if store.load_state()?.is_some() {
        return Err("ledger already initialized".into());
    }
    let config = GenesisConfig::from_json_file(genesis)?;
    let state = WorldState::from_genesis(&config)?;

    store.save_genesis(&config)?;
    store.save_state(&state, 0)?;
    store.flush()?;

    info!(deployer = %config.deployer, root = %state.state_root(), "ledger initialized");
    println!("{}", state.state_root());
    Ok(())
}

async fn apply(store: LedgerStore, path: &Path, batch_size: usize) -> CliResult<()> {
    let commands = read_commands(path)?;
    let (state, next_sequence) = store
        .load_state()?
        .ok_or("ledger not initialized; run `hands init` first")?;

    let processor = CommandProcessor::resume(state, next_sequence);
    let sequencer = Sequencer::new(
        processor,
        SequencerConfig::new().with_max_batch_size(batch_size),
    )?
    .with_store(store.clone());

    let (receipts, processor) = replay(sequencer, commands).await?;

    for receipt in &receipts {
        println!("{}", serde_json::to_string(receipt)?);
    }
    info!(
        applied = receipts.len(),
        failed = receipts.iter().filter(|r| !r.is_ok()).count(),
        root = %processor.state().state_root(),
        "command log applied"
    );
    Ok(())
}

/// One JSON command per line; blank lines and `#` comments are skipped
fn read_commands(path: &Path) -> CliResult<Vec<Command>> {
    let reader = BufReader::new(File::open(path)?);
    let mut commands = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command: Command = serde_json::from_str(trimmed)
            .map_err(|e| format!("line {}: {e}", index + 1))?;
        commands.push(command);
    }
    Ok(commands)
}

fn load_state(store: &LedgerStore) -> CliResult<WorldState> {
    let (state, _) = store
        .load_state()?
        .ok_or("ledger not initialized; run `hands init` first")?;
    Ok(state)
}
