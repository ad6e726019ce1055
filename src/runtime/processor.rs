// Command Processor - single-writer application of the command log
// Each call runs against a staged copy of the world and is committed only on success

use crate::ledger::{CallContext, LedgerError};
use crate::runtime::command::{Command, Query, QueryValue, Receipt};
use crate::runtime::world::WorldState;
use tracing::{debug, trace};

/// Applies commands strictly one at a time
#[derive(Clone, Debug)]
pub struct CommandProcessor {
    state: WorldState,
    /// Sequence number the next command will receive
    next_sequence: u64,
}

impl CommandProcessor {
    /// Start from a fresh state
    pub fn new(state: WorldState) -> Self {
        Self::resume(state, 0)
    }

    /// Continue from a persisted state and log position
    pub fn resume(state: WorldState, next_sequence: u64) -> Self {
        Self {
            state,
            next_sequence,
        }
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn into_state(self) -> WorldState {
        self.state
    }

    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Apply one top-level call atomically.
    ///
    /// A failure anywhere inside the call, including inside an asset contract
    /// reached through a donation, leaves the state exactly as it was and
    /// discards the call's events.
    ///
    /// Staging clones the whole `WorldState`, so each call costs time
    /// proportional to the size of the ledger, not of the call.
    // TODO: stage per registry (copy-on-write maps) once ledgers grow past
    // a few thousand accounts and listings.
    pub fn apply(&mut self, command: &Command) -> Receipt {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let mut staged = self.state.clone();
        let mut ctx = CallContext::new(command.caller.clone());

        match staged.execute(&mut ctx, &command.call) {
            Ok(value) => {
                self.state = staged;
                let events = ctx.into_events();
                for event in &events {
                    trace!(sequence, kind = event.kind(), "{}", event);
                }
                debug!(
                    sequence,
                    caller = %command.caller,
                    call = command.call.name(),
                    events = events.len(),
                    "call applied"
                );
                Receipt::new(sequence, command, Ok(value), events)
            }
            Err(err) => {
                debug!(
                    sequence,
                    caller = %command.caller,
                    call = command.call.name(),
                    code = ?err.code(),
                    error = %err,
                    "call failed"
                );
                Receipt::new(sequence, command, Err(err), Vec::new())
            }
        }
    }

    /// Apply independent calls in order. A failing call never undoes
    /// earlier successful ones.
    pub fn apply_batch<'a, I>(&mut self, commands: I) -> Vec<Receipt>
    where
        I: IntoIterator<Item = &'a Command>,
    {
        commands
            .into_iter()
            .map(|command| self.apply(command))
            .collect()
    }

    /// Evaluate a read-only query against the committed state
    pub fn query(&self, query: &Query) -> Result<QueryValue, LedgerError> {
        self.state.query(query)
    }
}
