// Call context - who is calling, and what the call has emitted so far

use crate::identity::AccountId;
use crate::ledger::event::Event;

/// Context of one top-level call
///
/// Nested calls (the orchestrator invoking an asset contract) share the same
/// context, so the asset contract authorizes against the outermost caller and
/// its events land in the same buffer.
#[derive(Debug)]
pub struct CallContext {
    caller: AccountId,
    events: Vec<Event>,
}

impl CallContext {
    pub fn new(caller: AccountId) -> Self {
        Self {
            caller,
            events: Vec::new(),
        }
    }

    /// The account that submitted the call
    pub fn caller(&self) -> &AccountId {
        &self.caller
    }

    /// Whether the caller is the given account
    pub fn is_caller(&self, account: &AccountId) -> bool {
        &self.caller == account
    }

    /// Buffer an event
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consume the context, returning the buffered events in emission order
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}
