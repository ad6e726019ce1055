// Ledger module - THE SHARED VOCABULARY
// Errors, events, call context and bounded text used by every registry

mod context;
mod error;
mod event;
mod text;

pub use context::CallContext;
pub use error::LedgerError;
pub use event::Event;
pub use text::{
    BoundedAscii, ContactInfo, Memo, TextError, TokenUri, CONTACT_INFO_MAX_LEN, MEMO_MAX_LEN,
    TOKEN_URI_MAX_LEN,
};
