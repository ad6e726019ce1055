// Identity module - Opaque account, contract and asset identifiers

mod account;

pub use account::*;
