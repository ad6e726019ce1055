// Ledger errors - the flat numeric taxonomy every call reports

use crate::identity::ContractId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by registry operations
///
/// Each variant maps to the numeric code callers observe (see [`LedgerError::code`]).
/// Variants without a code are runtime aborts: the call fails and is rolled
/// back exactly like a coded failure, but no code is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("Caller is not the owner of the token")]
    NotOwner,

    #[error("Sender and recipient are the same account")]
    SelfTransfer,

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Mint amount must be greater than zero")]
    ZeroMint,

    #[error("Token {0} does not exist")]
    TokenNotFound(u64),

    #[error("Caller is not the sender")]
    NotSender,

    #[error("Caller is not authorized to mint")]
    MintNotAuthorized,

    #[error("Listing {0} not found")]
    ListingNotFound(u64),

    #[error("Caller is not the needer of this listing")]
    NotNeeder,

    #[error("Needer cannot vote on their own listing")]
    SelfVote,

    #[error("Caller has already voted on this listing")]
    AlreadyVoted,

    #[error("Vote not found")]
    VoteNotFound,

    #[error("Unknown contract: {0}")]
    UnknownContract(ContractId),

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

impl LedgerError {
    /// Numeric error code reported to the caller
    pub fn code(&self) -> Option<u32> {
        match self {
            LedgerError::InsufficientBalance { .. } => Some(1),
            LedgerError::NotOwner => Some(1),
            LedgerError::ZeroMint => Some(1),
            LedgerError::SelfTransfer => Some(2),
            LedgerError::NonPositiveAmount => Some(3),
            LedgerError::TokenNotFound(_) => Some(3),
            LedgerError::NotSender => Some(4),
            LedgerError::MintNotAuthorized => Some(50),
            LedgerError::ListingNotFound(_) => Some(100),
            LedgerError::NotNeeder => Some(101),
            LedgerError::SelfVote => Some(102),
            LedgerError::AlreadyVoted => Some(103),
            LedgerError::VoteNotFound => Some(104),
            LedgerError::UnknownContract(_) | LedgerError::ArithmeticOverflow => None,
        }
    }
}
