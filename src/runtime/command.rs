// Commands, queries and receipts
// The ordered command log is the only input of the state machine

use crate::identity::{AccountId, ContractId};
use crate::ledger::{ContactInfo, Event, LedgerError, Memo, TokenUri};
use crate::listing::{Listing, Vote};
use serde::{Deserialize, Serialize};

// ============================================================================
// CALLS
// ============================================================================

/// A mutating operation, addressed to one of the registries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Call {
    /// Balance ledger: privileged mint
    FtMint {
        contract: ContractId,
        amount: u64,
        recipient: AccountId,
    },
    /// Balance ledger: transfer
    FtTransfer {
        contract: ContractId,
        amount: u64,
        sender: AccountId,
        recipient: AccountId,
        memo: Option<Memo>,
    },
    /// Ownership registry: open mint
    NftMint {
        contract: ContractId,
        owner: AccountId,
        metadata: Option<TokenUri>,
    },
    /// Ownership registry: transfer
    NftTransfer {
        contract: ContractId,
        token_id: u64,
        sender: AccountId,
        recipient: AccountId,
    },
    /// Native currency transfer from the caller
    StxTransfer {
        amount: u64,
        recipient: AccountId,
        memo: Option<Memo>,
    },
    ListNeeder {
        needer: AccountId,
        amount_needed: u64,
        description: String,
        contact_info: Option<ContactInfo>,
    },
    EditContactInfo {
        listing_id: u64,
        contact_info: Option<ContactInfo>,
    },
    VoteListing {
        listing_id: u64,
        upvote: bool,
        comment: String,
    },
    DonateStx {
        listing_id: u64,
        amount: u64,
    },
    /// `token` is the capability reference of the fungible registry to invoke
    DonateFt {
        token: ContractId,
        amount: u64,
        recipient: AccountId,
    },
    DonateNft {
        token: ContractId,
        token_id: u64,
        recipient: AccountId,
    },
}

impl Call {
    /// Operation name as it appears in receipts and logs
    pub fn name(&self) -> &'static str {
        match self {
            Call::FtMint { .. } => "ft-mint",
            Call::FtTransfer { .. } => "ft-transfer",
            Call::NftMint { .. } => "nft-mint",
            Call::NftTransfer { .. } => "nft-transfer",
            Call::StxTransfer { .. } => "stx-transfer",
            Call::ListNeeder { .. } => "list-needer",
            Call::EditContactInfo { .. } => "edit-contact-info",
            Call::VoteListing { .. } => "vote-listing",
            Call::DonateStx { .. } => "donate-stx",
            Call::DonateFt { .. } => "donate-ft",
            Call::DonateNft { .. } => "donate-nft",
        }
    }
}

/// A call together with the account submitting it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub caller: AccountId,
    pub call: Call,
}

impl Command {
    pub fn new(caller: AccountId, call: Call) -> Self {
        Self { caller, call }
    }
}

/// Value returned by a successful call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallValue {
    Bool(bool),
    Uint(u64),
}

// ============================================================================
// QUERIES
// ============================================================================

/// A read-only operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Query {
    GetBalance { contract: ContractId, account: AccountId },
    GetTotalSupply { contract: ContractId },
    GetName { contract: ContractId },
    GetSymbol { contract: ContractId },
    GetDecimals { contract: ContractId },
    GetTokenUri { contract: ContractId },
    GetOwner { contract: ContractId, token_id: u64 },
    GetNftTokenUri { contract: ContractId, token_id: u64 },
    GetLastTokenId { contract: ContractId },
    GetStxBalance { account: AccountId },
    GetListingAt { listing_id: u64 },
    GetListingCount,
    GetVote { listing_id: u64, voter: AccountId },
}

/// Result of a query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryValue {
    Uint(u64),
    Text(String),
    OptionalText(Option<String>),
    OptionalAccount(Option<AccountId>),
    Listing(Listing),
    Vote(Vote),
}

// ============================================================================
// RECEIPTS
// ============================================================================

/// Outcome of one applied command
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    sequence: u64,
    caller: AccountId,
    call: String,
    result: Result<CallValue, LedgerError>,
    /// Empty when the call failed
    events: Vec<Event>,
}

impl Receipt {
    pub(crate) fn new(
        sequence: u64,
        command: &Command,
        result: Result<CallValue, LedgerError>,
        events: Vec<Event>,
    ) -> Self {
        Self {
            sequence,
            caller: command.caller.clone(),
            call: command.call.name().to_string(),
            result,
            events,
        }
    }

    /// Position of the command in the log
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn caller(&self) -> &AccountId {
        &self.caller
    }

    pub fn call(&self) -> &str {
        &self.call
    }

    pub fn result(&self) -> &Result<CallValue, LedgerError> {
        &self.result
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Error code of a failed call
    pub fn error_code(&self) -> Option<u32> {
        self.result.as_ref().err().and_then(LedgerError::code)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).unwrap_or_default()
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
