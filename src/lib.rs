// Helping Hands - deterministic ledger state machine for a donation marketplace
//
// Three cooperating registries, applied leaves first:
// - assets::BalanceLedger      one fungible asset with a privileged minter
// - assets::OwnershipRegistry  unique tokens with open minting
// - listing::ListingRegistry   listings, votes and donations (the orchestrator)

pub mod assets;
pub mod identity;
pub mod ledger;
pub mod listing;
pub mod runtime;
pub mod storage;
