// Assets module - What can be owned (fungible balances, unique tokens, native currency)

mod balance;
mod book;
mod native;
mod ownership;
mod traits;

pub use balance::{BalanceLedger, FungibleMetadata};
pub use native::NativeLedger;
pub use ownership::{OwnershipRegistry, TokenRecord};
pub use traits::{FungibleAsset, NonFungibleAsset};
