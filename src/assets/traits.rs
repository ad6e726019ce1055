// Asset capability traits
// The listing registry moves assets it does not own through these interfaces only

use crate::identity::{AccountId, AssetId};
use crate::ledger::{CallContext, LedgerError, Memo, TokenUri};

// ============================================================================
// FUNGIBLE ASSET
// ============================================================================

/// Capability interface of a fungible asset registry
///
/// Any registry implementing this trait can be handed to
/// [`ListingRegistry::donate_ft`](crate::listing::ListingRegistry::donate_ft).
/// Implementations authorize against `ctx.caller()`, never against `sender`
/// alone, and must not mutate anything when they return an error.
pub trait FungibleAsset {
    /// Fully qualified identifier of the asset
    fn asset_id(&self) -> &AssetId;

    /// Move `amount` from `sender` to `recipient`
    fn transfer(
        &mut self,
        ctx: &mut CallContext,
        amount: u64,
        sender: &AccountId,
        recipient: &AccountId,
        memo: Option<Memo>,
    ) -> Result<(), LedgerError>;

    fn balance_of(&self, account: &AccountId) -> u64;

    fn total_supply(&self) -> u64;

    fn name(&self) -> &str;

    fn symbol(&self) -> &str;

    fn decimals(&self) -> u8;

    fn token_uri(&self) -> Option<&TokenUri>;
}

// ============================================================================
// NON-FUNGIBLE ASSET
// ============================================================================

/// Capability interface of a non-fungible asset registry
pub trait NonFungibleAsset {
    fn asset_id(&self) -> &AssetId;

    /// Move token `token_id` from `sender` to `recipient`
    fn transfer(
        &mut self,
        ctx: &mut CallContext,
        token_id: u64,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), LedgerError>;

    /// Current owner of a token, if it has been minted
    fn owner_of(&self, token_id: u64) -> Option<&AccountId>;

    fn token_uri(&self, token_id: u64) -> Option<&TokenUri>;

    /// Number of tokens minted so far (the next id to be assigned)
    fn last_token_id(&self) -> u64;
}
