// Balance Ledger - one fungible asset with a privileged minter

use crate::assets::book::BalanceBook;
use crate::assets::traits::FungibleAsset;
use crate::identity::{AccountId, AssetId};
use crate::ledger::{CallContext, Event, LedgerError, Memo, TokenUri};
use serde::{Deserialize, Serialize};

/// Fixed descriptive data of a fungible asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleMetadata {
    pub name: String,
    pub symbol: String,
    /// Informational only; amounts are never scaled
    pub decimals: u8,
    pub token_uri: Option<TokenUri>,
}

impl Default for FungibleMetadata {
    fn default() -> Self {
        Self {
            name: "SM-Coin".to_string(),
            symbol: "SM".to_string(),
            decimals: 2,
            token_uri: None,
        }
    }
}

/// Per-account balances of a single fungible asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLedger {
    asset: AssetId,
    /// The only account allowed to mint
    minter: AccountId,
    metadata: FungibleMetadata,
    book: BalanceBook,
}

impl BalanceLedger {
    /// Create an empty ledger; nothing exists until the minter mints
    pub fn new(asset: AssetId, minter: AccountId, metadata: FungibleMetadata) -> Self {
        Self {
            asset,
            minter,
            metadata,
            book: BalanceBook::new(),
        }
    }

    pub fn minter(&self) -> &AccountId {
        &self.minter
    }

    pub fn metadata(&self) -> &FungibleMetadata {
        &self.metadata
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Mint `amount` new units to `recipient`. Only the minter may call this.
    pub fn mint(
        &mut self,
        ctx: &mut CallContext,
        amount: u64,
        recipient: &AccountId,
    ) -> Result<(), LedgerError> {
        if !ctx.is_caller(&self.minter) {
            return Err(LedgerError::MintNotAuthorized);
        }
        self.book.issue(recipient, amount)?;

        ctx.emit(Event::FtMint {
            asset: self.asset.clone(),
            amount,
            recipient: recipient.clone(),
        });
        Ok(())
    }

    /// Transfer `amount` from `sender` to `recipient`; the caller must be the sender
    pub fn transfer(
        &mut self,
        ctx: &mut CallContext,
        amount: u64,
        sender: &AccountId,
        recipient: &AccountId,
        memo: Option<Memo>,
    ) -> Result<(), LedgerError> {
        if !ctx.is_caller(sender) {
            return Err(LedgerError::NotSender);
        }
        self.book.move_units(amount, sender, recipient)?;

        ctx.emit(Event::FtTransfer {
            asset: self.asset.clone(),
            amount,
            sender: sender.clone(),
            recipient: recipient.clone(),
            memo,
        });
        Ok(())
    }

    // ========================================================================
    // READ-ONLY
    // ========================================================================

    pub fn get_balance(&self, account: &AccountId) -> u64 {
        self.book.balance_of(account)
    }

    pub fn get_total_supply(&self) -> u64 {
        self.book.total_supply()
    }

    pub fn get_name(&self) -> &str {
        &self.metadata.name
    }

    pub fn get_symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn get_decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn get_token_uri(&self) -> Option<&TokenUri> {
        self.metadata.token_uri.as_ref()
    }

    /// All accounts that ever held a balance, with their balance
    pub fn holders(&self) -> Vec<(&AccountId, u64)> {
        self.book.holders().collect()
    }

    /// Sum of balances equals total supply
    pub fn is_consistent(&self) -> bool {
        self.book.is_consistent()
    }
}

impl FungibleAsset for BalanceLedger {
    fn asset_id(&self) -> &AssetId {
        &self.asset
    }

    fn transfer(
        &mut self,
        ctx: &mut CallContext,
        amount: u64,
        sender: &AccountId,
        recipient: &AccountId,
        memo: Option<Memo>,
    ) -> Result<(), LedgerError> {
        BalanceLedger::transfer(self, ctx, amount, sender, recipient, memo)
    }

    fn balance_of(&self, account: &AccountId) -> u64 {
        self.get_balance(account)
    }

    fn total_supply(&self) -> u64 {
        self.get_total_supply()
    }

    fn name(&self) -> &str {
        self.get_name()
    }

    fn symbol(&self) -> &str {
        self.get_symbol()
    }

    fn decimals(&self) -> u8 {
        self.get_decimals()
    }

    fn token_uri(&self) -> Option<&TokenUri> {
        self.get_token_uri()
    }
}
