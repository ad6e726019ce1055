// Ownership Registry - unique non-fungible items with open minting
// Token ids are assigned 0, 1, 2, ... in mint order and never reused

use crate::assets::traits::NonFungibleAsset;
use crate::identity::{AccountId, AssetId};
use crate::ledger::{CallContext, Event, LedgerError, TokenUri};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A minted token as stored by the registry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    owner: AccountId,
    /// Fixed at mint time
    metadata: Option<TokenUri>,
}

impl TokenRecord {
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn metadata(&self) -> Option<&TokenUri> {
        self.metadata.as_ref()
    }
}

/// Per-token ownership of one non-fungible asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRegistry {
    asset: AssetId,
    tokens: BTreeMap<u64, TokenRecord>,
    next_token_id: u64,
}

impl OwnershipRegistry {
    pub fn new(asset: AssetId) -> Self {
        Self {
            asset,
            tokens: BTreeMap::new(),
            next_token_id: 0,
        }
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Mint a new token to `owner`. Anyone may mint. Returns the new id.
    pub fn mint(
        &mut self,
        ctx: &mut CallContext,
        owner: &AccountId,
        metadata: Option<TokenUri>,
    ) -> Result<u64, LedgerError> {
        let token_id = self.next_token_id;
        let next = token_id
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.tokens.insert(
            token_id,
            TokenRecord {
                owner: owner.clone(),
                metadata,
            },
        );
        self.next_token_id = next;

        ctx.emit(Event::NftMint {
            asset: self.asset.clone(),
            token_id,
            recipient: owner.clone(),
        });
        Ok(token_id)
    }

    /// Transfer a token. Both the caller and `sender` must be its current owner.
    pub fn transfer(
        &mut self,
        ctx: &mut CallContext,
        token_id: u64,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), LedgerError> {
        if !ctx.is_caller(sender) {
            return Err(LedgerError::NotOwner);
        }
        let record = self
            .tokens
            .get_mut(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        if &record.owner != sender {
            return Err(LedgerError::NotOwner);
        }
        if sender == recipient {
            return Err(LedgerError::SelfTransfer);
        }

        record.owner = recipient.clone();

        ctx.emit(Event::NftTransfer {
            asset: self.asset.clone(),
            token_id,
            sender: sender.clone(),
            recipient: recipient.clone(),
        });
        Ok(())
    }

    // ========================================================================
    // READ-ONLY
    // ========================================================================

    pub fn get_owner(&self, token_id: u64) -> Option<&AccountId> {
        self.tokens.get(&token_id).map(TokenRecord::owner)
    }

    pub fn get_token_uri(&self, token_id: u64) -> Option<&TokenUri> {
        self.tokens.get(&token_id).and_then(TokenRecord::metadata)
    }

    /// The mint counter: number of tokens minted, which is also the next id
    pub fn get_last_token_id(&self) -> u64 {
        self.next_token_id
    }

    pub fn get_token(&self, token_id: u64) -> Option<&TokenRecord> {
        self.tokens.get(&token_id)
    }

    /// Ids of all tokens currently owned by `owner`, ascending
    pub fn tokens_of(&self, owner: &AccountId) -> Vec<u64> {
        self.tokens
            .iter()
            .filter(|(_, record)| &record.owner == owner)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl NonFungibleAsset for OwnershipRegistry {
    fn asset_id(&self) -> &AssetId {
        &self.asset
    }

    fn transfer(
        &mut self,
        ctx: &mut CallContext,
        token_id: u64,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), LedgerError> {
        OwnershipRegistry::transfer(self, ctx, token_id, sender, recipient)
    }

    fn owner_of(&self, token_id: u64) -> Option<&AccountId> {
        self.get_owner(token_id)
    }

    fn token_uri(&self, token_id: u64) -> Option<&TokenUri> {
        self.get_token_uri(token_id)
    }

    fn last_token_id(&self) -> u64 {
        self.get_last_token_id()
    }
}
