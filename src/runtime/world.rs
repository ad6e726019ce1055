// World State - every registry the state machine owns
// Dispatches calls and queries to the registry they address

use crate::assets::{
    BalanceLedger, FungibleAsset, NativeLedger, NonFungibleAsset, OwnershipRegistry,
};
use crate::identity::{AccountId, ContractId};
use crate::ledger::{CallContext, LedgerError};
use crate::listing::ListingRegistry;
use crate::runtime::command::{Call, CallValue, Query, QueryValue};
use crate::runtime::config::{ConfigError, GenesisConfig};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorldStateError {
    #[error("Deserialization failed")]
    DeserializationFailed,
}

/// The complete persisted state. Every map is ordered, so the encoding
/// (and therefore the state root) is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    registry_contract: ContractId,
    native: NativeLedger,
    fungible: BTreeMap<ContractId, BalanceLedger>,
    non_fungible: BTreeMap<ContractId, OwnershipRegistry>,
    listings: ListingRegistry,
}

impl WorldState {
    /// Build the genesis state: native allocations plus the default contracts
    pub fn from_genesis(config: &GenesisConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut native = NativeLedger::new();
        for allocation in &config.allocations {
            native
                .allocate(&allocation.account, allocation.amount)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        let mut state = Self {
            registry_contract: config.registry_contract_id()?,
            native,
            fungible: BTreeMap::new(),
            non_fungible: BTreeMap::new(),
            listings: ListingRegistry::new(),
        };
        state.deploy_fungible(BalanceLedger::new(
            config.fungible_asset()?,
            config.deployer.clone(),
            config.fungible.metadata.clone(),
        ))?;
        state.deploy_non_fungible(OwnershipRegistry::new(config.non_fungible_asset()?))?;
        Ok(state)
    }

    /// Deploy an additional fungible asset registry
    pub fn deploy_fungible(&mut self, ledger: BalanceLedger) -> Result<(), ConfigError> {
        let contract = ledger.asset_id().contract().clone();
        if self.is_deployed(&contract) {
            return Err(ConfigError::ContractExists(contract));
        }
        self.fungible.insert(contract, ledger);
        Ok(())
    }

    /// Deploy an additional non-fungible asset registry
    pub fn deploy_non_fungible(&mut self, registry: OwnershipRegistry) -> Result<(), ConfigError> {
        let contract = registry.asset_id().contract().clone();
        if self.is_deployed(&contract) {
            return Err(ConfigError::ContractExists(contract));
        }
        self.non_fungible.insert(contract, registry);
        Ok(())
    }

    fn is_deployed(&self, contract: &ContractId) -> bool {
        contract == &self.registry_contract
            || self.fungible.contains_key(contract)
            || self.non_fungible.contains_key(contract)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn registry_contract(&self) -> &ContractId {
        &self.registry_contract
    }

    pub fn native(&self) -> &NativeLedger {
        &self.native
    }

    pub fn fungible(&self, contract: &ContractId) -> Result<&BalanceLedger, LedgerError> {
        self.fungible
            .get(contract)
            .ok_or_else(|| LedgerError::UnknownContract(contract.clone()))
    }

    pub fn non_fungible(&self, contract: &ContractId) -> Result<&OwnershipRegistry, LedgerError> {
        self.non_fungible
            .get(contract)
            .ok_or_else(|| LedgerError::UnknownContract(contract.clone()))
    }

    fn fungible_mut(&mut self, contract: &ContractId) -> Result<&mut BalanceLedger, LedgerError> {
        self.fungible
            .get_mut(contract)
            .ok_or_else(|| LedgerError::UnknownContract(contract.clone()))
    }

    fn non_fungible_mut(
        &mut self,
        contract: &ContractId,
    ) -> Result<&mut OwnershipRegistry, LedgerError> {
        self.non_fungible
            .get_mut(contract)
            .ok_or_else(|| LedgerError::UnknownContract(contract.clone()))
    }

    pub fn fungible_contracts(&self) -> impl Iterator<Item = &ContractId> {
        self.fungible.keys()
    }

    pub fn non_fungible_contracts(&self) -> impl Iterator<Item = &ContractId> {
        self.non_fungible.keys()
    }

    pub fn listings(&self) -> &ListingRegistry {
        &self.listings
    }

    // ========================================================================
    // EXECUTION
    // ========================================================================

    /// Execute one call in place.
    ///
    /// On error the state may be partially modified; callers that need
    /// atomicity run this against a staged copy (see `CommandProcessor`).
    pub fn execute(
        &mut self,
        ctx: &mut CallContext,
        call: &Call,
    ) -> Result<CallValue, LedgerError> {
        match call {
            Call::FtMint { contract, amount, recipient } => {
                self.fungible_mut(contract)?.mint(ctx, *amount, recipient)?;
                Ok(CallValue::Bool(true))
            }
            Call::FtTransfer { contract, amount, sender, recipient, memo } => {
                self.fungible_mut(contract)?
                    .transfer(ctx, *amount, sender, recipient, memo.clone())?;
                Ok(CallValue::Bool(true))
            }
            Call::NftMint { contract, owner, metadata } => {
                let token_id = self.non_fungible_mut(contract)?.mint(ctx, owner, metadata.clone())?;
                Ok(CallValue::Uint(token_id))
            }
            Call::NftTransfer { contract, token_id, sender, recipient } => {
                self.non_fungible_mut(contract)?
                    .transfer(ctx, *token_id, sender, recipient)?;
                Ok(CallValue::Bool(true))
            }
            Call::StxTransfer { amount, recipient, memo } => {
                let sender = ctx.caller().clone();
                self.native.transfer(ctx, *amount, &sender, recipient, memo.clone())?;
                Ok(CallValue::Bool(true))
            }
            Call::ListNeeder { needer, amount_needed, description, contact_info } => {
                let listing_id = self.listings.list_needer(
                    ctx,
                    needer,
                    *amount_needed,
                    description.clone(),
                    contact_info.clone(),
                )?;
                Ok(CallValue::Uint(listing_id))
            }
            Call::EditContactInfo { listing_id, contact_info } => {
                self.listings
                    .edit_contact_info(ctx, *listing_id, contact_info.clone())?;
                Ok(CallValue::Bool(true))
            }
            Call::VoteListing { listing_id, upvote, comment } => {
                self.listings
                    .vote_listing(ctx, *listing_id, *upvote, comment.clone())?;
                Ok(CallValue::Bool(true))
            }
            Call::DonateStx { listing_id, amount } => {
                self.listings
                    .donate_stx(ctx, &mut self.native, *listing_id, *amount)?;
                Ok(CallValue::Bool(true))
            }
            Call::DonateFt { token, amount, recipient } => {
                let asset = self
                    .fungible
                    .get_mut(token)
                    .ok_or_else(|| LedgerError::UnknownContract(token.clone()))?;
                self.listings.donate_ft(ctx, asset, *amount, recipient)?;
                Ok(CallValue::Bool(true))
            }
            Call::DonateNft { token, token_id, recipient } => {
                let asset = self
                    .non_fungible
                    .get_mut(token)
                    .ok_or_else(|| LedgerError::UnknownContract(token.clone()))?;
                self.listings.donate_nft(ctx, asset, *token_id, recipient)?;
                Ok(CallValue::Bool(true))
            }
        }
    }

    /// Evaluate a read-only query
    pub fn query(&self, query: &Query) -> Result<QueryValue, LedgerError> {
        let value = match query {
            Query::GetBalance { contract, account } => {
                QueryValue::Uint(self.fungible(contract)?.get_balance(account))
            }
            Query::GetTotalSupply { contract } => {
                QueryValue::Uint(self.fungible(contract)?.get_total_supply())
            }
            Query::GetName { contract } => {
                QueryValue::Text(self.fungible(contract)?.get_name().to_string())
            }
            Query::GetSymbol { contract } => {
                QueryValue::Text(self.fungible(contract)?.get_symbol().to_string())
            }
            Query::GetDecimals { contract } => {
                QueryValue::Uint(u64::from(self.fungible(contract)?.get_decimals()))
            }
            Query::GetTokenUri { contract } => QueryValue::OptionalText(
                self.fungible(contract)?
                    .get_token_uri()
                    .map(|uri| uri.to_string()),
            ),
            Query::GetOwner { contract, token_id } => QueryValue::OptionalAccount(
                self.non_fungible(contract)?.get_owner(*token_id).cloned(),
            ),
            Query::GetNftTokenUri { contract, token_id } => QueryValue::OptionalText(
                self.non_fungible(contract)?
                    .get_token_uri(*token_id)
                    .map(|uri| uri.to_string()),
            ),
            Query::GetLastTokenId { contract } => {
                QueryValue::Uint(self.non_fungible(contract)?.get_last_token_id())
            }
            Query::GetStxBalance { account } => QueryValue::Uint(self.native.balance_of(account)),
            Query::GetListingAt { listing_id } => {
                QueryValue::Listing(self.listings.get_listing_at(*listing_id)?.clone())
            }
            Query::GetListingCount => QueryValue::Uint(self.listings.get_listing_count()),
            Query::GetVote { listing_id, voter } => {
                QueryValue::Vote(self.listings.get_vote(*listing_id, voter)?.clone())
            }
        };
        Ok(value)
    }

    /// Native balance of an account
    pub fn stx_balance(&self, account: &AccountId) -> u64 {
        self.native.balance_of(account)
    }

    // ========================================================================
    // INTEGRITY
    // ========================================================================

    /// Every balance ledger satisfies sum(balances) == total supply
    pub fn is_consistent(&self) -> bool {
        self.native.is_consistent() && self.fungible.values().all(BalanceLedger::is_consistent)
    }

    /// SHA-256 over the canonical encoding, hex encoded
    pub fn state_root(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_bytes());
        hex::encode(hasher.finalize())
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).unwrap_or_default()
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WorldStateError> {
        postcard::from_bytes(bytes).map_err(|_| WorldStateError::DeserializationFailed)
    }
}
