// Genesis configuration - what exists before the first call
// Builder-style, validated once, loadable from JSON

use crate::assets::FungibleMetadata;
use crate::identity::{AccountId, AssetId, ContractId, IdentityError};
use crate::ledger::TokenUri;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

const MAX_DECIMALS: u8 = 18;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdentityError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Duplicate genesis allocation for {0}")]
    DuplicateAllocation(AccountId),

    #[error("Genesis allocations overflow the native supply")]
    SupplyOverflow,

    #[error("Contract already deployed: {0}")]
    ContractExists(ContractId),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings of the fungible asset deployed at genesis
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleConfig {
    #[serde(default = "default_ft_contract")]
    pub contract_name: String,
    #[serde(default)]
    pub metadata: FungibleMetadata,
}

impl Default for FungibleConfig {
    fn default() -> Self {
        Self {
            contract_name: default_ft_contract(),
            metadata: FungibleMetadata::default(),
        }
    }
}

/// Settings of the non-fungible asset deployed at genesis
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFungibleConfig {
    #[serde(default = "default_nft_contract")]
    pub contract_name: String,
    #[serde(default = "default_nft_asset")]
    pub asset_name: String,
}

impl Default for NonFungibleConfig {
    fn default() -> Self {
        Self {
            contract_name: default_nft_contract(),
            asset_name: default_nft_asset(),
        }
    }
}

/// Native currency credited to an account at genesis
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub account: AccountId,
    pub amount: u64,
}

fn default_ft_contract() -> String {
    "ft".to_string()
}

fn default_nft_contract() -> String {
    "nft".to_string()
}

fn default_nft_asset() -> String {
    "NFT".to_string()
}

fn default_registry_contract() -> String {
    "helpingHands".to_string()
}

/// Everything needed to build the initial world state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Deploys every genesis contract and is the privileged minter of the fungible asset
    pub deployer: AccountId,
    #[serde(default)]
    pub fungible: FungibleConfig,
    #[serde(default)]
    pub non_fungible: NonFungibleConfig,
    #[serde(default = "default_registry_contract")]
    pub registry_contract: String,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
}

impl GenesisConfig {
    /// Create a config with default contracts deployed by `deployer`
    pub fn new(deployer: AccountId) -> Self {
        Self {
            deployer,
            fungible: FungibleConfig::default(),
            non_fungible: NonFungibleConfig::default(),
            registry_contract: default_registry_contract(),
            allocations: Vec::new(),
        }
    }

    /// Add a native currency allocation
    pub fn with_allocation(mut self, account: AccountId, amount: u64) -> Self {
        self.allocations.push(Allocation { account, amount });
        self
    }

    pub fn with_fungible_metadata(mut self, metadata: FungibleMetadata) -> Self {
        self.fungible.metadata = metadata;
        self
    }

    pub fn with_fungible_token_uri(mut self, token_uri: Option<TokenUri>) -> Self {
        self.fungible.metadata.token_uri = token_uri;
        self
    }

    pub fn with_fungible_contract(mut self, name: &str) -> Self {
        self.fungible.contract_name = name.to_string();
        self
    }

    pub fn with_non_fungible_contract(mut self, name: &str, asset_name: &str) -> Self {
        self.non_fungible.contract_name = name.to_string();
        self.non_fungible.asset_name = asset_name.to_string();
        self
    }

    pub fn with_registry_contract(mut self, name: &str) -> Self {
        self.registry_contract = name.to_string();
        self
    }

    /// Load from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse from a JSON string
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GenesisConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    // ========================================================================
    // DERIVED IDENTIFIERS
    // ========================================================================

    pub fn fungible_contract(&self) -> Result<ContractId, ConfigError> {
        Ok(ContractId::new(self.deployer.clone(), &self.fungible.contract_name)?)
    }

    pub fn fungible_asset(&self) -> Result<AssetId, ConfigError> {
        Ok(AssetId::new(self.fungible_contract()?, &self.fungible.metadata.name)?)
    }

    pub fn non_fungible_contract(&self) -> Result<ContractId, ConfigError> {
        Ok(ContractId::new(self.deployer.clone(), &self.non_fungible.contract_name)?)
    }

    pub fn non_fungible_asset(&self) -> Result<AssetId, ConfigError> {
        Ok(AssetId::new(self.non_fungible_contract()?, &self.non_fungible.asset_name)?)
    }

    pub fn registry_contract_id(&self) -> Result<ContractId, ConfigError> {
        Ok(ContractId::new(self.deployer.clone(), &self.registry_contract)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fungible_asset()?;
        self.non_fungible_asset()?;
        self.registry_contract_id()?;

        let names: BTreeSet<&str> = [
            self.fungible.contract_name.as_str(),
            self.non_fungible.contract_name.as_str(),
            self.registry_contract.as_str(),
        ]
        .into_iter()
        .collect();
        if names.len() != 3 {
            return Err(ConfigError::Invalid(
                "genesis contract names must be distinct".to_string(),
            ));
        }

        if self.fungible.metadata.decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "decimals cannot exceed {}",
                MAX_DECIMALS
            )));
        }
        if self.fungible.metadata.symbol.is_empty() {
            return Err(ConfigError::Invalid("symbol cannot be empty".to_string()));
        }

        let mut seen = BTreeSet::new();
        let mut supply = 0u64;
        for allocation in &self.allocations {
            if !seen.insert(&allocation.account) {
                return Err(ConfigError::DuplicateAllocation(allocation.account.clone()));
            }
            supply = supply
                .checked_add(allocation.amount)
                .ok_or(ConfigError::SupplyOverflow)?;
        }
        Ok(())
    }
}
