// Account, contract and asset identifiers
// Every map in the ledger is keyed by one of these

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MAX_IDENTIFIER_LEN: usize = 128;
const CONTRACT_SEPARATOR: char = '.';
const ASSET_SEPARATOR: &str = "::";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identifier cannot be empty")]
    Empty,

    #[error("Identifier too long: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("Invalid character {ch:?} in identifier '{value}'")]
    InvalidCharacter { value: String, ch: char },

    #[error("Invalid contract identifier '{0}': expected <deployer>.<name>")]
    InvalidContract(String),

    #[error("Invalid asset identifier '{0}': expected <deployer>.<contract>::<asset>")]
    InvalidAsset(String),
}

/// Check a single identifier segment (account, contract or asset name)
fn validate_segment(value: &str) -> Result<(), IdentityError> {
    if value.is_empty() {
        return Err(IdentityError::Empty);
    }
    let len = value.chars().count();
    if len > MAX_IDENTIFIER_LEN {
        return Err(IdentityError::TooLong {
            len,
            max: MAX_IDENTIFIER_LEN,
        });
    }
    if let Some(ch) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(IdentityError::InvalidCharacter {
            value: value.to_string(),
            ch,
        });
    }
    Ok(())
}

// ============================================================================
// ACCOUNT ID
// ============================================================================

/// Opaque identifier of a participant (the `tx-sender` of a call)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Parse and validate an account identifier
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        validate_segment(s)?;
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_segment(&value)?;
        Ok(Self(value))
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

// ============================================================================
// CONTRACT ID
// ============================================================================

/// Identifier of a deployed registry: `<deployer>.<name>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractId {
    deployer: AccountId,
    name: String,
}

impl ContractId {
    /// Create a contract identifier from its parts
    pub fn new(deployer: AccountId, name: &str) -> Result<Self, IdentityError> {
        validate_segment(name)?;
        Ok(Self {
            deployer,
            name: name.to_string(),
        })
    }

    /// Parse `<deployer>.<name>`
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        let (deployer, name) = s
            .split_once(CONTRACT_SEPARATOR)
            .ok_or_else(|| IdentityError::InvalidContract(s.to_string()))?;
        Self::new(AccountId::parse(deployer)?, name)
    }

    pub fn deployer(&self) -> &AccountId {
        &self.deployer
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.deployer, CONTRACT_SEPARATOR, self.name)
    }
}

impl FromStr for ContractId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ContractId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ContractId> for String {
    fn from(id: ContractId) -> Self {
        id.to_string()
    }
}

// ============================================================================
// ASSET ID
// ============================================================================

/// Fully qualified asset identifier carried by mint and transfer events:
/// `<deployer>.<contract>::<asset>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId {
    contract: ContractId,
    name: String,
}

impl AssetId {
    pub fn new(contract: ContractId, name: &str) -> Result<Self, IdentityError> {
        validate_segment(name)?;
        Ok(Self {
            contract,
            name: name.to_string(),
        })
    }

    /// Parse `<deployer>.<contract>::<asset>`
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        let (contract, name) = s
            .split_once(ASSET_SEPARATOR)
            .ok_or_else(|| IdentityError::InvalidAsset(s.to_string()))?;
        Self::new(ContractId::parse(contract)?, name)
    }

    /// The contract that defines this asset
    pub fn contract(&self) -> &ContractId {
        &self.contract
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.contract, ASSET_SEPARATOR, self.name)
    }
}

impl FromStr for AssetId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AssetId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.to_string()
    }
}
