// Account Tests
// Tests for account, contract and asset identifiers

use helping_hands::identity::{AccountId, AssetId, ContractId, IdentityError};
use std::collections::BTreeSet;

// ============================================================================
// ACCOUNT ID TESTS
// ============================================================================

#[test]
fn test_account_parse_valid() {
    let account = AccountId::parse("wallet_1").unwrap();

    assert_eq!(account.as_str(), "wallet_1");
    assert_eq!(account.to_string(), "wallet_1");
}

#[test]
fn test_account_parse_principal_style() {
    let account = AccountId::parse("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap();

    assert_eq!(account.as_str().len(), 41);
}

#[test]
fn test_account_rejects_empty() {
    assert_eq!(AccountId::parse(""), Err(IdentityError::Empty));
}

#[test]
fn test_account_rejects_whitespace() {
    let err = AccountId::parse("wallet 1").unwrap_err();

    assert!(matches!(err, IdentityError::InvalidCharacter { ch: ' ', .. }));
}

#[test]
fn test_account_rejects_too_long() {
    let long = "a".repeat(129);
    let err = AccountId::parse(&long).unwrap_err();

    assert!(matches!(err, IdentityError::TooLong { len: 129, max: 128 }));
}

#[test]
fn test_account_accepts_max_length() {
    let max = "a".repeat(128);

    assert!(AccountId::parse(&max).is_ok());
}

#[test]
fn test_account_from_str() {
    let account: AccountId = "deployer".parse().unwrap();

    assert_eq!(account, AccountId::parse("deployer").unwrap());
}

#[test]
fn test_account_ordering_is_lexicographic() {
    let accounts: BTreeSet<AccountId> = ["wallet_2", "deployer", "wallet_1"]
        .iter()
        .map(|name| AccountId::parse(name).unwrap())
        .collect();

    let names: Vec<&str> = accounts.iter().map(AccountId::as_str).collect();
    assert_eq!(names, vec!["deployer", "wallet_1", "wallet_2"]);
}

#[test]
fn test_account_json_roundtrip() {
    let account = AccountId::parse("wallet_1").unwrap();
    let json = serde_json::to_string(&account).unwrap();

    assert_eq!(json, "\"wallet_1\"");
    assert_eq!(serde_json::from_str::<AccountId>(&json).unwrap(), account);
}

#[test]
fn test_account_json_rejects_invalid() {
    assert!(serde_json::from_str::<AccountId>("\"bad name\"").is_err());
}

// ============================================================================
// CONTRACT ID TESTS
// ============================================================================

#[test]
fn test_contract_parse() {
    let contract = ContractId::parse("deployer.helpingHands").unwrap();

    assert_eq!(contract.deployer().as_str(), "deployer");
    assert_eq!(contract.name(), "helpingHands");
    assert_eq!(contract.to_string(), "deployer.helpingHands");
}

#[test]
fn test_contract_new_matches_parse() {
    let deployer = AccountId::parse("deployer").unwrap();
    let contract = ContractId::new(deployer, "ft").unwrap();

    assert_eq!(contract, ContractId::parse("deployer.ft").unwrap());
}

#[test]
fn test_contract_rejects_missing_separator() {
    let err = ContractId::parse("deployer").unwrap_err();

    assert!(matches!(err, IdentityError::InvalidContract(_)));
}

#[test]
fn test_contract_rejects_empty_name() {
    assert!(ContractId::parse("deployer.").is_err());
}

// ============================================================================
// ASSET ID TESTS
// ============================================================================

#[test]
fn test_asset_parse_fungible() {
    let asset = AssetId::parse("deployer.ft::SM-Coin").unwrap();

    assert_eq!(asset.contract().to_string(), "deployer.ft");
    assert_eq!(asset.name(), "SM-Coin");
    assert_eq!(asset.to_string(), "deployer.ft::SM-Coin");
}

#[test]
fn test_asset_parse_non_fungible() {
    let asset = AssetId::parse("deployer.nft::NFT").unwrap();

    assert_eq!(asset.contract().name(), "nft");
    assert_eq!(asset.name(), "NFT");
}

#[test]
fn test_asset_rejects_missing_asset_name() {
    let err = AssetId::parse("deployer.ft").unwrap_err();

    assert!(matches!(err, IdentityError::InvalidAsset(_)));
}

#[test]
fn test_asset_json_roundtrip() {
    let asset = AssetId::parse("deployer.nft::NFT").unwrap();
    let json = serde_json::to_string(&asset).unwrap();

    assert_eq!(serde_json::from_str::<AssetId>(&json).unwrap(), asset);
}
