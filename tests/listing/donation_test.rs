// Donation Tests
// Tests for native, fungible and non-fungible donations routed through the registry

use helping_hands::assets::{
    BalanceLedger, FungibleAsset, FungibleMetadata, NativeLedger, NonFungibleAsset,
    OwnershipRegistry,
};
use helping_hands::identity::{AccountId, AssetId};
use helping_hands::ledger::{CallContext, Event, LedgerError, Memo, TokenUri};
use helping_hands::listing::ListingRegistry;

fn account(name: &str) -> AccountId {
    AccountId::parse(name).unwrap()
}

/// Registry with listing 0 for `wallet_1`, native ledger funding `wallet_2`
fn setup() -> (ListingRegistry, NativeLedger) {
    let mut registry = ListingRegistry::new();
    let mut ctx = CallContext::new(account("wallet_1"));
    registry
        .list_needer(&mut ctx, &account("wallet_1"), 1_000, "Rent".to_string(), None)
        .unwrap();

    let mut native = NativeLedger::new();
    native.allocate(&account("wallet_2"), 10_000).unwrap();
    (registry, native)
}

fn fungible_with(holder: &str, amount: u64) -> BalanceLedger {
    let mut ledger = BalanceLedger::new(
        AssetId::parse("deployer.ft::SM-Coin").unwrap(),
        account("deployer"),
        FungibleMetadata::default(),
    );
    let mut ctx = CallContext::new(account("deployer"));
    ledger.mint(&mut ctx, amount, &account(holder)).unwrap();
    ledger
}

/// A fungible asset that records a transfer and then rejects it
struct RejectingAsset {
    asset: AssetId,
    code: LedgerError,
}

impl FungibleAsset for RejectingAsset {
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
        ctx.emit(Event::FtTransfer {
            asset: self.asset.clone(),
            amount,
            sender: sender.clone(),
            recipient: recipient.clone(),
            memo,
        });
        Err(self.code.clone())
    }

    fn balance_of(&self, _account: &AccountId) -> u64 {
        0
    }

    fn total_supply(&self) -> u64 {
        0
    }

    fn name(&self) -> &str {
        "Rejecting"
    }

    fn symbol(&self) -> &str {
        "REJ"
    }

    fn decimals(&self) -> u8 {
        0
    }

    fn token_uri(&self) -> Option<&TokenUri> {
        None
    }
}

// ============================================================================
// STX DONATION TESTS
// ============================================================================

#[test]
fn test_donate_stx_moves_funds_to_needer() {
    let (mut registry, mut native) = setup();
    let mut ctx = CallContext::new(account("wallet_2"));

    registry.donate_stx(&mut ctx, &mut native, 0, 250).unwrap();

    assert_eq!(native.balance_of(&account("wallet_2")), 9_750);
    assert_eq!(native.balance_of(&account("wallet_1")), 250);
    assert_eq!(registry.get_listing_at(0).unwrap().amount_collected(), 250);
}

#[test]
fn test_donate_stx_emits_transfer_then_donation() {
    let (mut registry, mut native) = setup();
    let mut ctx = CallContext::new(account("wallet_2"));

    registry.donate_stx(&mut ctx, &mut native, 0, 250).unwrap();

    assert_eq!(
        ctx.events(),
        &[
            Event::StxTransfer {
                amount: 250,
                sender: account("wallet_2"),
                recipient: account("wallet_1"),
                memo: None,
            },
            Event::StxDonation {
                listing_id: 0,
                donor: account("wallet_2"),
                amount: 250,
            },
        ]
    );
}

#[test]
fn test_donate_stx_accumulates_past_goal() {
    let (mut registry, mut native) = setup();

    for _ in 0..3 {
        let mut ctx = CallContext::new(account("wallet_2"));
        registry.donate_stx(&mut ctx, &mut native, 0, 400).unwrap();
    }

    let listing = registry.get_listing_at(0).unwrap();
    assert_eq!(listing.amount_collected(), 1_200);
    assert!(listing.is_funded());
}

#[test]
fn test_donate_stx_missing_listing_code_100() {
    let (mut registry, mut native) = setup();
    let mut ctx = CallContext::new(account("wallet_2"));

    let err = registry.donate_stx(&mut ctx, &mut native, 5, 10).unwrap_err();

    assert_eq!(err.code(), Some(100));
    assert_eq!(native.balance_of(&account("wallet_2")), 10_000);
}

#[test]
fn test_donate_stx_insufficient_funds_leaves_listing_untouched() {
    let (mut registry, mut native) = setup();
    let mut ctx = CallContext::new(account("wallet_2"));

    let err = registry
        .donate_stx(&mut ctx, &mut native, 0, 10_001)
        .unwrap_err();

    assert_eq!(err.code(), Some(1));
    assert_eq!(registry.get_listing_at(0).unwrap().amount_collected(), 0);
    assert_eq!(native.balance_of(&account("wallet_1")), 0);
    assert_eq!(native.balance_of(&account("wallet_2")), 10_000);
}

#[test]
fn test_needer_donating_to_self_fails() {
    let (mut registry, mut native) = setup();
    native.allocate(&account("wallet_1"), 100).unwrap();
    let mut ctx = CallContext::new(account("wallet_1"));

    let err = registry.donate_stx(&mut ctx, &mut native, 0, 10).unwrap_err();

    assert_eq!(err, LedgerError::SelfTransfer);
    assert_eq!(registry.get_listing_at(0).unwrap().amount_collected(), 0);
}

#[test]
fn test_donate_zero_stx_fails() {
    let (mut registry, mut native) = setup();
    let mut ctx = CallContext::new(account("wallet_2"));

    let err = registry.donate_stx(&mut ctx, &mut native, 0, 0).unwrap_err();

    assert_eq!(err, LedgerError::NonPositiveAmount);
}

// ============================================================================
// FUNGIBLE DONATION TESTS
// ============================================================================

#[test]
fn test_donate_ft_transfers_from_caller() {
    let (registry, _) = setup();
    let mut token = fungible_with("wallet_2", 500);
    let mut ctx = CallContext::new(account("wallet_2"));

    registry
        .donate_ft(&mut ctx, &mut token, 200, &account("wallet_1"))
        .unwrap();

    assert_eq!(token.get_balance(&account("wallet_2")), 300);
    assert_eq!(token.get_balance(&account("wallet_1")), 200);
    match ctx.events() {
        [Event::FtTransfer { .. }, Event::FtDonation { donor, amount, .. }] => {
            assert_eq!(donor, &account("wallet_2"));
            assert_eq!(*amount, 200);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn test_donate_ft_does_not_touch_listings() {
    let (registry, _) = setup();
    let before = registry.clone();
    let mut token = fungible_with("wallet_2", 500);
    let mut ctx = CallContext::new(account("wallet_2"));

    registry
        .donate_ft(&mut ctx, &mut token, 200, &account("wallet_1"))
        .unwrap();

    assert_eq!(registry, before);
    assert_eq!(registry.get_listing_at(0).unwrap().amount_collected(), 0);
}

#[test]
fn test_donate_ft_propagates_asset_error() {
    let (registry, _) = setup();
    let mut token = fungible_with("wallet_2", 50);
    let mut ctx = CallContext::new(account("wallet_2"));

    let err = registry
        .donate_ft(&mut ctx, &mut token, 100, &account("wallet_1"))
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::InsufficientBalance {
            available: 50,
            required: 100
        }
    );
    assert_eq!(token.get_balance(&account("wallet_2")), 50);
}

#[test]
fn test_donate_ft_through_foreign_asset() {
    let (registry, _) = setup();
    let mut token = RejectingAsset {
        asset: AssetId::parse("other.coin::COIN").unwrap(),
        code: LedgerError::NotSender,
    };
    let mut ctx = CallContext::new(account("wallet_2"));

    let err = registry
        .donate_ft(&mut ctx, &mut token, 10, &account("wallet_1"))
        .unwrap_err();

    assert_eq!(err, LedgerError::NotSender);
    assert!(!ctx
        .events()
        .iter()
        .any(|event| matches!(event, Event::FtDonation { .. })));
}

// ============================================================================
// NON-FUNGIBLE DONATION TESTS
// ============================================================================

#[test]
fn test_donate_nft_transfers_ownership() {
    let (registry, _) = setup();
    let mut nft = OwnershipRegistry::new(AssetId::parse("deployer.nft::NFT").unwrap());
    let mut mint_ctx = CallContext::new(account("wallet_2"));
    let id = nft.mint(&mut mint_ctx, &account("wallet_2"), None).unwrap();
    let mut ctx = CallContext::new(account("wallet_2"));

    registry
        .donate_nft(&mut ctx, &mut nft, id, &account("wallet_1"))
        .unwrap();

    assert_eq!(nft.owner_of(id), Some(&account("wallet_1")));
    assert_eq!(
        ctx.events().last(),
        Some(&Event::NftDonation {
            asset: AssetId::parse("deployer.nft::NFT").unwrap(),
            donor: account("wallet_2"),
            recipient: account("wallet_1"),
            token_id: id,
        })
    );
}

#[test]
fn test_donate_unowned_nft_code_1() {
    let (registry, _) = setup();
    let mut nft = OwnershipRegistry::new(AssetId::parse("deployer.nft::NFT").unwrap());
    let mut mint_ctx = CallContext::new(account("wallet_3"));
    let id = nft.mint(&mut mint_ctx, &account("wallet_3"), None).unwrap();
    let mut ctx = CallContext::new(account("wallet_2"));

    let err = registry
        .donate_nft(&mut ctx, &mut nft, id, &account("wallet_1"))
        .unwrap_err();

    assert_eq!(err.code(), Some(1));
    assert_eq!(nft.get_owner(id), Some(&account("wallet_3")));
}
