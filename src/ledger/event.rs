// Events emitted by successful calls
// Failed calls emit nothing: their buffered events are dropped with the staged state

use crate::identity::{AccountId, AssetId};
use crate::ledger::text::Memo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured record of one effect of a call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    FtMint {
        asset: AssetId,
        amount: u64,
        recipient: AccountId,
    },
    FtTransfer {
        asset: AssetId,
        amount: u64,
        sender: AccountId,
        recipient: AccountId,
        memo: Option<Memo>,
    },
    NftMint {
        asset: AssetId,
        token_id: u64,
        recipient: AccountId,
    },
    NftTransfer {
        asset: AssetId,
        token_id: u64,
        sender: AccountId,
        recipient: AccountId,
    },
    StxTransfer {
        amount: u64,
        sender: AccountId,
        recipient: AccountId,
        memo: Option<Memo>,
    },
    ListingRegistered {
        listing_id: u64,
        needer: AccountId,
        amount_needed: u64,
    },
    ContactInfoUpdated {
        listing_id: u64,
    },
    VoteRecorded {
        listing_id: u64,
        voter: AccountId,
        upvote: bool,
    },
    StxDonation {
        listing_id: u64,
        donor: AccountId,
        amount: u64,
    },
    FtDonation {
        asset: AssetId,
        donor: AccountId,
        recipient: AccountId,
        amount: u64,
    },
    NftDonation {
        asset: AssetId,
        donor: AccountId,
        recipient: AccountId,
        token_id: u64,
    },
}

impl Event {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Event::FtMint { .. } => "ft_mint",
            Event::FtTransfer { .. } => "ft_transfer",
            Event::NftMint { .. } => "nft_mint",
            Event::NftTransfer { .. } => "nft_transfer",
            Event::StxTransfer { .. } => "stx_transfer",
            Event::ListingRegistered { .. } => "listing_registered",
            Event::ContactInfoUpdated { .. } => "contact_info_updated",
            Event::VoteRecorded { .. } => "vote_recorded",
            Event::StxDonation { .. } => "stx_donation",
            Event::FtDonation { .. } => "ft_donation",
            Event::NftDonation { .. } => "nft_donation",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::FtMint { asset, amount, recipient } => {
                write!(f, "ft_mint {} {} -> {}", asset, amount, recipient)
            }
            Event::FtTransfer { asset, amount, sender, recipient, .. } => {
                write!(f, "ft_transfer {} {} {} -> {}", asset, amount, sender, recipient)
            }
            Event::NftMint { asset, token_id, recipient } => {
                write!(f, "nft_mint {} #{} -> {}", asset, token_id, recipient)
            }
            Event::NftTransfer { asset, token_id, sender, recipient } => {
                write!(f, "nft_transfer {} #{} {} -> {}", asset, token_id, sender, recipient)
            }
            Event::StxTransfer { amount, sender, recipient, .. } => {
                write!(f, "stx_transfer {} {} -> {}", amount, sender, recipient)
            }
            Event::ListingRegistered { listing_id, needer, amount_needed } => {
                write!(
                    f,
                    "listing_registered #{} needer={} needed={}",
                    listing_id, needer, amount_needed
                )
            }
            Event::ContactInfoUpdated { listing_id } => {
                write!(f, "contact_info_updated #{}", listing_id)
            }
            Event::VoteRecorded { listing_id, voter, upvote } => {
                let direction = if *upvote { "up" } else { "down" };
                write!(f, "vote_recorded #{} {} {}", listing_id, voter, direction)
            }
            Event::StxDonation { listing_id, donor, amount } => {
                write!(f, "stx_donation #{} {} from {}", listing_id, amount, donor)
            }
            Event::FtDonation { asset, donor, recipient, amount } => {
                write!(f, "ft_donation {} {} {} -> {}", asset, amount, donor, recipient)
            }
            Event::NftDonation { asset, donor, recipient, token_id } => {
                write!(f, "nft_donation {} #{} {} -> {}", asset, token_id, donor, recipient)
            }
        }
    }
}
