// Listing Registry - the orchestrator
// Listings, votes, and donation flows over native currency and external assets

use crate::assets::{FungibleAsset, NativeLedger, NonFungibleAsset};
use crate::identity::AccountId;
use crate::ledger::{CallContext, ContactInfo, Event, LedgerError};
use crate::listing::model::{Listing, Vote};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All listings and votes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRegistry {
    listings: BTreeMap<u64, Listing>,
    /// listing id -> voter -> vote; at most one vote per (listing, voter)
    votes: BTreeMap<u64, BTreeMap<AccountId, Vote>>,
    /// Next listing id; equals the number of successful registrations
    listing_count: u64,
}

impl ListingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn listing(&self, listing_id: u64) -> Result<&Listing, LedgerError> {
        self.listings
            .get(&listing_id)
            .ok_or(LedgerError::ListingNotFound(listing_id))
    }

    fn listing_mut(&mut self, listing_id: u64) -> Result<&mut Listing, LedgerError> {
        self.listings
            .get_mut(&listing_id)
            .ok_or(LedgerError::ListingNotFound(listing_id))
    }

    // ========================================================================
    // LISTINGS
    // ========================================================================

    /// Register a funding request on behalf of `needer`.
    ///
    /// The caller does not have to be the needer: sponsored registration is
    /// allowed. Returns the new listing id.
    pub fn list_needer(
        &mut self,
        ctx: &mut CallContext,
        needer: &AccountId,
        amount_needed: u64,
        description: String,
        contact_info: Option<ContactInfo>,
    ) -> Result<u64, LedgerError> {
        let listing_id = self.listing_count;
        let next = listing_id
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.listings.insert(
            listing_id,
            Listing::new(listing_id, needer.clone(), amount_needed, description, contact_info),
        );
        self.listing_count = next;

        ctx.emit(Event::ListingRegistered {
            listing_id,
            needer: needer.clone(),
            amount_needed,
        });
        Ok(listing_id)
    }

    /// Replace the contact info of a listing. Only its needer may do this.
    pub fn edit_contact_info(
        &mut self,
        ctx: &mut CallContext,
        listing_id: u64,
        contact_info: Option<ContactInfo>,
    ) -> Result<(), LedgerError> {
        let listing = self.listing_mut(listing_id)?;
        if !ctx.is_caller(listing.needer()) {
            return Err(LedgerError::NotNeeder);
        }
        listing.set_contact_info(contact_info);

        ctx.emit(Event::ContactInfoUpdated { listing_id });
        Ok(())
    }

    pub fn get_listing_at(&self, listing_id: u64) -> Result<&Listing, LedgerError> {
        self.listing(listing_id)
    }

    pub fn get_listing_count(&self) -> u64 {
        self.listing_count
    }

    /// Listings registered for `needer`, in id order
    pub fn listings_by_needer(&self, needer: &AccountId) -> Vec<&Listing> {
        self.listings
            .values()
            .filter(|listing| listing.needer() == needer)
            .collect()
    }

    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }

    // ========================================================================
    // VOTES
    // ========================================================================

    /// Record the caller's vote on a listing
    pub fn vote_listing(
        &mut self,
        ctx: &mut CallContext,
        listing_id: u64,
        upvote: bool,
        comment: String,
    ) -> Result<(), LedgerError> {
        let voter = ctx.caller().clone();
        let listing = self
            .listings
            .get_mut(&listing_id)
            .ok_or(LedgerError::ListingNotFound(listing_id))?;
        if listing.needer() == &voter {
            return Err(LedgerError::SelfVote);
        }
        if self
            .votes
            .get(&listing_id)
            .is_some_and(|ballots| ballots.contains_key(&voter))
        {
            return Err(LedgerError::AlreadyVoted);
        }
        let counts = listing
            .checked_record_vote(upvote)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        listing.set_vote_counts(counts);
        self.votes
            .entry(listing_id)
            .or_default()
            .insert(voter.clone(), Vote::new(listing_id, voter.clone(), upvote, comment));

        ctx.emit(Event::VoteRecorded {
            listing_id,
            voter,
            upvote,
        });
        Ok(())
    }

    pub fn get_vote(&self, listing_id: u64, voter: &AccountId) -> Result<&Vote, LedgerError> {
        self.votes
            .get(&listing_id)
            .and_then(|ballots| ballots.get(voter))
            .ok_or(LedgerError::VoteNotFound)
    }

    /// All votes on a listing, ordered by voter
    pub fn votes_for(&self, listing_id: u64) -> Vec<&Vote> {
        self.votes
            .get(&listing_id)
            .map(|ballots| ballots.values().collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // DONATIONS
    // ========================================================================

    /// Donate native currency from the caller to a listing's needer
    pub fn donate_stx(
        &mut self,
        ctx: &mut CallContext,
        native: &mut NativeLedger,
        listing_id: u64,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let donor = ctx.caller().clone();
        let listing = self.listing_mut(listing_id)?;
        let collected = listing
            .amount_collected()
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        native.transfer(ctx, amount, &donor, listing.needer(), None)?;
        listing.set_amount_collected(collected);

        ctx.emit(Event::StxDonation {
            listing_id,
            donor,
            amount,
        });
        Ok(())
    }

    /// Donate a fungible asset through its capability interface.
    /// Errors raised by the asset registry are returned unchanged.
    pub fn donate_ft(
        &self,
        ctx: &mut CallContext,
        token: &mut dyn FungibleAsset,
        amount: u64,
        recipient: &AccountId,
    ) -> Result<(), LedgerError> {
        let donor = ctx.caller().clone();
        token.transfer(ctx, amount, &donor, recipient, None)?;

        ctx.emit(Event::FtDonation {
            asset: token.asset_id().clone(),
            donor,
            recipient: recipient.clone(),
            amount,
        });
        Ok(())
    }

    /// Donate a single non-fungible token through its capability interface
    pub fn donate_nft(
        &self,
        ctx: &mut CallContext,
        token: &mut dyn NonFungibleAsset,
        token_id: u64,
        recipient: &AccountId,
    ) -> Result<(), LedgerError> {
        let donor = ctx.caller().clone();
        token.transfer(ctx, token_id, &donor, recipient)?;

        ctx.emit(Event::NftDonation {
            asset: token.asset_id().clone(),
            donor,
            recipient: recipient.clone(),
            token_id,
        });
        Ok(())
    }
}
