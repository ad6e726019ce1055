// Listing and Vote records

use crate::identity::AccountId;
use crate::ledger::ContactInfo;
use serde::{Deserialize, Serialize};

/// A registered funding request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    id: u64,
    needer: AccountId,
    amount_needed: u64,
    description: String,
    contact_info: Option<ContactInfo>,
    amount_collected: u64,
    upvote_count: u64,
    downvote_count: u64,
}

impl Listing {
    pub(crate) fn new(
        id: u64,
        needer: AccountId,
        amount_needed: u64,
        description: String,
        contact_info: Option<ContactInfo>,
    ) -> Self {
        Self {
            id,
            needer,
            amount_needed,
            description,
            contact_info,
            amount_collected: 0,
            upvote_count: 0,
            downvote_count: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn needer(&self) -> &AccountId {
        &self.needer
    }

    pub fn amount_needed(&self) -> u64 {
        self.amount_needed
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn contact_info(&self) -> Option<&ContactInfo> {
        self.contact_info.as_ref()
    }

    /// Running total of native currency donated; never capped
    pub fn amount_collected(&self) -> u64 {
        self.amount_collected
    }

    pub fn upvote_count(&self) -> u64 {
        self.upvote_count
    }

    pub fn downvote_count(&self) -> u64 {
        self.downvote_count
    }

    /// Whether donations have reached the requested amount.
    /// Informational: a listing keeps accepting donations either way.
    pub fn is_funded(&self) -> bool {
        self.amount_collected >= self.amount_needed
    }

    pub(crate) fn set_contact_info(&mut self, contact_info: Option<ContactInfo>) {
        self.contact_info = contact_info;
    }

    pub(crate) fn checked_record_vote(&self, upvote: bool) -> Option<(u64, u64)> {
        if upvote {
            Some((self.upvote_count.checked_add(1)?, self.downvote_count))
        } else {
            Some((self.upvote_count, self.downvote_count.checked_add(1)?))
        }
    }

    pub(crate) fn set_vote_counts(&mut self, (upvotes, downvotes): (u64, u64)) {
        self.upvote_count = upvotes;
        self.downvote_count = downvotes;
    }

    pub(crate) fn set_amount_collected(&mut self, amount: u64) {
        self.amount_collected = amount;
    }
}

/// One account's opinion of a listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    listing_id: u64,
    voter: AccountId,
    upvote: bool,
    comment: String,
}

impl Vote {
    pub(crate) fn new(listing_id: u64, voter: AccountId, upvote: bool, comment: String) -> Self {
        Self {
            listing_id,
            voter,
            upvote,
            comment,
        }
    }

    pub fn listing_id(&self) -> u64 {
        self.listing_id
    }

    pub fn voter(&self) -> &AccountId {
        &self.voter
    }

    pub fn upvote(&self) -> bool {
        self.upvote
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}
