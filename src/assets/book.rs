// Balance book - per-account balances plus total supply
// Shared by the fungible ledger and the native currency ledger

use crate::identity::AccountId;
use crate::ledger::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Balances of one asset. Invariant: the sum of all balances equals `total_supply`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct BalanceBook {
    balances: BTreeMap<AccountId, u64>,
    total_supply: u64,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Create `amount` new units in `account`. A zero mint reports code 1,
    /// unlike a zero transfer.
    pub fn issue(&mut self, account: &AccountId, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroMint);
        }
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        // Cannot overflow once the supply fits
        let balance = self.balance_of(account) + amount;

        self.total_supply = total_supply;
        self.balances.insert(account.clone(), balance);
        Ok(())
    }

    /// Move `amount` between two accounts; nothing changes on error
    pub fn move_units(
        &mut self,
        amount: u64,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        if sender == recipient {
            return Err(LedgerError::SelfTransfer);
        }
        let available = self.balance_of(sender);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                required: amount,
            });
        }
        let credited = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.balances.insert(sender.clone(), available - amount);
        self.balances.insert(recipient.clone(), credited);
        Ok(())
    }

    /// Accounts with an entry, in account order
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, u64)> {
        self.balances.iter().map(|(account, balance)| (account, *balance))
    }

    /// Check the supply invariant
    pub fn is_consistent(&self) -> bool {
        self.balances
            .values()
            .try_fold(0u64, |acc, b| acc.checked_add(*b))
            == Some(self.total_supply)
    }
}
