// Native Ledger - balances of the native currency
// Supply exists only through genesis allocations

use crate::assets::book::BalanceBook;
use crate::identity::AccountId;
use crate::ledger::{CallContext, Event, LedgerError, Memo};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeLedger {
    book: BalanceBook,
}

impl NativeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a genesis allocation. Not reachable from any call.
    pub fn allocate(&mut self, account: &AccountId, amount: u64) -> Result<(), LedgerError> {
        self.book.issue(account, amount)
    }

    /// Transfer native currency; the caller must be the sender
    pub fn transfer(
        &mut self,
        ctx: &mut CallContext,
        amount: u64,
        sender: &AccountId,
        recipient: &AccountId,
        memo: Option<Memo>,
    ) -> Result<(), LedgerError> {
        if !ctx.is_caller(sender) {
            return Err(LedgerError::NotSender);
        }
        self.book.move_units(amount, sender, recipient)?;

        ctx.emit(Event::StxTransfer {
            amount,
            sender: sender.clone(),
            recipient: recipient.clone(),
            memo,
        });
        Ok(())
    }

    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.book.balance_of(account)
    }

    pub fn total_supply(&self) -> u64 {
        self.book.total_supply()
    }

    pub fn holders(&self) -> Vec<(&AccountId, u64)> {
        self.book.holders().collect()
    }

    pub fn is_consistent(&self) -> bool {
        self.book.is_consistent()
    }
}
