//! The fund-movement port.
//!
//! The ledger never talks to a token network directly; every operation that
//! moves funds is handed a [`TokenTransfer`] capability. Pulls draw on an
//! allowance the account holder granted the ledger beforehand, pushes spend
//! the ledger's own custody. A failed transfer aborts the enclosing ledger
//! operation before any state is touched.

use std::collections::BTreeMap;

use crate::error::TokenError;
use crate::state::AccountId;

pub trait TokenTransfer {
    /// Transfer `amount` of `token` from `from` into ledger custody,
    /// consuming that much of the allowance `from` granted the ledger.
    fn pull(&mut self, token: &AccountId, from: &AccountId, amount: u128) -> Result<(), TokenError>;

    /// Transfer `amount` of `token` out of ledger custody to `to`.
    fn push(&mut self, token: &AccountId, to: &AccountId, amount: u128) -> Result<(), TokenError>;

    /// Total amount of `token` currently held in ledger custody.
    fn ledger_balance(&self, token: &AccountId) -> u128;
}

/// In-memory fungible-token ledgers, one balance table per token id.
///
/// Stands in for the real payment-token contracts in tests and examples:
/// mint, approve, then let the raffle ledger pull and push.
#[derive(Debug, Default)]
pub struct InMemoryTokens {
    balances: BTreeMap<(AccountId, AccountId), u128>,
    /// Allowance each (token, owner) granted to the raffle ledger.
    allowances: BTreeMap<(AccountId, AccountId), u128>,
    custody: BTreeMap<AccountId, u128>,
}

impl InMemoryTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, token: &AccountId, to: &AccountId, amount: u128) {
        *self.balances.entry((*token, *to)).or_default() += amount;
    }

    /// Mint straight into ledger custody, as if tokens were sent to the
    /// ledger's address outside any raffle flow.
    pub fn mint_to_ledger(&mut self, token: &AccountId, amount: u128) {
        *self.custody.entry(*token).or_default() += amount;
    }

    /// Approve the raffle ledger to pull up to `amount` from `owner`.
    pub fn approve(&mut self, token: &AccountId, owner: &AccountId, amount: u128) {
        self.allowances.insert((*token, *owner), amount);
    }

    pub fn balance_of(&self, token: &AccountId, account: &AccountId) -> u128 {
        self.balances.get(&(*token, *account)).copied().unwrap_or(0)
    }

    pub fn allowance(&self, token: &AccountId, owner: &AccountId) -> u128 {
        self.allowances.get(&(*token, *owner)).copied().unwrap_or(0)
    }
}

impl TokenTransfer for InMemoryTokens {
    fn pull(&mut self, token: &AccountId, from: &AccountId, amount: u128) -> Result<(), TokenError> {
        let allowance = self.allowances.entry((*token, *from)).or_default();
        if *allowance < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        let balance = self.balances.entry((*token, *from)).or_default();
        if *balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        *self.allowances.get_mut(&(*token, *from)).unwrap() -= amount;
        *self.balances.get_mut(&(*token, *from)).unwrap() -= amount;
        *self.custody.entry(*token).or_default() += amount;
        Ok(())
    }

    fn push(&mut self, token: &AccountId, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        let held = self.custody.entry(*token).or_default();
        if *held < amount {
            return Err(TokenError::InsufficientBalance);
        }
        *held -= amount;
        *self.balances.entry((*token, *to)).or_default() += amount;
        Ok(())
    }

    fn ledger_balance(&self, token: &AccountId) -> u128 {
        self.custody.get(token).copied().unwrap_or(0)
    }
}
