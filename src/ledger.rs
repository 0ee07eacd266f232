//! The fungible-token ledger the channel escrows value in.
//!
//! The channel never reads-then-writes ledger balances itself; it only goes
//! through the transfer primitives here, which either move the full amount
//! or leave the ledger untouched.

use crate::types::{Address, U256};

/// Ways an ERC-20 style transfer can fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The debited account does not hold `amount` tokens.
    InsufficientBalance,
    /// The allowance granted to the channel does not cover `amount`.
    InsufficientAllowance,
}

/// Handle on the token ledger, as seen from one channel's escrow account.
///
/// Implementations bind the channel's on-ledger identity: `transfer_from`
/// draws on an allowance granted *to the channel*, and `transfer` spends
/// the channel's own escrow balance.
pub trait TokenLedger {
    /// Move `amount` from `from` to `to`, consuming allowance.
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256)
        -> Result<(), LedgerError>;

    /// Move `amount` out of the channel's escrow balance to `to`.
    fn transfer(&mut self, to: Address, amount: U256) -> Result<(), LedgerError>;

    fn balance_of(&self, owner: Address) -> U256;

    fn allowance(&self, owner: Address, spender: Address) -> U256;
}

#[cfg(feature = "std")]
use std::collections::BTreeMap;

/// In-memory token ledger backing the test-suite.
///
/// A plain balance/allowance map with mint and approve helpers; not a real
/// token, just enough ERC-20 semantics to stand in for one.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct MemoryToken {
    channel: Address,
    balances: BTreeMap<Address, U256>,
    allowances: BTreeMap<(Address, Address), U256>,
}

#[cfg(feature = "std")]
impl MemoryToken {
    /// A fresh ledger bound to the given channel escrow account.
    pub fn new(channel: Address) -> Self {
        MemoryToken {
            channel,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    /// Create `amount` new tokens in `owner`'s account.
    pub fn mint(&mut self, owner: Address, amount: U256) {
        *self.balances.entry(owner).or_default() += amount;
    }

    /// Let `spender` draw up to `amount` from `owner`'s account.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.insert((owner, spender), amount);
    }
}

#[cfg(feature = "std")]
impl TokenLedger for MemoryToken {
    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let allowance = self
            .allowances
            .get(&(from, self.channel))
            .copied()
            .unwrap_or_default();
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance);
        }
        let from_balance = self.balances.get(&from).copied().unwrap_or_default();
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance);
        }

        self.allowances.insert((from, self.channel), allowance - amount);
        self.balances.insert(from, from_balance - amount);
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    fn transfer(&mut self, to: Address, amount: U256) -> Result<(), LedgerError> {
        let escrow = self.balances.get(&self.channel).copied().unwrap_or_default();
        if escrow < amount {
            return Err(LedgerError::InsufficientBalance);
        }

        self.balances.insert(self.channel, escrow - amount);
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or_default()
    }
}
