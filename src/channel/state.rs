use crate::types::{Address, U256};
use serde::Serialize;

/// Lifecycle phase of a channel.
///
/// Transitions are linear: `Open → Closed → Settled`, no reverse edges.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Accepting deposits; no close recorded yet.
    Open,
    /// A close was recorded; the claim can still be contested until the
    /// channel settles.
    Closed,
    /// Funds paid out. Absorbing: every further operation is rejected.
    Settled,
}

/// The authoritative record of one channel.
///
/// Pure data: all mutation goes through [PaymentChannel](super::PaymentChannel)
/// operations, which validate before committing here. The commit methods
/// assert the record invariants, so a bug in the validation layer trips in
/// tests instead of corrupting the record silently.
#[derive(Serialize, Debug, Copy, Clone)]
pub struct ChannelState {
    phase: Phase,
    token_balance: U256,
    closed_block: u64,
    closing_address: Address,
    closed_nonce: u64,
    amount_owed: U256,
}

impl ChannelState {
    pub(crate) fn new() -> Self {
        ChannelState {
            phase: Phase::Open,
            token_balance: U256::zero(),
            closed_block: 0,
            closing_address: Address::default(),
            closed_nonce: 0,
            amount_owed: U256::zero(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Tokens currently escrowed: deposited, not yet settled.
    pub fn token_balance(&self) -> U256 {
        self.token_balance
    }

    /// Ledger height at which the close was recorded; 0 while open.
    pub fn closed_block(&self) -> u64 {
        self.closed_block
    }

    /// Who initiated the close; the zero address while open.
    pub fn closing_address(&self) -> Address {
        self.closing_address
    }

    /// Highest nonce accepted from a close or contest so far.
    pub fn closed_nonce(&self) -> u64 {
        self.closed_nonce
    }

    /// Amount owed to the recipient as of `closed_nonce`.
    pub fn amount_owed(&self) -> U256 {
        self.amount_owed
    }

    pub(crate) fn credit_deposit(&mut self, amount: U256) {
        debug_assert_eq!(self.phase, Phase::Open);
        self.token_balance += amount;
        self.debug_assert_valid();
    }

    pub(crate) fn record_close(&mut self, closer: Address, block: u64, nonce: u64, amount: U256) {
        debug_assert_eq!(self.phase, Phase::Open);
        // A close cannot land in the genesis block, so 0 stays usable as
        // the "never closed" sentinel.
        debug_assert!(block > 0);

        self.phase = Phase::Closed;
        self.closed_block = block;
        self.closing_address = closer;
        self.closed_nonce = nonce;
        self.amount_owed = amount;
        self.debug_assert_valid();
    }

    pub(crate) fn record_contest(&mut self, nonce: u64, amount: U256) {
        debug_assert_eq!(self.phase, Phase::Closed);
        debug_assert!(nonce > self.closed_nonce);

        self.closed_nonce = nonce;
        self.amount_owed = amount;
        self.debug_assert_valid();
    }

    pub(crate) fn record_settlement(&mut self) {
        debug_assert_eq!(self.phase, Phase::Closed);

        self.phase = Phase::Settled;
        self.token_balance = U256::zero();
        self.amount_owed = U256::zero();
        self.debug_assert_valid();
    }

    /// The record invariants, re-checked after every accepting transition.
    fn debug_assert_valid(&self) {
        debug_assert!(self.amount_owed <= self.token_balance);
        debug_assert_eq!(self.phase == Phase::Open, self.closed_block == 0);
        debug_assert_eq!(
            self.phase == Phase::Open,
            self.closing_address == Address::default()
        );
    }
}
