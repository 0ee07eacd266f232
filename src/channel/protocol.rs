use log::{debug, info};
use serde::Serialize;

use super::{ChannelParams, ChannelState, Phase};
use crate::{
    ledger::{LedgerError, TokenLedger},
    sig,
    types::{Address, Signature, U256},
};

#[derive(Debug)]
pub enum DepositError {
    /// Caller is not the channel's user.
    Unauthorized,
    /// The channel is no longer open.
    InvalidPhase,
    /// The escrow transfer failed; no tokens moved.
    Transfer(LedgerError),
}
impl From<LedgerError> for DepositError {
    fn from(e: LedgerError) -> Self {
        Self::Transfer(e)
    }
}

#[derive(Debug)]
pub enum CloseError {
    /// Only the user may close, on either path.
    Unauthorized,
    InvalidPhase,
    /// The claimed amount exceeds the escrowed balance.
    InsufficientFunds,
    /// No address could be recovered from the signature.
    RecoveryFailed(sig::Error),
    /// The signature recovered, but not to the recipient (contained).
    InvalidSignature(Address),
}
impl From<sig::Error> for CloseError {
    fn from(e: sig::Error) -> Self {
        Self::RecoveryFailed(e)
    }
}

#[derive(Debug)]
pub enum UpdateError {
    /// Caller is not a participant, or is the closing party itself.
    Unauthorized,
    InvalidPhase,
    /// Nonce not strictly above the accepted one; a replayed or rolled
    /// back claim.
    StaleNonce,
    InsufficientFunds,
    RecoveryFailed(sig::Error),
    /// The signature recovered, but not to the closing party (contained).
    InvalidSignature(Address),
}
impl From<sig::Error> for UpdateError {
    fn from(e: sig::Error) -> Self {
        Self::RecoveryFailed(e)
    }
}

#[derive(Debug)]
pub enum SettleError {
    InvalidPhase,
    /// The dispute window has not elapsed yet.
    TimeoutNotElapsed,
    Transfer(LedgerError),
}
impl From<LedgerError> for SettleError {
    fn from(e: LedgerError) -> Self {
        Self::Transfer(e)
    }
}

/// How a close is authorized.
#[derive(Debug, Copy, Clone)]
pub enum CloseRequest {
    /// Unilateral close declaring nothing owed; needs no counterparty
    /// signature and records the claim (0, 0).
    SelfClose,
    /// Close on the claim `(nonce, amount)`, carrying the recipient's
    /// signature over [ChannelParams::claim_hash]. Requiring the
    /// *recipient's* signature keeps the user from unilaterally declaring
    /// a favorable non-zero balance.
    SignedClose {
        nonce: u64,
        amount: U256,
        sig: Signature,
    },
}

/// One payment channel: the fixed parameters plus the mutable record,
/// driven by the four ledger-facing operations.
///
/// Each operation validates, then completes its ledger interaction, then
/// commits to the record, in that order; a rejected call leaves record and
/// ledger exactly as they were.
#[derive(Serialize, Debug)]
pub struct PaymentChannel {
    params: ChannelParams,
    state: ChannelState,
}

impl PaymentChannel {
    /// Open a channel between `params.user` and `params.recipient` with an
    /// empty escrow.
    pub fn new(params: ChannelParams) -> Self {
        PaymentChannel {
            params,
            state: ChannelState::new(),
        }
    }

    pub fn params(&self) -> &ChannelParams {
        &self.params
    }

    pub fn state(&self) -> &ChannelState {
        &self.state
    }

    /// Escrow `amount` further tokens. Only the user deposits, and only
    /// while the channel is open.
    pub fn deposit<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        amount: U256,
    ) -> Result<(), DepositError> {
        if self.state.phase() != Phase::Open {
            return Err(DepositError::InvalidPhase);
        }
        if caller != self.params.user {
            return Err(DepositError::Unauthorized);
        }

        ledger.transfer_from(self.params.user, self.params.address, amount)?;
        self.state.credit_deposit(amount);

        info!(
            "channel {:?}: deposited {}, escrow now {}",
            self.params.address,
            amount,
            self.state.token_balance()
        );
        Ok(())
    }

    /// Close the channel on a balance claim, starting the dispute window.
    ///
    /// Records `current_block` so [settle](Self::settle) can measure the
    /// timeout against it.
    pub fn close(
        &mut self,
        caller: Address,
        current_block: u64,
        request: CloseRequest,
    ) -> Result<(), CloseError> {
        if self.state.phase() != Phase::Open {
            return Err(CloseError::InvalidPhase);
        }
        if caller != self.params.user {
            return Err(CloseError::Unauthorized);
        }

        let (nonce, amount) = match request {
            CloseRequest::SelfClose => (0, U256::zero()),
            CloseRequest::SignedClose { nonce, amount, sig } => {
                if amount > self.state.token_balance() {
                    return Err(CloseError::InsufficientFunds);
                }
                let signer = sig::recover_signer(self.params.claim_hash(nonce, amount), sig)?;
                debug!(
                    "channel {:?}: close claim ({}, {}) signed by {:?}",
                    self.params.address, nonce, amount, signer
                );
                if signer != self.params.recipient {
                    return Err(CloseError::InvalidSignature(signer));
                }
                (nonce, amount)
            }
        };

        self.state.record_close(caller, current_block, nonce, amount);

        info!(
            "channel {:?}: closed at block {} on claim ({}, {})",
            self.params.address, current_block, nonce, amount
        );
        Ok(())
    }

    /// Contest the closing claim with a strictly newer one.
    ///
    /// Latest-state-wins dispute resolution: only the non-closing
    /// participant may contest, and must present the *closing party's*
    /// signature over the higher-nonce claim. Repeatable while the channel
    /// stays closed, with the nonce strictly increasing each time.
    pub fn update_closed_channel(
        &mut self,
        caller: Address,
        nonce: u64,
        amount: U256,
        sig: Signature,
    ) -> Result<(), UpdateError> {
        if self.state.phase() != Phase::Closed {
            return Err(UpdateError::InvalidPhase);
        }
        if caller != self.params.user && caller != self.params.recipient {
            return Err(UpdateError::Unauthorized);
        }
        if caller == self.state.closing_address() {
            return Err(UpdateError::Unauthorized);
        }
        if nonce <= self.state.closed_nonce() {
            return Err(UpdateError::StaleNonce);
        }
        if amount > self.state.token_balance() {
            return Err(UpdateError::InsufficientFunds);
        }
        let signer = sig::recover_signer(self.params.claim_hash(nonce, amount), sig)?;
        debug!(
            "channel {:?}: contest claim ({}, {}) signed by {:?}",
            self.params.address, nonce, amount, signer
        );
        if signer != self.state.closing_address() {
            return Err(UpdateError::InvalidSignature(signer));
        }

        self.state.record_contest(nonce, amount);

        info!(
            "channel {:?}: contested, claim now ({}, {})",
            self.params.address, nonce, amount
        );
        Ok(())
    }

    /// Pay out the escrow per the last accepted claim: `amount_owed` to the
    /// recipient, the remainder back to the user.
    ///
    /// Permitted once `current_block >= closed_block + timeout_blocks`,
    /// inclusive at the boundary. One-shot: the channel ends up settled and
    /// every later call fails with [SettleError::InvalidPhase].
    pub fn settle<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        current_block: u64,
    ) -> Result<(), SettleError> {
        if self.state.phase() != Phase::Closed {
            return Err(SettleError::InvalidPhase);
        }
        if current_block < self.state.closed_block().saturating_add(self.params.timeout_blocks) {
            return Err(SettleError::TimeoutNotElapsed);
        }

        let owed = self.state.amount_owed();
        let refund = self.state.token_balance() - owed;

        // Both payouts must land or neither: with the escrow covering the
        // full balance up front, the second transfer cannot fail once the
        // first went through on a consistent ledger.
        if ledger.balance_of(self.params.address) < self.state.token_balance() {
            return Err(SettleError::Transfer(LedgerError::InsufficientBalance));
        }
        if owed > U256::zero() {
            ledger.transfer(self.params.recipient, owed)?;
        }
        if refund > U256::zero() {
            ledger.transfer(self.params.user, refund)?;
        }

        self.state.record_settlement();

        info!(
            "channel {:?}: settled at block {}, {} to recipient, {} refunded",
            self.params.address, current_block, owed, refund
        );
        Ok(())
    }
}
