mod protocol;
mod state;


use crate::types::{Address, Hash, U256};
use serde::Serialize;
use sha3::{Digest, Keccak256};

pub use protocol::{
    CloseError, CloseRequest, DepositError, PaymentChannel, SettleError, UpdateError,
};
pub use state::{ChannelState, Phase};

/// Parameters of one channel, fixed when it is created.
#[derive(Serialize, Debug, Copy, Clone)]
pub struct ChannelParams {
    /// The channel's stable on-ledger identity; part of every signed claim
    /// so that claims cannot be replayed across channels.
    pub address: Address,
    /// Depositor and channel opener.
    pub user: Address,
    /// Counterparty; receives `amount_owed` at settlement.
    pub recipient: Address,
    /// Length of the dispute window, in ledger blocks.
    pub timeout_blocks: u64,
}

impl ChannelParams {
    /// Hash of the balance claim `(channel, nonce, amount)`.
    ///
    /// Both the signed close path and contests authenticate a signature
    /// against this hash; they differ only in whose signature is required.
    pub fn claim_hash(&self, nonce: u64, amount: U256) -> Hash {
        // Packed encoding => We can't use the serializer. 20-byte address,
        // 32-byte big-endian integers, matching the ledger contract's
        // sha3(address, nonce, amount).
        let mut hasher = Keccak256::new();
        hasher.update(self.address.0);
        let mut slot = [0u8; 32];
        U256::from(nonce).to_big_endian(&mut slot);
        hasher.update(slot);
        amount.to_big_endian(&mut slot);
        hasher.update(slot);
        Hash(hasher.finalize().into())
    }
}
