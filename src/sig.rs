//! Creation and verification of (Ethereum) signatures over channel claims.
//!
//! The protocol side only ever needs [recover_signer]; [Signer] is the
//! client/test side that holds a key and produces the 65-byte recoverable
//! signatures the ledger contracts understand.

use crate::types::Hash;
use sha3::{Digest, Keccak256};

#[cfg(feature = "k256")]
mod k256;
#[cfg(all(feature = "secp256k1", not(feature = "k256")))]
mod secp256k1;
#[cfg(not(any(feature = "k256", feature = "secp256k1")))]
mod dummy;

#[cfg(feature = "k256")]
pub use self::k256::{recover_signer, Error, Signer};
#[cfg(all(feature = "secp256k1", not(feature = "k256")))]
pub use self::secp256k1::{recover_signer, Error, Signer};
#[cfg(not(any(feature = "k256", feature = "secp256k1")))]
pub use self::dummy::{recover_signer, Error, Signer};

#[cfg(test)]
mod tests;

/// Add the `\x19Ethereum Signed Message\n<length>` prefix to hash.
///
/// This is the format expected by the Solidity contracts.
fn hash_to_eth_signed_msg_hash(hash: Hash) -> Hash {
    // Packed encoding => We can't use the serializer
    let mut hasher = Keccak256::new();
    hasher.update(b"\x19Ethereum Signed Message:\n32");
    hasher.update(hash.0);
    Hash(hasher.finalize().into())
}
