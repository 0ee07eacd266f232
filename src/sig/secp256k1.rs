//! Signer using the secp256k1 crate (bindings to the C libsecp256k1).

use crate::types::{Address, Hash, Signature};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    All, Message, PublicKey, Secp256k1, SecretKey, ThirtyTwoByteHash,
};
use sha3::{Digest, Keccak256};

use super::hash_to_eth_signed_msg_hash;

pub use secp256k1::Error;

impl ThirtyTwoByteHash for Hash {
    fn into_32(self) -> [u8; 32] {
        self.0
    }
}

impl From<PublicKey> for Address {
    fn from(pk: PublicKey) -> Self {
        // Throw away the first byte, which is not part of the public key. It
        // is added by serialize_uncompressed due to the encoding used.
        let hash: [u8; 32] = Keccak256::digest(&pk.serialize_uncompressed()[1..]).into();

        let mut addr = Address([0; 20]);
        addr.0.copy_from_slice(&hash[32 - 20..]);
        addr
    }
}

/// Holds the signing key of one channel participant.
#[derive(Debug)]
pub struct Signer {
    secp: Secp256k1<All>,
    key: SecretKey,
    addr: Address,
}

impl Signer {
    pub fn new<R: rand::Rng + rand::CryptoRng>(rng: &mut R) -> Self {
        let secp = Secp256k1::new();
        let key = SecretKey::new(rng);
        let addr = PublicKey::from_secret_key(&secp, &key).into();
        Self { secp, key, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    /// Sign a hash as an Ethereum 65-byte recoverable signature (r‖s‖v).
    pub fn sign_eth(&self, msg: Hash) -> Signature {
        // "\x19Ethereum Signed Message:\n32" format
        let hash = hash_to_eth_signed_msg_hash(msg);

        let sig = self.secp.sign_ecdsa_recoverable(&Message::from(hash), &self.key);
        let (v, rs) = sig.serialize_compact();

        // The library only produces the canonical (low-s) solution, which
        // on-ledger recovery requires. Fail early if that ever changes.
        debug_assert!(rs[32] & 0x80 == 0);

        // v is offset by 27 on the ledger, a convention kept from Bitcoin.
        Signature::new(&rs, 27 + v.to_i32() as u8)
    }
}

/// Recover the address that produced `eth_sig` over `msg`.
///
/// `msg` is the hash of the signed data, without the `Ethereum Signed
/// Message` prefix; the prefix is applied here, mirroring [Signer::sign_eth].
pub fn recover_signer(msg: Hash, eth_sig: Signature) -> Result<Address, Error> {
    let secp = Secp256k1::new();
    let hash = hash_to_eth_signed_msg_hash(msg);

    let rs = &eth_sig.0[..64];
    let v = i32::from(eth_sig.0[64]) - 27;

    let recid = RecoveryId::from_i32(v)?;
    let sig = RecoverableSignature::from_compact(rs, recid)?;

    let pk = secp.recover_ecdsa(&Message::from(hash), &sig)?;
    Ok(pk.into())
}
