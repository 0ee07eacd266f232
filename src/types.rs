use core::fmt::Debug;

use rand::{distributions::Standard, prelude::Distribution};
use serde::Serialize;
use uint::construct_uint;

macro_rules! impl_hex_debug {
    ($T:ident) => {
        impl Debug for $T {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("0x")?;
                for b in self.0 {
                    f.write_fmt(format_args!("{:02x}", b))?;
                }
                Ok(())
            }
        }
    };
}

macro_rules! bytes_newtype {
    ( $T:ident, $N:literal ) => {
        #[derive(PartialEq, Eq, Copy, Clone)]
        pub struct $T(pub [u8; $N]);

        impl Serialize for $T {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_bytes(&self.0)
            }
        }

        impl Distribution<$T> for Standard {
            fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> $T {
                $T(rng.gen())
            }
        }

        impl Default for $T {
            fn default() -> Self {
                Self([0; $N])
            }
        }

        impl_hex_debug!($T);
    };
}

bytes_newtype!(Hash, 32);

bytes_newtype!(Signature, 65);
impl Signature {
    /// Assemble a signature from the 64-byte `r‖s` half and the recovery
    /// byte `v` (already offset by 27, as the ledger expects it).
    pub fn new(rs: &[u8; 64], v: u8) -> Self {
        let mut sig: Signature = Signature([0; 65]);
        sig.0[..64].copy_from_slice(rs);
        sig.0[64] = v;
        sig
    }

    /// Reassemble the legacy decomposed `(v, r, s)` encoding.
    ///
    /// Both encodings carry the same logical signature; callers holding the
    /// decomposed triple normalize here and everything past the boundary
    /// sees only the 65-byte form.
    pub fn from_vrs(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        let mut sig: Signature = Signature([0; 65]);
        sig.0[..32].copy_from_slice(&r);
        sig.0[32..64].copy_from_slice(&s);
        sig.0[64] = v;
        sig
    }
}

// We could use primitive_types:U256 or ethereum_types::U256 here, too. Both
// serde-serialize to a hex string, which is not what we want for compact
// snapshots, and neither adds functionality over construct_uint.
construct_uint! {
    pub struct U256(4);
}

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut bytes = [0u8; 32];
        self.to_big_endian(&mut bytes);
        serializer.serialize_bytes(&bytes)
    }
}

impl Distribution<U256> for Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> U256 {
        let buf: [u8; 32] = rng.gen();
        U256::from_big_endian(&buf)
    }
}

/// A 20-byte ledger account identity (user, recipient, channel, token).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);
impl_hex_debug!(Address);

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl Distribution<Address> for Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Address {
        Address(rng.gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn hex_debug() {
        let addr = Address([0xab; 20]);
        assert_eq!(
            format!("{:?}", addr),
            "0xabababababababababababababababababababab"
        );
    }

    #[test]
    fn signature_from_vrs_matches_packed() {
        let mut rng = StdRng::seed_from_u64(0);
        let packed: Signature = rng.gen();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&packed.0[..32]);
        s.copy_from_slice(&packed.0[32..64]);
        let v = packed.0[64];

        assert_eq!(Signature::from_vrs(v, r, s), packed);

        let mut rs = [0u8; 64];
        rs.copy_from_slice(&packed.0[..64]);
        assert_eq!(Signature::new(&rs, v), packed);
    }
}
