use crate::{channel::ChannelParams, types::U256, Hash};
use uint::hex::FromHex;

fn data() -> Hash {
    // The hash the protocol actually signs: a claim over a known channel.
    let params = ChannelParams {
        address: crate::Address(
            <[u8; 20]>::from_hex("5b38da6a701c568545dcfcb03fcb875f56beddc4").unwrap(),
        ),
        user: crate::Address([0x11; 20]),
        recipient: crate::Address([0x22; 20]),
        timeout_blocks: 10,
    };
    params.claim_hash(1, U256::zero())
}

macro_rules! make_sign_and_recover {
    ($name:ident, $signer:ty, $recover:path) => {
        #[test]
        fn $name() {
            use rand::{rngs::StdRng, SeedableRng};

            // Do not use that on any real device, this is just for testing.
            let mut rng = StdRng::seed_from_u64(0);
            let signer = <$signer>::new(&mut rng);

            let msg = data();
            let sig = signer.sign_eth(msg);

            let address = $recover(msg, sig).unwrap();
            assert_eq!(address, signer.address());
        }
    };
}

macro_rules! make_recover_mismatch {
    ($name:ident, $signer:ty, $recover:path) => {
        #[test]
        fn $name() {
            use rand::{rngs::StdRng, SeedableRng};

            let mut rng = StdRng::seed_from_u64(0);
            let signer = <$signer>::new(&mut rng);
            let other = <$signer>::new(&mut rng);

            // A signature by someone else recovers, but not to `signer`.
            let msg = data();
            let sig = other.sign_eth(msg);
            let address = $recover(msg, sig).unwrap();
            assert_ne!(address, signer.address());

            // Signing a different message changes the recovered address.
            let sig = signer.sign_eth(msg);
            let mut tampered = msg;
            tampered.0[0] ^= 0x01;
            match $recover(tampered, sig) {
                Ok(address) => assert_ne!(address, signer.address()),
                Err(_) => (),
            }
        }
    };
}

macro_rules! make_reject_bad_recovery_byte {
    ($name:ident, $signer:ty, $recover:path) => {
        #[test]
        fn $name() {
            use rand::{rngs::StdRng, SeedableRng};

            let mut rng = StdRng::seed_from_u64(0);
            let signer = <$signer>::new(&mut rng);

            let msg = data();
            let mut sig = signer.sign_eth(msg);

            // v bytes outside {27, 28} never come from sign_eth and must
            // not panic the recovery path.
            sig.0[64] = 99;
            assert!($recover(msg, sig).is_err());
        }
    };
}

#[cfg(all(feature = "k256", feature = "std"))]
make_sign_and_recover!(
    k256_sign_and_recover,
    super::k256::Signer,
    super::k256::recover_signer
);

#[cfg(all(feature = "k256", feature = "std"))]
make_recover_mismatch!(
    k256_recover_mismatch,
    super::k256::Signer,
    super::k256::recover_signer
);

#[cfg(all(feature = "k256", feature = "std"))]
make_reject_bad_recovery_byte!(
    k256_reject_bad_recovery_byte,
    super::k256::Signer,
    super::k256::recover_signer
);

#[cfg(all(feature = "secp256k1", not(feature = "k256")))]
make_sign_and_recover!(
    secp256k1_sign_and_recover,
    super::secp256k1::Signer,
    super::secp256k1::recover_signer
);

#[cfg(all(feature = "secp256k1", not(feature = "k256")))]
make_recover_mismatch!(
    secp256k1_recover_mismatch,
    super::secp256k1::Signer,
    super::secp256k1::recover_signer
);

#[cfg(all(feature = "secp256k1", not(feature = "k256")))]
make_reject_bad_recovery_byte!(
    secp256k1_reject_bad_recovery_byte,
    super::secp256k1::Signer,
    super::secp256k1::recover_signer
);

#[test]
fn eth_signed_msg_prefix() {
    // Known-good value for the prefixed form of claim_hash(channel, 1, 0),
    // checked against the contract-side hashing.
    let prefixed = super::hash_to_eth_signed_msg_hash(data());
    let expected = Hash(
        <[u8; 32]>::from_hex("3f3a22fbe09fab9724c61e6cf6c841eea23cd0c53dc6d061a9b16d19874e5d50")
            .unwrap(),
    );
    assert_eq!(prefixed, expected);
}
