//! Dummy signer that always panics. Fallback if no signer feature flag is
//! selected.

use crate::types::{Address, Hash, Signature};

#[derive(Debug)]
pub struct Error {}

#[derive(Debug)]
pub struct Signer {}

impl Signer {
    pub fn address(&self) -> Address {
        unimplemented!()
    }

    pub fn sign_eth(&self, _msg: Hash) -> Signature {
        unimplemented!()
    }
}

pub fn recover_signer(_msg: Hash, _eth_sig: Signature) -> Result<Address, Error> {
    unimplemented!()
}
