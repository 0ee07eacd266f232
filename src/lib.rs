#![cfg_attr(not(feature = "std"), no_std)]

mod types;

pub mod channel;
pub mod ledger;
pub mod sig;

pub use channel::{ChannelParams, ChannelState, CloseRequest, PaymentChannel, Phase};
pub use ledger::{LedgerError, TokenLedger};
pub use types::{Address, Hash, Signature, U256};
