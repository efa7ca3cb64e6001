//! Account abstraction (ERC-4337) primitive types
//!
//! This crate contains the user operation type, its hashing and signing, and the helpers and
//! constants shared by the client and server crates.

pub mod constants;
mod user_operation;
mod utils;
mod wallet;

pub use user_operation::{
    UserOperationGasEstimation, UserOperationHash, UserOperationReceipt, UserOperationSigned,
};
pub use utils::{get_address, normalize_address, pack_init_code, AddressError};
pub use wallet::Wallet;
