//! Account abstraction (ERC-4337) smart contract interfaces
//!
//! Bindings for the entry point (v0.6), the simple account and its factory, and the NFT
//! collection factory used by the deployment operation.

pub mod entry_point;
mod error;
mod gen;

pub use entry_point::EntryPoint;
pub use error::{decode_revert_error, decode_revert_string, EntryPointError};
pub use gen::{
    entry_point_api, nft_factory_api, simple_account_api, simple_account_factory_api,
    EntryPointAPI, FailedOp, NftFactoryAPI, SimpleAccountAPI, SimpleAccountFactoryAPI,
};
