//! Account abstraction (ERC-4337) client
//!
//! Builds user operations for a simple account, optionally gets them sponsored by a paymaster
//! and submits them to a bundler.

pub mod account;
pub mod bundler;
mod error;
pub mod gas;
pub mod paymaster;

pub use account::SimpleAccount;
pub use bundler::{BundlerClient, PendingUserOperation};
pub use error::ClientError;
pub use gas::GasOverrides;
pub use paymaster::{Paymaster, PaymasterContext, PaymasterSponsorship, VerifyingPaymaster};
