//! Account abstraction (ERC-4337) server
//!
//! Resolves the connection options from the environment (Stackup API key and signing key) and
//! submits user operations of the signer's simple account: value transfers and NFT collection
//! deployments, sponsored by the paymaster.

mod env;
mod error;
pub mod options;
mod server;

pub use env::Environment;
pub use error::{ConfigError, ServerError};
pub use options::{PaymasterOptions, ServerOptions, ServerOptionsOverrides};
pub use server::{Server, DEPLOY_GAS_LIMIT, NFT_FACTORY_ADDRESS};
pub use userop_client::{Paymaster, PaymasterContext, PaymasterSponsorship};
