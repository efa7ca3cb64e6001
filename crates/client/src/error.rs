use ethers::{providers::ProviderError, signers::WalletError};
use thiserror::Error;
use userop_contracts::EntryPointError;

/// Errors produced while building, sponsoring or submitting user operations. Errors of the
/// underlying libraries are passed through as they are.
#[derive(Debug, Error)]
pub enum ClientError {
    /// JSON-RPC error returned by the node, the bundler or the paymaster
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Error returned by the Ethereum client middleware
    #[error("middleware error: {inner}")]
    Middleware { inner: String },

    /// Entry point call error
    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    /// Signing key or signing error
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl ClientError {
    pub fn middleware<E: std::error::Error>(err: E) -> Self {
        Self::Middleware { inner: err.to_string() }
    }
}
