use thiserror::Error;
use userop_client::ClientError;
use userop_primitives::AddressError;

/// Configuration errors, raised when the server options are resolved
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not defined")]
    MissingEnvVar(&'static str),
}

/// Errors of the server operations
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Sending operations need the signing key of the account owner
    #[error("signing key not set")]
    SigningKeyNotSet,

    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    /// Amount isn't a decimal ether value
    #[error("invalid amount {amount}: {inner}")]
    InvalidAmount { amount: String, inner: String },

    #[error("invalid rpc url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Anything returned by the node, the bundler or the paymaster
    #[error(transparent)]
    Client(#[from] ClientError),
}
