//! Server options: literal defaults, values derived from the environment and caller overrides

use crate::Environment;
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use userop_client::PaymasterContext;
use userop_primitives::constants::{
    entry_point,
    simple_account,
    stackup::{NODE_RPC_URL, PAYMASTER_CONTEXT_TYPE, PAYMASTER_RPC_URL},
};

/// Paymaster endpoint and the context sent along with every sponsorship request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterOptions {
    pub rpc_url: String,
    pub context: PaymasterContext,
}

/// Fully resolved server options
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerOptions {
    /// Node RPC endpoint, also serving the bundler methods
    pub rpc_url: String,
    /// Hex encoded private key of the account owner, required by every sending operation
    pub signing_key: Option<String>,
    pub entry_point: Address,
    pub simple_account_factory: Address,
    pub paymaster: PaymasterOptions,
}

impl fmt::Debug for ServerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerOptions")
            .field("rpc_url", &self.rpc_url)
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field("entry_point", &self.entry_point)
            .field("simple_account_factory", &self.simple_account_factory)
            .field("paymaster", &self.paymaster)
            .finish()
    }
}

impl ServerOptions {
    /// Default options for the credentials of the environment
    pub fn defaults(env: &Environment) -> Self {
        let mut context = PaymasterContext::new();
        context.insert("type".into(), serde_json::Value::from(PAYMASTER_CONTEXT_TYPE));

        Self {
            rpc_url: format!("{NODE_RPC_URL}{}", env.api_key),
            signing_key: Some(env.signing_key.clone()),
            entry_point: entry_point::ADDRESS.parse().expect("valid entry point address"),
            simple_account_factory: simple_account::FACTORY_ADDRESS
                .parse()
                .expect("valid simple account factory address"),
            paymaster: PaymasterOptions {
                rpc_url: format!("{PAYMASTER_RPC_URL}{}", env.api_key),
                context,
            },
        }
    }

    /// Default options with the overrides applied on top
    pub fn resolve(env: &Environment, overrides: ServerOptionsOverrides) -> Self {
        overrides.merge(Self::defaults(env))
    }
}

/// Partial server options. Every field set here replaces the whole field of the defaults, the
/// paymaster options included.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ServerOptionsOverrides {
    pub rpc_url: Option<String>,
    /// `Some(None)` clears the signing key
    pub signing_key: Option<Option<String>>,
    pub entry_point: Option<Address>,
    pub simple_account_factory: Option<Address>,
    pub paymaster: Option<PaymasterOptions>,
}

impl fmt::Debug for ServerOptionsOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signing_key = self.signing_key.as_ref().map(|key| key.as_ref().map(|_| "<redacted>"));
        f.debug_struct("ServerOptionsOverrides")
            .field("rpc_url", &self.rpc_url)
            .field("signing_key", &signing_key)
            .field("entry_point", &self.entry_point)
            .field("simple_account_factory", &self.simple_account_factory)
            .field("paymaster", &self.paymaster)
            .finish()
    }
}

impl ServerOptionsOverrides {
    pub fn rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    pub fn signing_key(mut self, signing_key: Option<String>) -> Self {
        self.signing_key = Some(signing_key);
        self
    }

    pub fn entry_point(mut self, entry_point: Address) -> Self {
        self.entry_point = Some(entry_point);
        self
    }

    pub fn simple_account_factory(mut self, simple_account_factory: Address) -> Self {
        self.simple_account_factory = Some(simple_account_factory);
        self
    }

    pub fn paymaster(mut self, paymaster: PaymasterOptions) -> Self {
        self.paymaster = Some(paymaster);
        self
    }

    /// Shallow merge of the overrides into `options`
    pub fn merge(self, options: ServerOptions) -> ServerOptions {
        ServerOptions {
            rpc_url: self.rpc_url.unwrap_or(options.rpc_url),
            signing_key: self.signing_key.unwrap_or(options.signing_key),
            entry_point: self.entry_point.unwrap_or(options.entry_point),
            simple_account_factory: self
                .simple_account_factory
                .unwrap_or(options.simple_account_factory),
            paymaster: self.paymaster.unwrap_or(options.paymaster),
        }
    }
}
