//! Paymaster sponsorship of user operations

use crate::ClientError;
use async_trait::async_trait;
use ethers::{
    providers::{Http, JsonRpcClient, Provider},
    types::{Address, Bytes, U256},
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;
use userop_primitives::UserOperationSigned;

/// Opaque context forwarded to the paymaster (e.g. `{"type": "payg"}`)
pub type PaymasterContext = serde_json::Map<String, serde_json::Value>;

/// Response of `pm_sponsorUserOperation`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterSponsorship {
    pub paymaster_and_data: Bytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_verification_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_gas_limit: Option<U256>,
}

/// Paymaster that agrees (or refuses) to pay for user operations
#[async_trait]
pub trait Paymaster: Send + Sync + Debug {
    /// Asks the paymaster to sponsor the user operation. The returned gas limits (if any) replace
    /// the ones of the user operation.
    async fn sponsor(
        &self,
        uo: &UserOperationSigned,
        entry_point: &Address,
    ) -> Result<PaymasterSponsorship, ClientError>;
}

/// Verifying paymaster served over JSON-RPC (`pm_sponsorUserOperation`)
#[derive(Clone, Debug)]
pub struct VerifyingPaymaster<P: JsonRpcClient = Http> {
    provider: Provider<P>,
    context: PaymasterContext,
}

impl VerifyingPaymaster<Http> {
    pub fn new(rpc_url: &str, context: PaymasterContext) -> Result<Self, url::ParseError> {
        let provider = Provider::<Http>::try_from(rpc_url)?;
        Ok(Self { provider, context })
    }
}

impl<P: JsonRpcClient> VerifyingPaymaster<P> {
    pub fn with_provider(provider: Provider<P>, context: PaymasterContext) -> Self {
        Self { provider, context }
    }

    pub fn context(&self) -> &PaymasterContext {
        &self.context
    }
}

#[async_trait]
impl<P: JsonRpcClient + 'static> Paymaster for VerifyingPaymaster<P> {
    async fn sponsor(
        &self,
        uo: &UserOperationSigned,
        entry_point: &Address,
    ) -> Result<PaymasterSponsorship, ClientError> {
        let sponsorship: PaymasterSponsorship = self
            .provider
            .request("pm_sponsorUserOperation", (uo, entry_point, &self.context))
            .await?;
        debug!("Paymaster sponsored user operation of {:?}: {:?}", uo.sender, sponsorship);
        Ok(sponsorship)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::{JsonRpcError, MockResponse};
    use serde_json::json;

    fn context() -> PaymasterContext {
        let mut context = PaymasterContext::new();
        context.insert("type".into(), json!("payg"));
        context
    }

    #[tokio::test]
    async fn sponsor_parses_response() -> eyre::Result<()> {
        let (provider, mock) = Provider::mocked();
        mock.push::<serde_json::Value, serde_json::Value>(json!({
            "paymasterAndData": "0xe93eca6595fe94091dc1af46aac2a8b5d79907700000000000000000000000000000000000000000000000000000000065a0ff4c",
            "preVerificationGas": "0xb444",
            "verificationGasLimit": "0x16e360",
            "callGasLimit": "0x8a8c"
        }))?;
        let paymaster = VerifyingPaymaster::with_provider(provider, context());
        let ep: Address = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse()?;

        let sponsorship = paymaster.sponsor(&UserOperationSigned::default(), &ep).await?;

        assert_eq!(sponsorship.paymaster_and_data.len(), 52);
        assert_eq!(sponsorship.pre_verification_gas, Some(0xb444.into()));
        assert_eq!(sponsorship.verification_gas_limit, Some(0x16e360.into()));
        assert_eq!(sponsorship.call_gas_limit, Some(0x8a8c.into()));

        mock.assert_request(
            "pm_sponsorUserOperation",
            (UserOperationSigned::default(), ep, context()),
        )?;
        Ok(())
    }

    #[tokio::test]
    async fn sponsor_without_gas_fields() -> eyre::Result<()> {
        let (provider, mock) = Provider::mocked();
        mock.push::<serde_json::Value, serde_json::Value>(json!({ "paymasterAndData": "0x" }))?;
        let paymaster = VerifyingPaymaster::with_provider(provider, context());

        let sponsorship =
            paymaster.sponsor(&UserOperationSigned::default(), &Address::zero()).await?;

        assert!(sponsorship.paymaster_and_data.is_empty());
        assert_eq!(sponsorship.call_gas_limit, None);
        Ok(())
    }

    #[tokio::test]
    async fn sponsor_rejected() -> eyre::Result<()> {
        let (provider, mock) = Provider::mocked();
        mock.push_response(MockResponse::Error(JsonRpcError {
            code: -32_602,
            message: "insufficient balance".into(),
            data: None,
        }));
        let paymaster = VerifyingPaymaster::with_provider(provider, context());

        let err = paymaster
            .sponsor(&UserOperationSigned::default(), &Address::zero())
            .await
            .expect_err("sponsorship must be rejected");

        assert!(matches!(err, ClientError::Provider(_)));
        Ok(())
    }
}
