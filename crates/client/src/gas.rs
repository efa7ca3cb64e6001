//! Gas fees and gas limit overrides for user operations

use crate::ClientError;
use ethers::{
    providers::Middleware,
    types::{BlockNumber, U256},
};
use tracing::trace;
use userop_primitives::UserOperationSigned;

/// Gas limits pinned on the account builder. Pinned values are kept as they are, whatever the
/// bundler estimates or the paymaster returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GasOverrides {
    pub call_gas_limit: Option<U256>,
    pub verification_gas_limit: Option<U256>,
    pub pre_verification_gas: Option<U256>,
}

impl GasOverrides {
    /// Sets gas limits on the user operation: pinned value first, then the given value, then
    /// whatever the user operation already carries.
    pub fn fill(
        &self,
        uo: UserOperationSigned,
        call_gas_limit: Option<U256>,
        verification_gas_limit: Option<U256>,
        pre_verification_gas: Option<U256>,
    ) -> UserOperationSigned {
        UserOperationSigned {
            call_gas_limit: self.call_gas_limit.or(call_gas_limit).unwrap_or(uo.call_gas_limit),
            verification_gas_limit: self
                .verification_gas_limit
                .or(verification_gas_limit)
                .unwrap_or(uo.verification_gas_limit),
            pre_verification_gas: self
                .pre_verification_gas
                .or(pre_verification_gas)
                .unwrap_or(uo.pre_verification_gas),
            ..uo
        }
    }
}

/// Fetches `(max_fee_per_gas, max_priority_fee_per_gas)`.
///
/// On EIP-1559 chains the max fee leaves room for the base fee to double; chains without a base
/// fee get the legacy gas price for both values.
pub async fn fees<M: Middleware>(eth_client: &M) -> Result<(U256, U256), ClientError> {
    let block = eth_client.get_block(BlockNumber::Latest).await.map_err(ClientError::middleware)?;

    match block.and_then(|b| b.base_fee_per_gas) {
        Some(base_fee) => {
            let priority_fee: U256 =
                eth_client.provider().request("eth_maxPriorityFeePerGas", ()).await?;
            trace!("Base fee {base_fee}, priority fee {priority_fee}");
            Ok((base_fee.saturating_mul(2.into()).saturating_add(priority_fee), priority_fee))
        }
        None => {
            let gas_price = eth_client.get_gas_price().await.map_err(ClientError::middleware)?;
            trace!("Legacy gas price {gas_price}");
            Ok((gas_price, gas_price))
        }
    }
}
