//! Bundler client: submits user operations and waits for their inclusion

use crate::{ClientError, SimpleAccount};
use ethers::{
    providers::Middleware,
    types::{Address, H256},
};
use std::{sync::Arc, time::Duration};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, trace};
use userop_primitives::{
    constants::bundler::{WAIT_INTERVAL_MS, WAIT_TIMEOUT_MS},
    UserOperationGasEstimation, UserOperationHash, UserOperationReceipt, UserOperationSigned,
};

/// User operation accepted by the bundler, not necessarily included yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingUserOperation {
    pub user_operation_hash: UserOperationHash,
}

/// Client of the bundler RPC namespace (`eth_sendUserOperation` and friends)
#[derive(Clone, Debug)]
pub struct BundlerClient<M: Middleware + 'static> {
    eth_client: Arc<M>,
    entry_point: Address,
    wait_timeout: Duration,
    wait_interval: Duration,
}

pub(crate) async fn estimate_user_operation_gas<M: Middleware>(
    eth_client: &M,
    uo: &UserOperationSigned,
    entry_point: &Address,
) -> Result<UserOperationGasEstimation, ClientError> {
    let est: UserOperationGasEstimation =
        eth_client.provider().request("eth_estimateUserOperationGas", (uo, entry_point)).await?;
    trace!("Gas estimation of user operation of {:?}: {est:?}", uo.sender);
    Ok(est)
}

impl<M: Middleware + 'static> BundlerClient<M> {
    pub fn new(eth_client: Arc<M>, entry_point: Address) -> Self {
        Self {
            eth_client,
            entry_point,
            wait_timeout: Duration::from_millis(WAIT_TIMEOUT_MS),
            wait_interval: Duration::from_millis(WAIT_INTERVAL_MS),
        }
    }

    /// How long [wait](BundlerClient::wait) polls for the receipt
    pub fn wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Interval between two receipt polls
    pub fn wait_interval(mut self, wait_interval: Duration) -> Self {
        self.wait_interval = wait_interval;
        self
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point
    }

    /// Builds the user operation of the account and sends it to the bundler
    ///
    /// # Arguments
    /// * `account` - Account builder with its call data set
    /// * `on_build` - Called with the signed user operation right before it is sent
    ///
    /// # Returns
    /// * `PendingUserOperation` - Hash of the user operation returned by the bundler
    pub async fn send_user_operation<F>(
        &self,
        account: &SimpleAccount<M>,
        on_build: F,
    ) -> Result<PendingUserOperation, ClientError>
    where
        F: FnOnce(&UserOperationSigned) + Send,
    {
        let (_, uo) = account.build_user_operation().await?;
        on_build(&uo);

        let user_operation_hash: UserOperationHash = self
            .eth_client
            .provider()
            .request("eth_sendUserOperation", (&uo, self.entry_point))
            .await?;
        let (sender, _, paymaster) = uo.get_entities();
        info!("User operation {user_operation_hash} of {sender:?} (paymaster {paymaster:?}) sent");

        Ok(PendingUserOperation { user_operation_hash })
    }

    pub async fn estimate_user_operation_gas(
        &self,
        uo: &UserOperationSigned,
    ) -> Result<UserOperationGasEstimation, ClientError> {
        estimate_user_operation_gas(self.eth_client.as_ref(), uo, &self.entry_point).await
    }

    /// Receipt of the user operation, `None` while it isn't included
    pub async fn get_user_operation_receipt(
        &self,
        user_operation_hash: &UserOperationHash,
    ) -> Result<Option<UserOperationReceipt>, ClientError> {
        Ok(self
            .eth_client
            .provider()
            .request("eth_getUserOperationReceipt", [user_operation_hash])
            .await?)
    }

    pub async fn supported_entry_points(&self) -> Result<Vec<Address>, ClientError> {
        Ok(self.eth_client.provider().request("eth_supportedEntryPoints", ()).await?)
    }

    /// Polls the bundler until the user operation is included
    ///
    /// # Returns
    /// * `Option<H256>` - Hash of the transaction that included the user operation, `None` if
    ///   it wasn't included before the timeout
    pub async fn wait(&self, pending: &PendingUserOperation) -> Result<Option<H256>, ClientError> {
        let deadline = Instant::now() + self.wait_timeout;

        loop {
            if let Some(receipt) =
                self.get_user_operation_receipt(&pending.user_operation_hash).await?
            {
                let tx_hash = receipt.tx_receipt.transaction_hash;
                info!(
                    "User operation {} included in transaction {tx_hash:?}",
                    pending.user_operation_hash
                );
                return Ok(Some(tx_hash));
            }

            let now = Instant::now();
            if now >= deadline {
                debug!("User operation {} not included in time", pending.user_operation_hash);
                return Ok(None);
            }
            sleep(self.wait_interval.min(deadline - now)).await;
        }
    }
}
