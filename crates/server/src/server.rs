use crate::{Environment, ServerError, ServerOptions, ServerOptionsOverrides};
use ethers::{
    abi::AbiEncode,
    providers::{Http, Middleware, Provider},
    types::{Address, Bytes, H256, U256},
    utils::{parse_units, ParseUnits},
};
use std::{fmt, sync::Arc, time::Duration};
use tracing::{debug, info};
use userop_client::{BundlerClient, Paymaster, SimpleAccount, VerifyingPaymaster};
use userop_contracts::nft_factory_api::Deploy721Call;
use userop_primitives::{
    constants::bundler::{WAIT_INTERVAL_MS, WAIT_TIMEOUT_MS},
    normalize_address, Wallet,
};

/// Call and verification gas limits of NFT collection deployments
pub const DEPLOY_GAS_LIMIT: u64 = 5_000_000;

/// Factory deploying ERC-721 collections (`deploy721(string,string)`).
///
/// Placeholder address with no contract behind it: replace it with the factory deployed on the
/// target chain, otherwise the call succeeds without deploying anything.
pub const NFT_FACTORY_ADDRESS: &str = "0x8c2a1f4b1d3e8b2a7f5c9e0d6b4a3c2e1f0a9b8c";

/// Submits user operations of the simple account owned by the signing key
#[derive(Clone)]
pub struct Server<M: Middleware + 'static = Provider<Http>> {
    options: ServerOptions,
    eth_client: Arc<M>,
    paymaster: Arc<dyn Paymaster>,
    wait_timeout: Duration,
    wait_interval: Duration,
}

impl<M: Middleware + 'static> fmt::Debug for Server<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("options", &self.options)
            .field("paymaster", &self.paymaster)
            .field("wait_timeout", &self.wait_timeout)
            .field("wait_interval", &self.wait_interval)
            .finish_non_exhaustive()
    }
}

impl Server<Provider<Http>> {
    /// Creates the server connected to the node and paymaster of the options
    pub fn new(options: ServerOptions) -> Result<Self, ServerError> {
        let eth_client = Arc::new(Provider::<Http>::try_from(options.rpc_url.as_str())?);
        Self::with_eth_client(options, eth_client)
    }

    /// Creates the server with options resolved from the process environment
    pub fn from_env(overrides: ServerOptionsOverrides) -> Result<Self, ServerError> {
        let env = Environment::from_env()?;
        Self::new(ServerOptions::resolve(&env, overrides))
    }
}

impl<M: Middleware + 'static> Server<M> {
    /// Creates the server on top of an existing Ethereum client. The paymaster still goes
    /// through its own endpoint.
    pub fn with_eth_client(
        options: ServerOptions,
        eth_client: Arc<M>,
    ) -> Result<Self, ServerError> {
        let paymaster = VerifyingPaymaster::new(
            &options.paymaster.rpc_url,
            options.paymaster.context.clone(),
        )?;

        Ok(Self {
            options,
            eth_client,
            paymaster: Arc::new(paymaster),
            wait_timeout: Duration::from_millis(WAIT_TIMEOUT_MS),
            wait_interval: Duration::from_millis(WAIT_INTERVAL_MS),
        })
    }

    /// Replaces the paymaster sponsoring the user operations
    pub fn with_paymaster(mut self, paymaster: Arc<dyn Paymaster>) -> Self {
        self.paymaster = paymaster;
        self
    }

    pub fn wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    pub fn wait_interval(mut self, wait_interval: Duration) -> Self {
        self.wait_interval = wait_interval;
        self
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }

    fn signing_key(&self) -> Result<&str, ServerError> {
        let signing_key =
            self.options.signing_key.as_deref().ok_or(ServerError::SigningKeyNotSet)?;
        Wallet::from_signing_key(signing_key)
            .map_err(|err| ServerError::InvalidSigningKey(err.to_string()))?;
        Ok(signing_key)
    }

    async fn account(&self, signing_key: &str) -> Result<SimpleAccount<M>, ServerError> {
        let mut account = SimpleAccount::init(
            self.eth_client.clone(),
            signing_key,
            self.options.entry_point,
            self.options.simple_account_factory,
        )
        .await?;
        account.set_paymaster(Some(self.paymaster.clone()));
        Ok(account)
    }

    fn bundler(&self) -> BundlerClient<M> {
        BundlerClient::new(self.eth_client.clone(), self.options.entry_point)
            .wait_timeout(self.wait_timeout)
            .wait_interval(self.wait_interval)
    }

    async fn submit(&self, account: &SimpleAccount<M>) -> Result<Option<H256>, ServerError> {
        let bundler = self.bundler();
        let pending = bundler
            .send_user_operation(account, |uo| debug!("Signed user operation: {uo:?}"))
            .await?;
        Ok(bundler.wait(&pending).await?)
    }

    /// Counterfactual address of the simple account owned by the signing key
    pub async fn get_address(&self) -> Result<Address, ServerError> {
        let signing_key = self.signing_key()?;
        Ok(self.account(signing_key).await?.sender())
    }

    /// Sends `amount` ether (decimal string) and optional call `data` to `to`
    ///
    /// # Returns
    /// * `Option<H256>` - Hash of the transaction that included the user operation, `None` if
    ///   the bundler didn't report one in time
    pub async fn send_transaction(
        &self,
        to: &str,
        amount: &str,
        data: Option<Bytes>,
    ) -> Result<Option<H256>, ServerError> {
        let signing_key = self.signing_key()?;
        let to = normalize_address(to)?;
        let invalid_amount =
            |inner: String| ServerError::InvalidAmount { amount: amount.into(), inner };
        let parsed = parse_units(amount, "ether").map_err(|err| invalid_amount(err.to_string()))?;
        let value = match parsed {
            ParseUnits::U256(value) => value,
            ParseUnits::I256(_) => return Err(invalid_amount("negative amount".into())),
        };

        let mut account = self.account(signing_key).await?;
        account.execute(to, value, data.unwrap_or_default());

        let tx_hash = self.submit(&account).await?;
        info!("Transfer of {amount} ether to {to:?}: {tx_hash:?}");
        Ok(tx_hash)
    }

    /// Deploys an ERC-721 collection through the NFT factory
    pub async fn deploy_contract(
        &self,
        name: &str,
        symbol: &str,
    ) -> Result<Option<H256>, ServerError> {
        let signing_key = self.signing_key()?;
        let factory: Address = NFT_FACTORY_ADDRESS.parse().expect("valid NFT factory address");
        let call_data = Deploy721Call { name: name.into(), symbol: symbol.into() }.encode();

        let mut account = self.account(signing_key).await?;
        account
            .set_call_gas_limit(DEPLOY_GAS_LIMIT.into())
            .set_verification_gas_limit(DEPLOY_GAS_LIMIT.into())
            .execute(factory, U256::zero(), call_data.into());

        let tx_hash = self.submit(&account).await?;
        match tx_hash {
            Some(hash) => info!("Deploy721 transaction hash: {hash:?}"),
            None => info!("Deploy721 transaction hash: none"),
        }
        Ok(tx_hash)
    }
}
