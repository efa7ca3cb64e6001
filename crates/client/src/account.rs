//! Simple account (eth-infinitism `SimpleAccount`) user operation builder

use crate::{bundler::estimate_user_operation_gas, gas::fees, ClientError, GasOverrides, Paymaster};
use ethers::{
    abi::AbiEncode,
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use std::sync::Arc;
use tracing::{debug, trace};
use userop_contracts::{
    simple_account_api::{ExecuteBatchCall, ExecuteCall},
    simple_account_factory_api::CreateAccountCall,
    EntryPoint,
};
use userop_primitives::{
    constants::simple_account::{DUMMY_SIGNATURE, SALT},
    pack_init_code, UserOperationHash, UserOperationSigned, Wallet,
};

/// Builds user operations for the simple account owned by a wallet. The account doesn't have to
/// be deployed yet: its address is computed from the factory init code, which is attached to
/// user operations until the account code shows up on chain.
#[derive(Clone)]
pub struct SimpleAccount<M: Middleware + 'static> {
    eth_client: Arc<M>,
    wallet: Wallet,
    chain_id: u64,
    entry_point: EntryPoint<M>,
    init_code: Bytes,
    sender: Address,
    call_data: Bytes,
    gas: GasOverrides,
    paymaster: Option<Arc<dyn Paymaster>>,
}

impl<M: Middleware + 'static> SimpleAccount<M> {
    /// Creates the account builder
    ///
    /// # Arguments
    /// * `eth_client` - Ethereum client of the node (which also serves the bundler methods)
    /// * `signing_key` - Hex encoded private key of the account owner
    /// * `entry_point` - Address of the entry point contract
    /// * `factory` - Address of the simple account factory
    pub async fn init(
        eth_client: Arc<M>,
        signing_key: &str,
        entry_point: Address,
        factory: Address,
    ) -> Result<Self, ClientError> {
        let wallet = Wallet::from_signing_key(signing_key)?;
        let chain_id =
            eth_client.get_chainid().await.map_err(ClientError::middleware)?.as_u64();
        let wallet = wallet.with_chain_id(chain_id);

        let factory_data =
            CreateAccountCall { owner: wallet.address(), salt: U256::from(SALT) }.encode();
        let init_code = pack_init_code(factory, factory_data.into());

        let entry_point = EntryPoint::new(eth_client.clone(), entry_point);
        let sender = entry_point.get_sender_address(init_code.clone()).await?;
        debug!("Simple account {sender:?} of owner {:?} on chain {chain_id}", wallet.address());

        Ok(Self {
            eth_client,
            wallet,
            chain_id,
            entry_point,
            init_code,
            sender,
            call_data: Bytes::default(),
            gas: GasOverrides::default(),
            paymaster: None,
        })
    }

    /// Address of the account
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Address of the account owner
    pub fn owner(&self) -> Address {
        self.wallet.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn entry_point(&self) -> &EntryPoint<M> {
        &self.entry_point
    }

    pub fn eth_client(&self) -> Arc<M> {
        self.eth_client.clone()
    }

    /// Init code that deploys the account through the factory
    pub fn init_code(&self) -> &Bytes {
        &self.init_code
    }

    pub fn call_data(&self) -> &Bytes {
        &self.call_data
    }

    pub fn gas_overrides(&self) -> &GasOverrides {
        &self.gas
    }

    /// Makes the account call `to` with `value` wei and `data`
    pub fn execute(&mut self, to: Address, value: U256, data: Bytes) -> &mut Self {
        self.call_data = ExecuteCall { dest: to, value, func: data }.encode().into();
        self
    }

    /// Makes the account call each of `to` with the matching `data` (no value)
    pub fn execute_batch(&mut self, to: Vec<Address>, data: Vec<Bytes>) -> &mut Self {
        self.call_data = ExecuteBatchCall { dest: to, func: data }.encode().into();
        self
    }

    pub fn set_call_gas_limit(&mut self, call_gas_limit: U256) -> &mut Self {
        self.gas.call_gas_limit = Some(call_gas_limit);
        self
    }

    pub fn set_verification_gas_limit(&mut self, verification_gas_limit: U256) -> &mut Self {
        self.gas.verification_gas_limit = Some(verification_gas_limit);
        self
    }

    pub fn set_pre_verification_gas(&mut self, pre_verification_gas: U256) -> &mut Self {
        self.gas.pre_verification_gas = Some(pre_verification_gas);
        self
    }

    /// Gets user operations sponsored by the paymaster instead of estimating their gas
    pub fn set_paymaster(&mut self, paymaster: Option<Arc<dyn Paymaster>>) -> &mut Self {
        self.paymaster = paymaster;
        self
    }

    /// Builds and signs the user operation
    ///
    /// Fetches the nonce, drops the init code once the account is deployed, fills the fees, gets
    /// the gas limits from the paymaster (or the bundler estimation) and finally signs.
    pub async fn build_user_operation(
        &self,
    ) -> Result<(UserOperationHash, UserOperationSigned), ClientError> {
        let entry_point = self.entry_point.address();

        let nonce = self.entry_point.get_nonce(&self.sender).await?;
        let code = self
            .eth_client
            .get_code(self.sender, None)
            .await
            .map_err(ClientError::middleware)?;
        let init_code = if code.is_empty() { self.init_code.clone() } else { Bytes::default() };
        let (max_fee_per_gas, max_priority_fee_per_gas) = fees(self.eth_client.as_ref()).await?;

        let uo = UserOperationSigned::default()
            .sender(self.sender)
            .nonce(nonce)
            .init_code(init_code)
            .call_data(self.call_data.clone())
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(max_priority_fee_per_gas)
            .signature(DUMMY_SIGNATURE.parse().expect("dummy signature is valid hex"));
        let uo = self.gas.fill(uo, None, None, None);

        let uo = match &self.paymaster {
            Some(paymaster) => {
                let sponsorship = paymaster.sponsor(&uo, &entry_point).await?;
                let uo = uo.paymaster_and_data(sponsorship.paymaster_and_data);
                self.gas.fill(
                    uo,
                    sponsorship.call_gas_limit,
                    sponsorship.verification_gas_limit,
                    sponsorship.pre_verification_gas,
                )
            }
            None => {
                let est =
                    estimate_user_operation_gas(self.eth_client.as_ref(), &uo, &entry_point)
                        .await?;
                self.gas.fill(
                    uo,
                    Some(est.call_gas_limit),
                    Some(est.verification_gas_limit),
                    Some(est.pre_verification_gas),
                )
            }
        };
        trace!("Unsigned user operation {uo:?}");

        Ok(self.wallet.sign_user_operation(&uo, &entry_point, self.chain_id).await?)
    }
}
