#![allow(dead_code)]

use async_trait::async_trait;
use ethers::{
    abi::AbiEncode,
    providers::{JsonRpcError, MockProvider, MockResponse, Provider},
    types::{Address, Block, Bytes, TransactionReceipt, H256, U256},
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use userop_client::ClientError;
use userop_primitives::{UserOperationReceipt, UserOperationSigned};
use userop_server::{
    Environment, Paymaster, PaymasterSponsorship, Server, ServerOptions, ServerOptionsOverrides,
};

// anvil/hardhat test account #0
pub const SIGNING_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const SENDER: &str = "0x9c5754De1443984659E1b3a8d1931D83475ba29C";
pub const PAYMASTER: &str = "0xe93eca6595fe94091dc1af46aac2a8b5d7990770";

/// Paymaster answering every request with the same sponsorship and recording what it was asked
#[derive(Debug, Default)]
pub struct FixedPaymaster {
    pub requests: Mutex<Vec<UserOperationSigned>>,
}

#[async_trait]
impl Paymaster for FixedPaymaster {
    async fn sponsor(
        &self,
        uo: &UserOperationSigned,
        _entry_point: &Address,
    ) -> Result<PaymasterSponsorship, ClientError> {
        self.requests.lock().unwrap().push(uo.clone());
        Ok(PaymasterSponsorship {
            paymaster_and_data: PAYMASTER.parse().unwrap(),
            pre_verification_gas: Some(48_000.into()),
            verification_gas_limit: Some(100_000.into()),
            call_gas_limit: Some(30_000.into()),
        })
    }
}

pub fn options(signing_key: Option<&str>) -> ServerOptions {
    let env = Environment {
        api_key: "not-a-real-key".into(),
        signing_key: SIGNING_KEY.into(),
    };
    ServerOptions::resolve(
        &env,
        ServerOptionsOverrides::default().signing_key(signing_key.map(String::from)),
    )
}

pub fn server(
    signing_key: Option<&str>,
) -> (Server<Provider<MockProvider>>, MockProvider, Arc<FixedPaymaster>) {
    let (provider, mock) = Provider::mocked();
    let paymaster = Arc::new(FixedPaymaster::default());
    let server = Server::with_eth_client(options(signing_key), Arc::new(provider))
        .unwrap()
        .with_paymaster(paymaster.clone())
        .wait_timeout(Duration::from_millis(50))
        .wait_interval(Duration::from_millis(10));
    (server, mock, paymaster)
}

/// Queues the responses in the order the requests are made
pub fn respond(mock: &MockProvider, responses: Vec<MockResponse>) {
    for response in responses.into_iter().rev() {
        mock.push_response(response);
    }
}

fn value<T: serde::Serialize>(v: T) -> MockResponse {
    MockResponse::Value(serde_json::to_value(v).unwrap())
}

/// Responses of `eth_chainId` and `getSenderAddress`
pub fn init_responses() -> Vec<MockResponse> {
    vec![
        value(U256::from(80_001)),
        MockResponse::Error(JsonRpcError {
            code: 3,
            message: "execution reverted".into(),
            data: Some(
                "0x6ca7b8060000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c".into(),
            ),
        }),
    ]
}

/// Responses of the whole user operation lifecycle: init, build, send and wait
pub fn send_responses(user_operation_hash: H256, tx_hash: H256) -> Vec<MockResponse> {
    let mut responses = init_responses();
    responses.extend([
        // getNonce
        value(Bytes::from(U256::zero().encode())),
        // eth_getCode
        value(Bytes::default()),
        value(Block::<H256> {
            base_fee_per_gas: Some(1_000_000_000u64.into()),
            ..Default::default()
        }),
        // eth_maxPriorityFeePerGas
        value(U256::from(1_500_000_000u64)),
        // eth_sendUserOperation
        value(user_operation_hash),
        // eth_getUserOperationReceipt
        value(UserOperationReceipt {
            user_operation_hash: user_operation_hash.into(),
            sender: SENDER.parse().unwrap(),
            nonce: U256::zero(),
            paymaster: PAYMASTER.parse().ok(),
            actual_gas_cost: 200_000.into(),
            actual_gas_used: 100_000.into(),
            success: true,
            reason: String::new(),
            logs: vec![],
            tx_receipt: TransactionReceipt { transaction_hash: tx_hash, ..Default::default() },
        }),
    ]);
    responses
}
