//! Tests against the Stackup endpoints, credentials are read from `.env`
//!
//! cargo test -p userop-server --test live -- --ignored

use ethers::utils::to_checksum;
use tracing_subscriber::EnvFilter;
use userop_server::{Server, ServerOptionsOverrides};

fn server() -> eyre::Result<Server> {
    dotenv::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
    Ok(Server::from_env(ServerOptionsOverrides::default())?)
}

#[tokio::test]
#[ignore]
async fn get_address() -> eyre::Result<()> {
    let address = server()?.get_address().await?;
    assert!(!address.is_zero());
    Ok(())
}

#[tokio::test]
#[ignore]
async fn send_transaction_to_self() -> eyre::Result<()> {
    let server = server()?;
    let address = to_checksum(&server.get_address().await?, None);

    let tx_hash = server.send_transaction(&address, "0.001", None).await?;

    tracing::info!("Sent 0.001 to {address}: {tx_hash:?}");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn deploy_contract() -> eyre::Result<()> {
    let tx_hash = server()?.deploy_contract("Test", "TKN").await?;
    tracing::info!("Deploy721: {tx_hash:?}");
    Ok(())
}
