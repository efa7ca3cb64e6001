//! A `Wallet` is a wrapper around an ethers wallet that owns a smart contract account and signs
//! its user operations
use crate::{UserOperationHash, UserOperationSigned};
use ethers::{
    prelude::k256::ecdsa::SigningKey,
    signers::{LocalWallet, Signer, WalletError},
    types::Address,
};

/// Wrapper around ethers wallet
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Signing key of the wallet
    pub signer: ethers::signers::Wallet<SigningKey>,
}

impl Wallet {
    /// Create a new wallet from a hex encoded private key (with or without `0x` prefix)
    ///
    /// # Arguments
    /// * `signing_key` - The hex encoded private key
    ///
    /// # Returns
    /// * `Self` - A new `Wallet` instance
    pub fn from_signing_key(signing_key: &str) -> Result<Self, WalletError> {
        let wallet = signing_key.trim().parse::<LocalWallet>()?;
        Ok(Self { signer: wallet })
    }

    /// Binds the wallet to the chain id of the network it signs for
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        Self { signer: self.signer.with_chain_id(chain_id) }
    }

    /// Address of the account owner
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs the user operation
    ///
    /// # Arguments
    /// * `uo` - The [UserOperationSigned](UserOperationSigned) to be signed
    /// * `ep` - The entry point contract address
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `UserOperationSigned` - The signed user operation and its hash
    pub async fn sign_user_operation(
        &self,
        uo: &UserOperationSigned,
        ep: &Address,
        chain_id: u64,
    ) -> Result<(UserOperationHash, UserOperationSigned), WalletError> {
        let h = uo.hash(ep, chain_id);
        let sig = self.signer.sign_message(h.0.as_bytes()).await?;
        Ok((h, UserOperationSigned { signature: sig.to_vec().into(), ..uo.clone() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::entry_point::ADDRESS;
    use ethers::types::Signature;

    // anvil/hardhat test account #0
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn from_signing_key_with_and_without_prefix() {
        let a = Wallet::from_signing_key(KEY).unwrap().with_chain_id(80_001);
        let b = Wallet::from_signing_key(&KEY[2..]).unwrap();
        assert_eq!(a.address(), OWNER.parse::<Address>().unwrap());
        assert_eq!(a.address(), b.address());
        assert_eq!(a.signer.chain_id(), 80_001);
    }

    #[test]
    fn from_signing_key_rejects_garbage() {
        assert!(Wallet::from_signing_key("not a real key").is_err());
    }

    #[tokio::test]
    async fn sign_user_operation_recovers_owner() -> eyre::Result<()> {
        let wallet = Wallet::from_signing_key(KEY)?.with_chain_id(80_001);
        let ep: Address = ADDRESS.parse()?;
        let uo = UserOperationSigned::default().sender(Address::random()).nonce(7.into());

        let (hash, signed) = wallet.sign_user_operation(&uo, &ep, 80_001).await?;

        assert_eq!(hash, uo.hash(&ep, 80_001));
        assert_eq!(signed.signature.len(), 65);
        let sig = Signature::try_from(signed.signature.as_ref())?;
        assert_eq!(sig.recover(hash.0.as_bytes())?, wallet.address());
        Ok(())
    }
}
