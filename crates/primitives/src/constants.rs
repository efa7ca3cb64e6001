//! Account abstraction (ERC-4337)-related constants

/// Entry point smart contract
pub mod entry_point {
    /// Address of the entry point smart contract
    pub const ADDRESS: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
    /// Nonce key used for sequential nonces
    pub const NONCE_KEY: u64 = 0;
}

/// Simple account (eth-infinitism sample account) deployed through the factory
pub mod simple_account {
    /// Address of the simple account factory deployed by Stackup
    pub const FACTORY_ADDRESS: &str = "0x9406Cc6185a346906296840746125a0E44976454";
    /// Salt passed to `createAccount` (one account per owner)
    pub const SALT: u64 = 0;
    /// Signature attached to user operations before they are signed, so gas estimation sees a
    /// signature of realistic length
    pub const DUMMY_SIGNATURE: &str = "0xfffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c";
}

/// Stackup hosted endpoints
pub mod stackup {
    /// Environment variable holding the Stackup API key
    pub const API_KEY_VAR: &str = "STACKUP_API_KEY";
    /// Environment variable holding the hex encoded signing key of the account owner
    pub const SIGNING_KEY_VAR: &str = "STACKUP_SIGNING_KEY";
    /// Node (and bundler) RPC endpoint prefix, followed by the API key
    pub const NODE_RPC_URL: &str = "https://api.stackup.sh/v1/node/";
    /// Paymaster RPC endpoint prefix, followed by the API key
    pub const PAYMASTER_RPC_URL: &str = "https://api.stackup.sh/v1/paymaster/";
    /// Sponsorship plan requested from the paymaster by default (pay as you go)
    pub const PAYMASTER_CONTEXT_TYPE: &str = "payg";
}

/// Bundler client
pub mod bundler {
    /// How long to wait for a user operation receipt (in milliseconds)
    pub const WAIT_TIMEOUT_MS: u64 = 30_000;
    /// Interval between two receipt polls (in milliseconds)
    pub const WAIT_INTERVAL_MS: u64 = 5_000;
}
