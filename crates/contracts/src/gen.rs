use ethers::contract::abigen;

abigen!(
    EntryPointAPI,
    r#"[
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce)
        function getSenderAddress(bytes memory initCode) external
        error FailedOp(uint256 opIndex, string reason)
        error SenderAddressResult(address sender)
    ]"#
);

abigen!(
    SimpleAccountFactoryAPI,
    r#"[
        function createAccount(address owner,uint256 salt) external returns (address ret)
        function getAddress(address owner,uint256 salt) external view returns (address)
    ]"#
);

abigen!(
    SimpleAccountAPI,
    r#"[
        function execute(address dest, uint256 value, bytes calldata func) external
        function executeBatch(address[] calldata dest, bytes[] calldata func) external
    ]"#
);

// Only the factory entry point is needed, the collection itself is deployed by the factory.
abigen!(
    NftFactoryAPI,
    r#"[
        function deploy721(string memory name, string memory symbol) external returns (address)
    ]"#
);
