// Height of the genesis block. The first mined block lands on GENESIS_HEIGHT + 1.
pub const GENESIS_HEIGHT: u64 = 1;

// Address versions (c32 characters 'P' and 'T')
pub const ADDRESS_VERSION_MAINNET: u8 = 22;
pub const ADDRESS_VERSION_TESTNET: u8 = 26;

// Address payload: 20 bytes of hash + 4 bytes of checksum
pub const ADDRESS_HASH_SIZE: usize = 20;
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

// Contract names follow the same shape as map and function names
pub const MAX_CONTRACT_NAME_LEN: usize = 40;

// Largest N a contract may declare in a (string-ascii N) signature
pub const MAX_ASCII_LEN: u32 = 1_048_576;

// Domain separator used when deriving devnet account addresses from names
pub const ACCOUNT_DERIVATION_DOMAIN: &[u8] = b"landreg/devnet-account/v1";

// Default devnet layout
pub const DEPLOYER_ACCOUNT: &str = "deployer";
pub const WALLET_PREFIX: &str = "wallet_";
pub const DEFAULT_WALLET_COUNT: usize = 9;
