//! Misc utils

use ethers::{
    types::{Address, Bytes},
    utils::to_checksum,
};
use thiserror::Error;

/// Address parsing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Not a 20 bytes hex string
    #[error("invalid address: {0}")]
    Invalid(String),

    /// Mixed case address whose casing doesn't match its EIP-55 checksum
    #[error("bad address checksum: {0}")]
    BadChecksum(String),
}

/// Converts address to checksum address
pub fn as_checksum_addr<S>(val: &Address, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&to_checksum(val, None))
}

/// If possible, parses address from the first 20 bytes
pub fn get_address(buf: &[u8]) -> Option<Address> {
    if buf.len() >= 20 {
        Some(Address::from_slice(&buf[0..20]))
    } else {
        None
    }
}

/// Packs factory address and factory call data into init code
pub fn pack_init_code(factory: Address, factory_data: Bytes) -> Bytes {
    if factory.is_zero() {
        Bytes::default()
    } else {
        [factory.0.to_vec(), factory_data.to_vec()].concat().into()
    }
}

/// Parses an address the way wallets do: all lowercase or all uppercase hex is accepted as is,
/// mixed case must match the EIP-55 checksum.
pub fn normalize_address(s: &str) -> Result<Address, AddressError> {
    let hex = s.strip_prefix("0x").unwrap_or(s);
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::Invalid(s.into()));
    }

    let address = hex.parse::<Address>().map_err(|_| AddressError::Invalid(s.into()))?;

    let mixed_case = hex.chars().any(|c| c.is_ascii_lowercase()) &&
        hex.chars().any(|c| c.is_ascii_uppercase());
    if mixed_case && to_checksum(&address, None)[2..] != *hex {
        return Err(AddressError::BadChecksum(s.into()));
    }

    Ok(address)
}
