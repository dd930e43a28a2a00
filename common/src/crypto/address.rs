use super::{
    c32::{c32_decode, c32_digit, c32_encode, C32_ALPHABET},
    CryptoError, Hasher,
};
use crate::config::{
    ACCOUNT_DERIVATION_DOMAIN, ADDRESS_CHECKSUM_SIZE, ADDRESS_HASH_SIZE, ADDRESS_VERSION_MAINNET,
    ADDRESS_VERSION_TESTNET,
};
use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

/// Standard principal: a version byte and a 20-byte account hash
///
/// Rendered as `S` + c32(version) + c32(hash ++ checksum), e.g. `ST1...`
/// for testnet accounts. The checksum is the first four bytes of the
/// blake3 digest of `version ++ hash`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    version: u8,
    hash: [u8; ADDRESS_HASH_SIZE],
}

impl Address {
    pub fn new(version: u8, hash: [u8; ADDRESS_HASH_SIZE]) -> Result<Self, CryptoError> {
        if version as usize >= C32_ALPHABET.len() {
            return Err(CryptoError::InvalidVersion(version));
        }
        Ok(Self { version, hash })
    }

    pub const fn testnet(hash: [u8; ADDRESS_HASH_SIZE]) -> Self {
        Self {
            version: ADDRESS_VERSION_TESTNET,
            hash,
        }
    }

    // Deterministic devnet account: the same name always yields the same address
    pub fn derive_account(name: &str) -> Self {
        let digest = Hasher::new()
            .field(ACCOUNT_DERIVATION_DOMAIN)
            .field(name.as_bytes())
            .finalize();

        let mut hash = [0u8; ADDRESS_HASH_SIZE];
        hash.copy_from_slice(&digest.as_bytes()[..ADDRESS_HASH_SIZE]);
        Self::testnet(hash)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn is_mainnet(&self) -> bool {
        self.version == ADDRESS_VERSION_MAINNET
    }

    fn checksum(version: u8, hash: &[u8; ADDRESS_HASH_SIZE]) -> [u8; ADDRESS_CHECKSUM_SIZE] {
        let digest = Hasher::new().field(&[version]).field(hash).finalize();
        let mut checksum = [0u8; ADDRESS_CHECKSUM_SIZE];
        checksum.copy_from_slice(&digest.as_bytes()[..ADDRESS_CHECKSUM_SIZE]);
        checksum
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut payload = Vec::with_capacity(ADDRESS_HASH_SIZE + ADDRESS_CHECKSUM_SIZE);
        payload.extend_from_slice(&self.hash);
        payload.extend_from_slice(&Self::checksum(self.version, &self.hash));

        write!(
            f,
            "S{}{}",
            C32_ALPHABET[self.version as usize] as char,
            c32_encode(&payload)
        )
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if chars.next() != Some('S') {
            return Err(CryptoError::InvalidAddress(format!(
                "'{}' does not start with 'S'",
                s
            )));
        }

        let version_char = chars
            .next()
            .ok_or_else(|| CryptoError::InvalidAddress(format!("'{}' is too short", s)))?;
        let version = c32_digit(version_char)?;

        let decoded = c32_decode(chars.as_str())?;
        let expected = ADDRESS_HASH_SIZE + ADDRESS_CHECKSUM_SIZE;
        if decoded.len() > expected {
            return Err(CryptoError::InvalidAddress(format!(
                "payload of '{}' is {} bytes, expected {}",
                s,
                decoded.len(),
                expected
            )));
        }

        // c32 drops leading zero bytes only when the string does too, so pad back
        let mut payload = vec![0u8; expected - decoded.len()];
        payload.extend_from_slice(&decoded);

        let mut hash = [0u8; ADDRESS_HASH_SIZE];
        hash.copy_from_slice(&payload[..ADDRESS_HASH_SIZE]);

        if payload[ADDRESS_HASH_SIZE..] != Self::checksum(version, &hash) {
            return Err(CryptoError::InvalidChecksum);
        }

        Self::new(version, hash)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'a> Deserialize<'a> for Address {
    fn deserialize<D: serde::Deserializer<'a>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(SerdeError::custom)
    }
}
