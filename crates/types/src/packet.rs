use alloy::primitives::{hex, Address, B256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use socket_constants::{ChainSlug, UnknownChainSlug};
use std::{fmt, str::FromStr};

const NONCE_BITS: usize = 64;
const CAPACITOR_BITS: usize = 160;
const SLUG_SHIFT: usize = NONCE_BITS + CAPACITOR_BITS;

/// Errors produced while building or reading a [`PacketId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacketIdError {
    /// The slug is not in the chain registry.
    #[error(transparent)]
    UnknownChainSlug(#[from] UnknownChainSlug),
    /// The nonce does not fit in 64 bits.
    #[error("packet nonce {0} does not fit in 64 bits")]
    NonceOverflow(U256),
    /// The capacitor address is not 20 bytes of hex.
    #[error("invalid capacitor address: {0}")]
    InvalidAddress(String),
    /// The identifier is neither decimal nor `0x`-prefixed hex.
    #[error("invalid packet id: {0}")]
    Parse(String),
}

/// The components of a [`PacketId`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PacketIdParts {
    /// Chain the packet was sealed on.
    pub chain_slug: ChainSlug,
    /// Capacitor that sealed the packet.
    pub capacitor: Address,
    /// Per-capacitor packet counter.
    pub nonce: u64,
}

/// A 256-bit packet identifier.
///
/// Laid out as `slug (32 bits) | capacitor (160 bits) | nonce (64 bits)`,
/// matching `(uint256(slug) << 224) | (uint256(uint160(capacitor)) << 64) |
/// nonce` on-chain.
///
/// Serialized as a decimal string.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PacketId(U256);

impl PacketId {
    /// Build an identifier from registered components.
    pub fn new(chain_slug: ChainSlug, capacitor: Address, nonce: u64) -> Self {
        let slug = U256::from(chain_slug.as_u32()) << SLUG_SHIFT;
        let capacitor = U256::from_be_slice(capacitor.as_slice()) << NONCE_BITS;
        Self(slug | capacitor | U256::from(nonce))
    }

    /// Build an identifier from raw inputs, validating each of them.
    pub fn encode(chain_slug: u32, capacitor: &str, nonce: U256) -> Result<Self, PacketIdError> {
        let chain_slug = ChainSlug::try_from(chain_slug)?;
        let capacitor = Address::from_str(capacitor.trim())
            .map_err(|_| PacketIdError::InvalidAddress(capacitor.to_owned()))?;
        let nonce = u64::try_from(nonce).map_err(|_| PacketIdError::NonceOverflow(nonce))?;
        Ok(Self::new(chain_slug, capacitor, nonce))
    }

    /// Wrap a raw word without validating it.
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// The raw word.
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// The slug stored in the top 32 bits, whether or not it is registered.
    pub const fn raw_slug(&self) -> u32 {
        (self.0.as_limbs()[3] >> 32) as u32
    }

    /// The capacitor address stored in the middle 160 bits.
    pub fn capacitor(&self) -> Address {
        let bytes = self.0.to_be_bytes::<32>();
        Address::from_slice(&bytes[4..24])
    }

    /// The nonce stored in the low 64 bits.
    pub const fn nonce(&self) -> u64 {
        self.0.as_limbs()[0]
    }

    /// Split the identifier into its components.
    pub fn decode(&self) -> Result<PacketIdParts, PacketIdError> {
        Ok(PacketIdParts {
            chain_slug: ChainSlug::try_from(self.raw_slug())?,
            capacitor: self.capacitor(),
            nonce: self.nonce(),
        })
    }

    /// The identifier as a 32-byte word.
    pub fn to_b256(&self) -> B256 {
        B256::from(self.0)
    }

    /// `0x` + hex(slug) + hex(capacitor) + hex(nonce) padded to 16 digits.
    ///
    /// Numerically equal to the identifier. Useful when comparing against
    /// output of older tooling.
    pub fn legacy_hex(&self) -> String {
        format!("0x{:x}{}{:016x}", self.raw_slug(), hex::encode(self.capacitor()), self.nonce())
    }
}

impl From<PacketIdParts> for PacketId {
    fn from(parts: PacketIdParts) -> Self {
        Self::new(parts.chain_slug, parts.capacitor, parts.nonce)
    }
}

impl From<B256> for PacketId {
    fn from(word: B256) -> Self {
        Self(U256::from_be_bytes(word.0))
    }
}

impl From<PacketId> for B256 {
    fn from(id: PacketId) -> Self {
        id.to_b256()
    }
}

impl From<U256> for PacketId {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl From<PacketId> for U256 {
    fn from(id: PacketId) -> Self {
        id.0
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PacketId {
    type Err = PacketIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => U256::from_str_radix(hex, 16),
            None => U256::from_str_radix(s, 10),
        };
        parsed.map(Self).map_err(|_| PacketIdError::Parse(s.to_owned()))
    }
}

impl Serialize for PacketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PacketId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
