use crate::{ChainFamily, ChainSlug};
use serde::{Deserialize, Serialize};

/// How a chain's finality thresholds are denominated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalityKind {
    /// Thresholds are block counts.
    Block,
    /// Thresholds are seconds.
    Time,
}

/// A named finality confidence tier.
///
/// The discriminants are the ordinals used on-chain and in transmission
/// parameters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FinalityBucket {
    /// Lowest latency, lowest confidence.
    #[default]
    Fast = 1,
    /// Balanced.
    Medium = 2,
    /// Highest confidence.
    Slow = 3,
}

impl FinalityBucket {
    /// The on-chain ordinal.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a bucket by its on-chain ordinal.
    pub const fn from_ordinal(ordinal: u64) -> Option<Self> {
        match ordinal {
            1 => Some(Self::Fast),
            2 => Some(Self::Medium),
            3 => Some(Self::Slow),
            _ => None,
        }
    }
}

/// Finality thresholds for a chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalityPolicy {
    /// Whether thresholds count blocks or seconds.
    pub kind: FinalityKind,
    /// Threshold for [`FinalityBucket::Fast`].
    pub fast: u64,
    /// Threshold for [`FinalityBucket::Medium`].
    pub medium: u64,
    /// Threshold for [`FinalityBucket::Slow`].
    pub slow: u64,
    /// Bucket used when a caller does not pick one.
    #[serde(default)]
    pub default_bucket: FinalityBucket,
}

impl FinalityPolicy {
    /// A block-denominated policy with the fast default bucket.
    pub const fn blocks(fast: u64, medium: u64, slow: u64) -> Self {
        Self { kind: FinalityKind::Block, fast, medium, slow, default_bucket: FinalityBucket::Fast }
    }

    /// A time-denominated policy with the fast default bucket.
    pub const fn seconds(fast: u64, medium: u64, slow: u64) -> Self {
        Self { kind: FinalityKind::Time, fast, medium, slow, default_bucket: FinalityBucket::Fast }
    }

    /// Replace the default bucket.
    pub const fn with_default_bucket(mut self, bucket: FinalityBucket) -> Self {
        self.default_bucket = bucket;
        self
    }

    /// Threshold for the given bucket.
    pub const fn threshold(&self, bucket: FinalityBucket) -> u64 {
        match bucket {
            FinalityBucket::Fast => self.fast,
            FinalityBucket::Medium => self.medium,
            FinalityBucket::Slow => self.slow,
        }
    }

    /// Threshold for the default bucket.
    pub const fn default_threshold(&self) -> u64 {
        self.threshold(self.default_bucket)
    }

    /// Block-based default for a rollup family.
    pub const fn family_default(family: ChainFamily) -> Self {
        match family {
            ChainFamily::EthLike => GLOBAL_FINALITY,
            ChainFamily::OpStack => Self::blocks(1, 30, 150),
            ChainFamily::ArbitrumL3 => Self::blocks(1, 15, 50),
            ChainFamily::PolygonCdk => Self::blocks(1, 64, 256),
        }
    }
}

/// Time-based policy for chains with effectively instant settlement.
pub const ZERO_FINALITY: FinalityPolicy = FinalityPolicy::seconds(30, 60, 120);

/// Policy for chains with no override and no family.
pub const GLOBAL_FINALITY: FinalityPolicy = FinalityPolicy::blocks(1, 10, 20);

/// Multiplier applied to a live gas price when no override sets one.
pub const DEFAULT_GAS_PRICE_MULTIPLIER: f64 = 1.05;

/// EIP-2718 transaction type used when submitting transactions.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum TxType {
    /// Legacy transaction.
    #[default]
    Legacy = 0,
    /// EIP-2930 access-list transaction.
    AccessList = 1,
    /// EIP-1559 transaction.
    Eip1559 = 2,
}

impl TryFrom<u8> for TxType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::AccessList),
            2 => Ok(Self::Eip1559),
            other => Err(format!("unsupported transaction type {other}")),
        }
    }
}

impl From<TxType> for u8 {
    fn from(value: TxType) -> Self {
        value as u8
    }
}

/// Transaction submission overrides for a chain.
///
/// A fixed `gas_price` always wins over `gas_price_multiplier`. `gas_limit`
/// is independent of both.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasOverridePolicy {
    /// Fixed gas limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    /// Fixed gas price, in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    /// Multiplier applied to the live gas price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_multiplier: Option<f64>,
    /// Transaction type.
    #[serde(default, rename = "type")]
    pub tx_type: TxType,
}

impl GasOverridePolicy {
    /// An empty policy: live gas price, default multiplier, legacy type.
    pub const fn new() -> Self {
        Self { gas_limit: None, gas_price: None, gas_price_multiplier: None, tx_type: TxType::Legacy }
    }

    /// Set a fixed gas limit.
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set a fixed gas price.
    pub const fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Set a gas price multiplier.
    pub const fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.gas_price_multiplier = Some(multiplier);
        self
    }

    /// Set the transaction type.
    pub const fn with_tx_type(mut self, tx_type: TxType) -> Self {
        self.tx_type = tx_type;
        self
    }

    /// The effective multiplier in thousandths, rounded to three decimal
    /// places. Falls back to [`DEFAULT_GAS_PRICE_MULTIPLIER`].
    pub fn multiplier_thousandths(&self) -> u128 {
        let multiplier = self.gas_price_multiplier.unwrap_or(DEFAULT_GAS_PRICE_MULTIPLIER);
        (multiplier * 1000.0).round().max(0.0) as u128
    }
}

const FINALITY_OVERRIDES: &[(ChainSlug, FinalityPolicy)] = &[
    (ChainSlug::Mainnet, FinalityPolicy::blocks(6, 32, 64)),
    (ChainSlug::Sepolia, FinalityPolicy::blocks(2, 6, 12)),
    (ChainSlug::Bsc, FinalityPolicy::blocks(3, 15, 20)),
    (ChainSlug::Polygon, FinalityPolicy::blocks(64, 256, 512)),
    (ChainSlug::Arbitrum, FinalityPolicy::blocks(1, 120, 900)),
];

const DEFAULT_BUCKET_OVERRIDES: &[(ChainSlug, FinalityBucket)] = &[
    (ChainSlug::Mainnet, FinalityBucket::Medium),
    (ChainSlug::Bsc, FinalityBucket::Medium),
    (ChainSlug::Polygon, FinalityBucket::Medium),
];

const GAS_OVERRIDES: &[(ChainSlug, GasOverridePolicy)] = &[
    (ChainSlug::Mainnet, GasOverridePolicy::new().with_gas_limit(6_000_000).with_multiplier(1.2)),
    (ChainSlug::Arbitrum, GasOverridePolicy::new().with_gas_limit(200_000_000)),
    (
        ChainSlug::ArbitrumSepolia,
        GasOverridePolicy::new()
            .with_tx_type(TxType::AccessList)
            .with_gas_limit(50_000_000)
            .with_gas_price(1_867_830_000),
    ),
    (ChainSlug::Bsc, GasOverridePolicy::new().with_gas_limit(6_000_000)),
    (ChainSlug::BscTestnet, GasOverridePolicy::new().with_gas_limit(6_000_000)),
    (ChainSlug::Polygon, GasOverridePolicy::new().with_multiplier(2.0)),
    (ChainSlug::PolygonAmoy, GasOverridePolicy::new().with_gas_price(50_000_000_000)),
    (
        ChainSlug::Aevo,
        GasOverridePolicy::new().with_gas_price(100_000_000).with_multiplier(1.5),
    ),
    (
        ChainSlug::Mantle,
        GasOverridePolicy::new().with_tx_type(TxType::Eip1559).with_gas_limit(1_000_000_000),
    ),
    (ChainSlug::SyndrSepoliaL3, GasOverridePolicy::new().with_gas_price(1_000_000_000)),
];

const RESYNC_INTERVALS: &[(ChainSlug, u64)] =
    &[(ChainSlug::Polygon, 100), (ChainSlug::PolygonZkEvm, 50), (ChainSlug::Bsc, 20)];

fn lookup<T: Copy>(table: &[(ChainSlug, T)], slug: ChainSlug) -> Option<T> {
    table.iter().find(|(s, _)| *s == slug).map(|(_, v)| *v)
}

/// Explicit finality override for a chain, if any.
pub(crate) fn finality_override(slug: ChainSlug) -> Option<FinalityPolicy> {
    lookup(FINALITY_OVERRIDES, slug)
}

/// Explicit default-bucket override for a chain, if any.
pub(crate) fn default_bucket_override(slug: ChainSlug) -> Option<FinalityBucket> {
    lookup(DEFAULT_BUCKET_OVERRIDES, slug)
}

/// Built-in gas overrides for a chain, if any.
pub(crate) fn gas_override(slug: ChainSlug) -> Option<GasOverridePolicy> {
    lookup(GAS_OVERRIDES, slug)
}

/// Re-sync interval for a chain, if any.
pub(crate) fn resync_interval(slug: ChainSlug) -> Option<u64> {
    lookup(RESYNC_INTERVALS, slug)
}

/// Every slug with an explicit finality override.
pub(crate) fn overridden_slugs() -> impl Iterator<Item = ChainSlug> {
    FINALITY_OVERRIDES.iter().map(|(s, _)| *s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_rounds_to_thousandths() {
        assert_eq!(GasOverridePolicy::new().multiplier_thousandths(), 1050);
        assert_eq!(GasOverridePolicy::new().with_multiplier(1.23456).multiplier_thousandths(), 1235);
        assert_eq!(GasOverridePolicy::new().with_multiplier(2.0).multiplier_thousandths(), 2000);
        assert_eq!(GasOverridePolicy::new().with_multiplier(-1.0).multiplier_thousandths(), 0);
    }

    #[test]
    fn gas_override_serde() {
        let policy: GasOverridePolicy =
            serde_json::from_str(r#"{"type": 1, "gasLimit": 50000000, "gasPrice": 1867830000}"#)
                .unwrap();
        assert_eq!(policy, lookup(GAS_OVERRIDES, ChainSlug::ArbitrumSepolia).unwrap());

        let empty: GasOverridePolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GasOverridePolicy::new());

        assert!(serde_json::from_str::<GasOverridePolicy>(r#"{"type": 9}"#).is_err());
    }

    #[test]
    fn finality_policy_thresholds() {
        let policy = FinalityPolicy::blocks(1, 10, 20).with_default_bucket(FinalityBucket::Slow);
        assert_eq!(policy.threshold(FinalityBucket::Medium), 10);
        assert_eq!(policy.default_threshold(), 20);
    }

    #[test]
    fn bucket_ordinals() {
        for bucket in [FinalityBucket::Fast, FinalityBucket::Medium, FinalityBucket::Slow] {
            assert_eq!(FinalityBucket::from_ordinal(bucket.ordinal() as u64), Some(bucket));
        }
        assert_eq!(FinalityBucket::from_ordinal(0), None);
    }
}
