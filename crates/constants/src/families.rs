use crate::ChainSlug;

/// Rollup family of a chain. Each family has its own finality defaults.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ChainFamily {
    /// No special classification. Uses the global defaults.
    #[default]
    EthLike,
    /// OP-stack L2s.
    OpStack,
    /// Arbitrum Orbit chains settling to an Arbitrum L2.
    ArbitrumL3,
    /// Polygon CDK chains.
    PolygonCdk,
}

impl ChainFamily {
    /// Human-readable family name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EthLike => "eth-like",
            Self::OpStack => "op-stack",
            Self::ArbitrumL3 => "arbitrum-l3",
            Self::PolygonCdk => "polygon-cdk",
        }
    }
}

impl core::fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

const OP_STACK: &[ChainSlug] = &[
    ChainSlug::Optimism,
    ChainSlug::OptimismSepolia,
    ChainSlug::Base,
    ChainSlug::BaseSepolia,
    ChainSlug::Mode,
    ChainSlug::ModeTestnet,
    ChainSlug::Lyra,
    ChainSlug::LyraTestnet,
    ChainSlug::Aevo,
    ChainSlug::AevoTestnet,
    ChainSlug::Blast,
    ChainSlug::Mantle,
    ChainSlug::PolynomialTestnet,
];

const ARBITRUM_L3: &[ChainSlug] = &[ChainSlug::SyndrSepoliaL3, ChainSlug::XaiTestnet];

const POLYGON_CDK: &[ChainSlug] = &[ChainSlug::PolygonZkEvm, ChainSlug::CdkTestnet];

/// Family membership lists. Folded into a single slug-to-family map by
/// [`ChainRegistry`], which rejects any slug listed twice.
///
/// [`ChainRegistry`]: crate::ChainRegistry
pub const FAMILY_LISTS: &[(ChainFamily, &[ChainSlug])] = &[
    (ChainFamily::OpStack, OP_STACK),
    (ChainFamily::ArbitrumL3, ARBITRUM_L3),
    (ChainFamily::PolygonCdk, POLYGON_CDK),
];

/// Chains with effectively instant settlement. These resolve to the
/// time-based zero-finality policy ahead of any family default.
pub const ZERO_FINALITY_CHAINS: &[ChainSlug] =
    &[ChainSlug::Hardhat, ChainSlug::Reya, ChainSlug::Kinto, ChainSlug::Linea];
