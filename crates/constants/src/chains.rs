use alloy::primitives::U256;
use core::fmt;
use std::str::FromStr;

/// Error returned when a numeric slug is not in the registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chain slug {0}")]
pub struct UnknownChainSlug(pub u64);

/// Error type for parsing a [`ChainSlug`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChainError {
    /// The string is a number, but not a registered slug.
    #[error(transparent)]
    Unknown(#[from] UnknownChainSlug),
    /// The string is neither a number nor a known network key.
    #[error("chain name {0} is not parseable")]
    ChainNotSupported(String),
}

/// Settlement layer of a chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    /// A base layer chain.
    L1,
    /// A chain settling to an L1.
    L2,
    /// A chain settling to an L2.
    L3,
}

/// Registry record for a chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChainInfo {
    /// The Socket chain slug.
    pub slug: u32,
    /// The chain's native EIP-155 chain id.
    pub chain_id: u64,
    /// Network key, as used for RPC environment variables and CLI arguments.
    pub network_key: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// `true` for production networks.
    pub is_mainnet: bool,
    /// Settlement layer.
    pub layer: Layer,
}

define_chains! {
    /// Ethereum mainnet.
    Mainnet = 1 { chain_id: 1, key: "mainnet", name: "Ethereum", mainnet: true, layer: L1 },
    /// OP mainnet.
    Optimism = 10 { chain_id: 10, key: "optimism", name: "OP Mainnet", mainnet: true, layer: L2 },
    /// BNB smart chain.
    Bsc = 56 { chain_id: 56, key: "bsc", name: "BNB Smart Chain", mainnet: true, layer: L1 },
    /// Polygon PoS.
    Polygon = 137 { chain_id: 137, key: "polygon", name: "Polygon", mainnet: true, layer: L1 },
    /// Lyra.
    Lyra = 957 { chain_id: 957, key: "lyra", name: "Lyra", mainnet: true, layer: L2 },
    /// Polygon zkEVM.
    PolygonZkEvm = 1101 {
        chain_id: 1101,
        key: "polygon-zkevm",
        name: "Polygon zkEVM",
        mainnet: true,
        layer: L2,
    },
    /// Reya.
    Reya = 1729 { chain_id: 1729, key: "reya", name: "Reya", mainnet: true, layer: L2 },
    /// Aevo.
    Aevo = 2999 { chain_id: 2999, key: "aevo", name: "Aevo", mainnet: true, layer: L2 },
    /// Mantle.
    Mantle = 5000 { chain_id: 5000, key: "mantle", name: "Mantle", mainnet: true, layer: L2 },
    /// Kinto.
    Kinto = 7887 { chain_id: 7887, key: "kinto", name: "Kinto", mainnet: true, layer: L2 },
    /// Base.
    Base = 8453 { chain_id: 8453, key: "base", name: "Base", mainnet: true, layer: L2 },
    /// Mode.
    Mode = 34443 { chain_id: 34443, key: "mode", name: "Mode", mainnet: true, layer: L2 },
    /// Arbitrum One.
    Arbitrum = 42161 {
        chain_id: 42161,
        key: "arbitrum",
        name: "Arbitrum One",
        mainnet: true,
        layer: L2,
    },
    /// Linea.
    Linea = 59144 { chain_id: 59144, key: "linea", name: "Linea", mainnet: true, layer: L2 },
    /// Blast.
    Blast = 81457 { chain_id: 81457, key: "blast", name: "Blast", mainnet: true, layer: L2 },

    /// BNB smart chain testnet.
    BscTestnet = 97 {
        chain_id: 97,
        key: "bsc-testnet",
        name: "BNB Testnet",
        mainnet: false,
        layer: L1,
    },
    /// Lyra testnet.
    LyraTestnet = 901 {
        chain_id: 901,
        key: "lyra-testnet",
        name: "Lyra Testnet",
        mainnet: false,
        layer: L2,
    },
    /// Mode testnet.
    ModeTestnet = 919 {
        chain_id: 919,
        key: "mode-testnet",
        name: "Mode Testnet",
        mainnet: false,
        layer: L2,
    },
    /// Local hardhat / anvil node.
    Hardhat = 31337 { chain_id: 31337, key: "hardhat", name: "Hardhat", mainnet: false, layer: L1 },
    /// Polygon Amoy.
    PolygonAmoy = 80002 {
        chain_id: 80002,
        key: "polygon-amoy",
        name: "Polygon Amoy",
        mainnet: false,
        layer: L1,
    },
    /// Polynomial testnet.
    PolynomialTestnet = 80008 {
        chain_id: 80008,
        key: "polynomial-testnet",
        name: "Polynomial Testnet",
        mainnet: false,
        layer: L2,
    },
    /// Base Sepolia.
    BaseSepolia = 84532 {
        chain_id: 84532,
        key: "base-sepolia",
        name: "Base Sepolia",
        mainnet: false,
        layer: L2,
    },
    /// Arbitrum Sepolia.
    ArbitrumSepolia = 421614 {
        chain_id: 421614,
        key: "arbitrum-sepolia",
        name: "Arbitrum Sepolia",
        mainnet: false,
        layer: L2,
    },
    /// Syndr L3 on Arbitrum Sepolia.
    SyndrSepoliaL3 = 444444 {
        chain_id: 444444,
        key: "syndr-sepolia-l3",
        name: "Syndr Sepolia",
        mainnet: false,
        layer: L3,
    },
    /// Polygon CDK testnet.
    CdkTestnet = 686669576 {
        chain_id: 686669576,
        key: "cdk-testnet",
        name: "CDK Testnet",
        mainnet: false,
        layer: L2,
    },
    /// Sepolia.
    Sepolia = 11155111 {
        chain_id: 11155111,
        key: "sepolia",
        name: "Sepolia",
        mainnet: false,
        layer: L1,
    },
    /// Aevo testnet.
    AevoTestnet = 11155112 {
        chain_id: 11155112,
        key: "aevo-testnet",
        name: "Aevo Testnet",
        mainnet: false,
        layer: L2,
    },
    /// OP Sepolia.
    OptimismSepolia = 11155420 {
        chain_id: 11155420,
        key: "optimism-sepolia",
        name: "OP Sepolia",
        mainnet: false,
        layer: L2,
    },
    /// Xai testnet. Its native chain id does not fit in a `uint32` slug.
    XaiTestnet = 1399904803 {
        chain_id: 47279324479,
        key: "xai-testnet",
        name: "Xai Testnet",
        mainnet: false,
        layer: L3,
    },
}

impl ChainSlug {
    /// The numeric slug.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// The chain's native chain id.
    pub const fn chain_id(self) -> u64 {
        self.info().chain_id
    }

    /// Network key, e.g. `arbitrum-sepolia`.
    pub const fn network_key(self) -> &'static str {
        self.info().network_key
    }

    /// Human-readable chain name.
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    /// `true` for production networks.
    pub const fn is_mainnet(self) -> bool {
        self.info().is_mainnet
    }

    /// Settlement layer of the chain.
    pub const fn layer(self) -> Layer {
        self.info().layer
    }

    /// Find the slug of the chain with the given native chain id.
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.iter().copied().find(|slug| slug.chain_id() == chain_id)
    }

    /// Find the slug with the given network key.
    pub fn from_network_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|slug| slug.network_key() == key)
    }

    /// Name of the environment variable holding this chain's RPC URL, e.g.
    /// `ARBITRUM_SEPOLIA_RPC`.
    pub fn rpc_env_var(self) -> String {
        format!("{}_RPC", self.network_key().replace('-', "_").to_uppercase())
    }

    /// Iterate over all mainnet chains.
    pub fn mainnets() -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied().filter(|slug| slug.is_mainnet())
    }

    /// Iterate over all testnet chains.
    pub fn testnets() -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied().filter(|slug| !slug.is_mainnet())
    }
}

impl TryFrom<u32> for ChainSlug {
    type Error = UnknownChainSlug;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_u32(value).ok_or(UnknownChainSlug(value as u64))
    }
}

impl TryFrom<u64> for ChainSlug {
    type Error = UnknownChainSlug;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(Self::from_u32)
            .ok_or(UnknownChainSlug(value))
    }
}

impl From<ChainSlug> for u32 {
    fn from(slug: ChainSlug) -> Self {
        slug.as_u32()
    }
}

impl From<ChainSlug> for U256 {
    fn from(slug: ChainSlug) -> Self {
        U256::from(slug.as_u32())
    }
}

impl fmt::Display for ChainSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.network_key(), self.as_u32())
    }
}

impl FromStr for ChainSlug {
    type Err = ParseChainError;

    /// Parse a slug from its numeric value or its network key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(n) = s.parse::<u64>() {
            return Ok(Self::try_from(n)?);
        }
        Self::from_network_key(&s).ok_or(ParseChainError::ChainNotSupported(s))
    }
}
