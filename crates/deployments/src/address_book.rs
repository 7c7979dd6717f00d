use crate::{AddressBookError, Result};
use alloy::primitives::Address;
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use socket_constants::ChainSlug;
use std::{collections::BTreeMap, fmt, fs, io, path::Path};
use tracing::debug;

/// A core contract deployed once per chain.
///
/// Variants are listed in deployment order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CoreContract {
    /// Message hasher.
    Hasher,
    /// Signature verifier shared by managers and switchboards.
    SignatureVerifier,
    /// Deploys capacitor/decapacitor pairs.
    CapacitorFactory,
    /// Relative gas price oracle.
    GasPriceOracle,
    /// Execution fee manager.
    ExecutionManager,
    /// Transmission fee manager.
    TransmitManager,
    /// The Socket.
    Socket,
    /// Fast switchboard.
    FastSwitchboard,
    /// Optimistic switchboard.
    OptimisticSwitchboard,
}

impl CoreContract {
    /// Every core contract, in deployment order.
    pub const ALL: [Self; 9] = [
        Self::Hasher,
        Self::SignatureVerifier,
        Self::CapacitorFactory,
        Self::GasPriceOracle,
        Self::ExecutionManager,
        Self::TransmitManager,
        Self::Socket,
        Self::FastSwitchboard,
        Self::OptimisticSwitchboard,
    ];

    /// The contract name, as used for artifacts and address book keys.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hasher => "Hasher",
            Self::SignatureVerifier => "SignatureVerifier",
            Self::CapacitorFactory => "CapacitorFactory",
            Self::GasPriceOracle => "GasPriceOracle",
            Self::ExecutionManager => "ExecutionManager",
            Self::TransmitManager => "TransmitManager",
            Self::Socket => "Socket",
            Self::FastSwitchboard => "FastSwitchboard",
            Self::OptimisticSwitchboard => "OptimisticSwitchboard",
        }
    }

    /// Look a contract up by [`Self::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for CoreContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// How messages on a path are verified.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrationType {
    /// Watcher-attested fast path.
    Fast,
    /// Second-generation fast path, served by its own switchboard.
    Fast2,
    /// Timeout-based optimistic path.
    Optimistic,
    /// Canonical rollup bridge.
    NativeBridge,
}

impl IntegrationType {
    /// The core switchboard serving this integration, if it is one of the
    /// chain-wide deployments.
    pub const fn switchboard(self) -> Option<CoreContract> {
        match self {
            Self::Fast => Some(CoreContract::FastSwitchboard),
            Self::Optimistic => Some(CoreContract::OptimisticSwitchboard),
            Self::Fast2 | Self::NativeBridge => None,
        }
    }
}

impl fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Fast => "FAST",
            Self::Fast2 => "FAST2",
            Self::Optimistic => "OPTIMISTIC",
            Self::NativeBridge => "NATIVE_BRIDGE",
        })
    }
}

/// Contracts serving one (remote chain, integration) path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationAddresses {
    /// Switchboard verifying the path.
    pub switchboard: Address,
    /// Outbound capacitor.
    pub capacitor: Address,
    /// Inbound decapacitor.
    pub decapacitor: Address,
}

type Integrations = BTreeMap<ChainSlug, BTreeMap<IntegrationType, IntegrationAddresses>>;

const START_BLOCK_KEY: &str = "startBlock";
const INTEGRATIONS_KEY: &str = "integrations";

/// Every address deployed on a single chain.
///
/// Serialized as one JSON object: core contracts under their names, plus
/// `startBlock` and `integrations`. Keys this tooling does not manage are
/// kept verbatim so that a load/save cycle never drops them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainAddresses {
    cores: BTreeMap<CoreContract, Address>,
    /// Block at which the first contract was deployed.
    pub start_block: Option<u64>,
    integrations: Integrations,
    extra: BTreeMap<String, serde_json::Value>,
}

impl ChainAddresses {
    /// Address of a core contract, if deployed.
    pub fn core(&self, contract: CoreContract) -> Option<Address> {
        self.cores.get(&contract).copied()
    }

    /// Record a core contract.
    pub fn set_core(&mut self, contract: CoreContract, address: Address) -> &mut Self {
        self.cores.insert(contract, address);
        self
    }

    /// Builder-style [`Self::set_core`].
    pub fn with_core(mut self, contract: CoreContract, address: Address) -> Self {
        self.set_core(contract, address);
        self
    }

    /// Deployed core contracts, in deployment order.
    pub fn cores(&self) -> impl Iterator<Item = (CoreContract, Address)> + '_ {
        self.cores.iter().map(|(c, a)| (*c, *a))
    }

    /// Entries not managed by this tooling, such as periphery contracts.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Contracts serving a path, if connected.
    pub fn integration(
        &self,
        remote: ChainSlug,
        integration: IntegrationType,
    ) -> Option<&IntegrationAddresses> {
        self.integrations.get(&remote)?.get(&integration)
    }

    /// Record the contracts serving a path.
    pub fn set_integration(
        &mut self,
        remote: ChainSlug,
        integration: IntegrationType,
        addresses: IntegrationAddresses,
    ) -> &mut Self {
        self.integrations.entry(remote).or_default().insert(integration, addresses);
        self
    }

    /// Builder-style [`Self::set_integration`].
    pub fn with_integration(
        mut self,
        remote: ChainSlug,
        integration: IntegrationType,
        addresses: IntegrationAddresses,
    ) -> Self {
        self.set_integration(remote, integration, addresses);
        self
    }

    /// Every connected path as `(remote, integration, addresses)`.
    pub fn integrations(
        &self,
    ) -> impl Iterator<Item = (ChainSlug, IntegrationType, &IntegrationAddresses)> + '_ {
        self.integrations.iter().flat_map(|(remote, by_type)| {
            by_type.iter().map(move |(integration, addresses)| (*remote, *integration, addresses))
        })
    }

    /// Overwrite every entry present in `other`. Entries absent from `other`
    /// are kept.
    pub fn merge(&mut self, other: ChainAddresses) {
        self.cores.extend(other.cores);
        if other.start_block.is_some() {
            self.start_block = other.start_block;
        }
        for (remote, by_type) in other.integrations {
            self.integrations.entry(remote).or_default().extend(by_type);
        }
        self.extra.extend(other.extra);
    }
}

impl Serialize for ChainAddresses {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (contract, address) in &self.cores {
            map.serialize_entry(contract.name(), address)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        if let Some(block) = self.start_block {
            map.serialize_entry(START_BLOCK_KEY, &block)?;
        }
        if !self.integrations.is_empty() {
            map.serialize_entry(INTEGRATIONS_KEY, &self.integrations)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChainAddresses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ChainAddressesVisitor;

        impl<'de> Visitor<'de> for ChainAddressesVisitor {
            type Value = ChainAddresses;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of deployed addresses")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<ChainAddresses, A::Error> {
                let mut out = ChainAddresses::default();
                while let Some(key) = access.next_key::<String>()? {
                    if key == START_BLOCK_KEY {
                        out.start_block = access.next_value()?;
                    } else if key == INTEGRATIONS_KEY {
                        out.integrations = access.next_value()?;
                    } else if let Some(contract) = CoreContract::from_name(&key) {
                        out.cores.insert(contract, access.next_value()?);
                    } else {
                        out.extra.insert(key, access.next_value()?);
                    }
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(ChainAddressesVisitor)
    }
}

/// Deployed addresses of every chain, persisted as a JSON file keyed by
/// chain slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    chains: BTreeMap<ChainSlug, ChainAddresses>,
}

impl AddressBook {
    /// An empty book.
    pub const fn new() -> Self {
        Self { chains: BTreeMap::new() }
    }

    /// Load the book at `path`. A missing file yields an empty book.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no address book, starting empty");
                return Ok(Self::new());
            }
            Err(e) => return Err(AddressBookError::io(path, e)),
        };
        serde_json::from_str(&contents).map_err(|e| AddressBookError::json(path, e))
    }

    /// Write the book to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AddressBookError::io(parent, e))?;
        }
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| AddressBookError::json(path, e))?;
        json.push('\n');
        fs::write(path, json).map_err(|e| AddressBookError::io(path, e))
    }

    /// Merge `addresses` into the entry for `slug`, creating it if absent.
    pub fn merge_chain(&mut self, slug: ChainSlug, addresses: ChainAddresses) -> &ChainAddresses {
        let entry = self.chains.entry(slug).or_default();
        entry.merge(addresses);
        entry
    }

    /// Addresses on a chain, if any were recorded.
    pub fn chain(&self, slug: ChainSlug) -> Option<&ChainAddresses> {
        self.chains.get(&slug)
    }

    /// Every chain with recorded addresses.
    pub fn chains(&self) -> impl Iterator<Item = (ChainSlug, &ChainAddresses)> + '_ {
        self.chains.iter().map(|(slug, addresses)| (*slug, addresses))
    }

    /// Address of a core contract on a chain.
    pub fn core(&self, slug: ChainSlug, contract: CoreContract) -> Result<Address> {
        self.chain(slug)
            .and_then(|c| c.core(contract))
            .ok_or_else(|| AddressBookError::not_found(slug, contract))
    }

    /// Contracts serving the path `slug -> remote` for an integration.
    pub fn integration(
        &self,
        slug: ChainSlug,
        remote: ChainSlug,
        integration: IntegrationType,
    ) -> Result<IntegrationAddresses> {
        self.chain(slug)
            .and_then(|c| c.integration(remote, integration))
            .copied()
            .ok_or_else(|| {
                AddressBookError::not_found(slug, format!("{integration} integration to {remote}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn sample() -> AddressBook {
        let mut book = AddressBook::new();
        let mut hardhat = ChainAddresses::default()
            .with_core(CoreContract::Socket, addr(1))
            .with_core(CoreContract::FastSwitchboard, addr(2))
            .with_integration(
                ChainSlug::Sepolia,
                IntegrationType::Fast,
                IntegrationAddresses { switchboard: addr(2), capacitor: addr(3), decapacitor: addr(4) },
            );
        hardhat.start_block = Some(100);
        book.merge_chain(ChainSlug::Hardhat, hardhat);
        book
    }

    #[test]
    fn json_layout() {
        let json = serde_json::to_value(sample()).unwrap();
        let chain = &json["31337"];
        assert_eq!(chain["Socket"], format!("{}", addr(1)).to_lowercase());
        assert_eq!(chain["startBlock"], 100);
        assert_eq!(
            chain["integrations"]["11155111"]["FAST"]["capacitor"],
            format!("{}", addr(3)).to_lowercase()
        );
        assert!(chain.get("Hasher").is_none());

        let back: AddressBook = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn merge_overwrites_without_deleting() {
        let mut book = sample();
        book.merge_chain(
            ChainSlug::Hardhat,
            ChainAddresses::default()
                .with_core(CoreContract::Socket, addr(9))
                .with_core(CoreContract::Hasher, addr(8)),
        );
        assert_eq!(book.core(ChainSlug::Hardhat, CoreContract::Socket).unwrap(), addr(9));
        assert_eq!(book.core(ChainSlug::Hardhat, CoreContract::Hasher).unwrap(), addr(8));
        assert_eq!(book.core(ChainSlug::Hardhat, CoreContract::FastSwitchboard).unwrap(), addr(2));
        assert_eq!(book.chain(ChainSlug::Hardhat).unwrap().start_block, Some(100));
        assert!(book.integration(ChainSlug::Hardhat, ChainSlug::Sepolia, IntegrationType::Fast).is_ok());
    }

    #[test]
    fn missing_entries() {
        let book = sample();
        let err = book.core(ChainSlug::Hardhat, CoreContract::Hasher).unwrap_err();
        assert!(matches!(
            err,
            AddressBookError::DeployedAddressNotFound { slug: ChainSlug::Hardhat, ref contract }
                if contract == "Hasher"
        ));
        assert!(book.core(ChainSlug::Base, CoreContract::Socket).is_err());
        assert!(book
            .integration(ChainSlug::Hardhat, ChainSlug::Sepolia, IntegrationType::Optimistic)
            .is_err());
    }

    #[test]
    fn iteration_order() {
        let chain = sample().chain(ChainSlug::Hardhat).cloned().unwrap();
        let cores: Vec<_> = chain.cores().map(|(c, _)| c).collect();
        assert_eq!(cores, [CoreContract::Socket, CoreContract::FastSwitchboard]);
        let paths: Vec<_> = chain.integrations().map(|(r, i, _)| (r, i)).collect();
        assert_eq!(paths, [(ChainSlug::Sepolia, IntegrationType::Fast)]);
    }
}
