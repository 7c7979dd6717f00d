use crate::{AddressBookError, Result};
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use socket_bindings::Role;
use socket_constants::{ChainSlug, GasOverridePolicy};
use std::{collections::BTreeMap, fs, path::Path};

/// Timeout used by optimistic switchboards when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 7200;

/// Addresses holding privileged roles on a chain.
///
/// Keys follow the `<role>Address` form of `ownerAddress`; the bare role
/// names are accepted too. Unknown keys are rejected so that a misspelt
/// role cannot silently skip its grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleOwners {
    /// Owner of every deployed contract.
    #[serde(alias = "owner")]
    pub owner_address: Address,
    /// Holder of [`Role::Transmitter`].
    #[serde(
        rename = "transmitterAddress",
        alias = "transmitter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transmitter: Option<Address>,
    /// Holder of [`Role::Executor`].
    #[serde(
        rename = "executorAddress",
        alias = "executor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub executor: Option<Address>,
    /// Holder of [`Role::Watcher`].
    #[serde(
        rename = "watcherAddress",
        alias = "watcher",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub watcher: Option<Address>,
    /// Holder of [`Role::FeesUpdater`].
    #[serde(
        rename = "feeUpdaterAddress",
        alias = "feeUpdater",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fees_updater: Option<Address>,
}

impl RoleOwners {
    /// Every configured `(role, holder)` pair.
    pub fn grants(&self) -> impl Iterator<Item = (Role, Address)> {
        [
            (Role::Transmitter, self.transmitter),
            (Role::Executor, self.executor),
            (Role::Watcher, self.watcher),
            (Role::FeesUpdater, self.fees_updater),
        ]
        .into_iter()
        .filter_map(|(role, holder)| holder.map(|h| (role, h)))
    }
}

/// Deployment parameters of a single chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Role holders.
    pub role_owners: RoleOwners,
    /// Chains this chain connects to.
    #[serde(default)]
    pub siblings: Vec<ChainSlug>,
    /// Optimistic switchboard timeout, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Largest `msg.value` accepted by the execution manager, in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_value_max_threshold: Option<U256>,
    /// Gas overrides replacing the built-in entry for this chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<GasOverridePolicy>,
}

impl ChainConfig {
    /// Switchboard timeout, falling back to [`DEFAULT_TIMEOUT_SECONDS`].
    pub fn timeout(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

/// Per-chain deployment parameters, loaded from a JSON file keyed by chain
/// slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainConfigs {
    chains: BTreeMap<ChainSlug, ChainConfig>,
}

impl ChainConfigs {
    /// Load the configs at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| AddressBookError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| AddressBookError::json(path, e))
    }

    /// Insert or replace the config of a chain.
    pub fn insert(&mut self, slug: ChainSlug, config: ChainConfig) {
        self.chains.insert(slug, config);
    }

    /// Config of a chain.
    pub fn get(&self, slug: ChainSlug) -> Result<&ChainConfig> {
        self.chains.get(&slug).ok_or(AddressBookError::MissingChainConfig(slug))
    }

    /// Gas overrides configured for a chain, if any.
    pub fn gas_overrides(&self, slug: ChainSlug) -> Option<GasOverridePolicy> {
        self.chains.get(&slug).and_then(|c| c.overrides)
    }

    /// Every configured chain.
    pub fn chains(&self) -> impl Iterator<Item = (ChainSlug, &ChainConfig)> + '_ {
        self.chains.iter().map(|(slug, config)| (*slug, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socket_constants::TxType;

    const CONFIG: &str = r#"{
        "421614": {
            "roleOwners": {
                "ownerAddress": "0x1111111111111111111111111111111111111111",
                "transmitter": "0x2222222222222222222222222222222222222222",
                "watcher": "0x3333333333333333333333333333333333333333"
            },
            "siblings": [11155111, 11155420],
            "timeout": 3600,
            "msgValueMaxThreshold": "0xde0b6b3a7640000",
            "overrides": { "type": 1, "gasLimit": 50000000 }
        },
        "11155111": {
            "roleOwners": { "ownerAddress": "0x1111111111111111111111111111111111111111" }
        }
    }"#;

    #[test]
    fn parses_config_file() {
        let configs: ChainConfigs = serde_json::from_str(CONFIG).unwrap();

        let arb = configs.get(ChainSlug::ArbitrumSepolia).unwrap();
        assert_eq!(arb.siblings, [ChainSlug::Sepolia, ChainSlug::OptimismSepolia]);
        assert_eq!(arb.timeout(), 3600);
        assert_eq!(arb.msg_value_max_threshold, Some(U256::from(1_000_000_000_000_000_000u64)));
        let grants: Vec<_> = arb.role_owners.grants().map(|(role, _)| role).collect();
        assert_eq!(grants, [Role::Transmitter, Role::Watcher]);

        let overrides = configs.gas_overrides(ChainSlug::ArbitrumSepolia).unwrap();
        assert_eq!(overrides.tx_type, TxType::AccessList);
        assert_eq!(overrides.gas_limit, Some(50_000_000));

        let sepolia = configs.get(ChainSlug::Sepolia).unwrap();
        assert_eq!(sepolia.timeout(), DEFAULT_TIMEOUT_SECONDS);
        assert!(sepolia.siblings.is_empty());
        assert!(configs.gas_overrides(ChainSlug::Sepolia).is_none());
    }

    #[test]
    fn role_owner_keys() {
        let owners: RoleOwners = serde_json::from_str(
            r#"{
                "ownerAddress": "0x1111111111111111111111111111111111111111",
                "executorAddress": "0x2222222222222222222222222222222222222222",
                "feeUpdater": "0x3333333333333333333333333333333333333333"
            }"#,
        )
        .unwrap();
        let grants: Vec<_> = owners.grants().collect();
        assert_eq!(
            grants,
            [
                (Role::Executor, Address::repeat_byte(0x22)),
                (Role::FeesUpdater, Address::repeat_byte(0x33)),
            ]
        );

        let json = serde_json::to_value(&owners).unwrap();
        assert_eq!(json["feeUpdaterAddress"], "0x3333333333333333333333333333333333333333");
        assert_eq!(serde_json::from_value::<RoleOwners>(json).unwrap(), owners);
    }

    #[test]
    fn unknown_role_owner_key_is_rejected() {
        let err = serde_json::from_str::<RoleOwners>(
            r#"{
                "ownerAddress": "0x1111111111111111111111111111111111111111",
                "feesUpdater": "0x2222222222222222222222222222222222222222"
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("feesUpdater"));
    }

    #[test]
    fn missing_chain() {
        let configs: ChainConfigs = serde_json::from_str(CONFIG).unwrap();
        assert!(matches!(
            configs.get(ChainSlug::Base),
            Err(AddressBookError::MissingChainConfig(ChainSlug::Base))
        ));
    }
}
