use alloy::primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Access-control roles granted on Socket contracts.
///
/// On-chain, a role is the keccak256 hash of its name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    /// May seal and propose packets.
    Transmitter,
    /// May execute inbound messages.
    Executor,
    /// May attest packets and trip paths.
    Watcher,
    /// May sign fee and gas parameter updates.
    FeesUpdater,
    /// May change governance-controlled parameters.
    Governance,
    /// May trip paths and switchboards.
    Tripper,
    /// May untrip paths and switchboards.
    Untripper,
}

impl Role {
    /// Every role.
    pub const ALL: &'static [Role] = &[
        Self::Transmitter,
        Self::Executor,
        Self::Watcher,
        Self::FeesUpdater,
        Self::Governance,
        Self::Tripper,
        Self::Untripper,
    ];

    /// The role's name as hashed on-chain.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transmitter => "TRANSMITTER_ROLE",
            Self::Executor => "EXECUTOR_ROLE",
            Self::Watcher => "WATCHER_ROLE",
            Self::FeesUpdater => "FEES_UPDATER_ROLE",
            Self::Governance => "GOVERNANCE_ROLE",
            Self::Tripper => "TRIP_ROLE",
            Self::Untripper => "UNTRIP_ROLE",
        }
    }

    /// The role identifier passed to `grantRole` and `hasRole`.
    pub fn id(self) -> B256 {
        keccak256(self.name())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_suffix("_ROLE").unwrap_or(&upper);
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.name().strip_suffix("_ROLE") == Some(name))
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.name().to_owned()
    }
}
