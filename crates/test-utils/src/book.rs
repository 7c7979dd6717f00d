//! A two chain deployment: Mainnet and Arbitrum, each connected to the
//! other through both switchboards, with Mainnet also holding a native
//! bridge path to Arbitrum.

use alloy::primitives::Address;
use socket_constants::ChainSlug;
use socket_deployments::{
    AddressBook, ChainAddresses, ChainConfig, ChainConfigs, CoreContract, IntegrationAddresses,
    IntegrationType, RoleOwners,
};

/// Owner of every test deployment.
pub const OWNER: Address = Address::repeat_byte(0x0f);

/// Holder of every operational role.
pub const OPERATOR: Address = Address::repeat_byte(0x0e);

/// Switchboard of the native bridge path.
pub const NATIVE_SWITCHBOARD: Address = Address::repeat_byte(0xbb);

/// Block the test deployments start at.
pub const START_BLOCK: u64 = 100;

const fn tag(slug: ChainSlug) -> u8 {
    (slug.as_u32() % 251) as u8
}

/// Deterministic address of `contract` on `slug`.
pub fn core_address(slug: ChainSlug, contract: CoreContract) -> Address {
    let index = CoreContract::ALL.iter().position(|c| *c == contract).unwrap_or_default();
    let mut address = Address::ZERO;
    address.0[0] = tag(slug);
    address.0[19] = index as u8 + 1;
    address
}

/// Deterministic addresses of the path from `slug` to `remote`.
pub fn integration_addresses(
    slug: ChainSlug,
    remote: ChainSlug,
    integration: IntegrationType,
) -> IntegrationAddresses {
    let switchboard =
        integration.switchboard().map_or(NATIVE_SWITCHBOARD, |c| core_address(slug, c));
    let kind = match integration {
        IntegrationType::Fast => 0x10,
        IntegrationType::Optimistic => 0x20,
        IntegrationType::NativeBridge => 0x30,
        IntegrationType::Fast2 => 0x40,
    };
    let mut capacitor = Address::repeat_byte(kind);
    capacitor.0[0] = tag(slug);
    capacitor.0[1] = tag(remote);
    let mut decapacitor = capacitor;
    decapacitor.0[19] = 0xdc;
    IntegrationAddresses { switchboard, capacitor, decapacitor }
}

/// The fully deployed core contracts of `slug`, without integrations.
pub fn deployed_chain(slug: ChainSlug) -> ChainAddresses {
    let mut chain = ChainAddresses::default();
    chain.start_block = Some(START_BLOCK);
    for contract in CoreContract::ALL {
        chain.set_core(contract, core_address(slug, contract));
    }
    chain
}

/// Mainnet and Arbitrum, connected both ways.
pub fn sample_book() -> AddressBook {
    let mut book = AddressBook::new();
    for (slug, remote) in
        [(ChainSlug::Mainnet, ChainSlug::Arbitrum), (ChainSlug::Arbitrum, ChainSlug::Mainnet)]
    {
        let mut chain = deployed_chain(slug);
        for integration in [IntegrationType::Fast, IntegrationType::Optimistic] {
            chain.set_integration(
                remote,
                integration,
                integration_addresses(slug, remote, integration),
            );
        }
        book.merge_chain(slug, chain);
    }

    let native = integration_addresses(
        ChainSlug::Mainnet,
        ChainSlug::Arbitrum,
        IntegrationType::NativeBridge,
    );
    book.merge_chain(
        ChainSlug::Mainnet,
        ChainAddresses::default().with_integration(
            ChainSlug::Arbitrum,
            IntegrationType::NativeBridge,
            native,
        ),
    );
    book
}

/// Role owners with [`OPERATOR`] holding every role.
pub const fn sample_role_owners() -> RoleOwners {
    RoleOwners {
        owner_address: OWNER,
        transmitter: Some(OPERATOR),
        executor: Some(OPERATOR),
        watcher: Some(OPERATOR),
        fees_updater: Some(OPERATOR),
    }
}

/// Config connecting to `siblings`, defaults elsewhere.
pub fn sample_config(siblings: &[ChainSlug]) -> ChainConfig {
    ChainConfig {
        role_owners: sample_role_owners(),
        siblings: siblings.to_vec(),
        timeout: None,
        msg_value_max_threshold: None,
        overrides: None,
    }
}

/// Configs for the chains of [`sample_book`].
pub fn sample_configs() -> ChainConfigs {
    let mut configs = ChainConfigs::default();
    configs.insert(ChainSlug::Mainnet, sample_config(&[ChainSlug::Arbitrum]));
    configs.insert(ChainSlug::Arbitrum, sample_config(&[ChainSlug::Mainnet]));
    configs
}
