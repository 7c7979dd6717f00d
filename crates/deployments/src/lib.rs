//! Socket deployment files.
//!
//! The address book records every contract deployed on every chain and is
//! the single source of truth shared by the deployer and the operational
//! scripts. The chain config file supplies per-chain deployment parameters:
//! role holders, siblings, switchboard timeout and gas overrides.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod address_book;
pub use address_book::{
    AddressBook, ChainAddresses, CoreContract, IntegrationAddresses, IntegrationType,
};

mod chain_config;
pub use chain_config::{ChainConfig, ChainConfigs, RoleOwners, DEFAULT_TIMEOUT_SECONDS};

mod error;
pub use error::{AddressBookError, Result};
