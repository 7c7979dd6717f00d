//! Socket chain constants.
//!
//! This crate contains the static chain registry used by every Socket
//! deployment and operations tool: chain slugs and their native chain ids,
//! rollup-family classification, and the per-chain finality, gas and re-sync
//! policy tables that are resolved against it.

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

#[macro_use]
mod macros;

mod chains;
pub use chains::{ChainInfo, ChainSlug, Layer, ParseChainError, UnknownChainSlug};

mod families;
pub use families::{ChainFamily, FAMILY_LISTS, ZERO_FINALITY_CHAINS};

mod policy;
pub use policy::{
    FinalityBucket, FinalityKind, FinalityPolicy, GasOverridePolicy, TxType,
    DEFAULT_GAS_PRICE_MULTIPLIER, GLOBAL_FINALITY, ZERO_FINALITY,
};

mod registry;
pub use registry::{ChainRegistry, RegistryError};
