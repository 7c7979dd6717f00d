//! Socket deployment and operations tooling.
//!
//! [`Deployer`] brings up the core contracts of a chain and [`connect`]
//! registers its switchboards with every sibling. The [`ops`] module holds
//! the scripts run against a live deployment. All of them act through a
//! [`ChainContext`] and resolve their targets from the address book.

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

mod context;
pub use context::ChainContext;

mod deploy;
pub use deploy::{connect, load_artifact, ArtifactFactory, ContractFactory, Deployed, Deployer};

mod error;
pub use error::ScriptError;

pub mod ops;
