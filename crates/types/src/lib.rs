//! Socket protocol value types.
//!
//! Packet identifiers and transmission parameters are shared bit-for-bit
//! with the on-chain contracts. The crate also resolves per-chain gas
//! parameters against a live provider, evaluates finality thresholds, and
//! produces the signed digests that authorize privileged parameter updates.

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

pub mod config;
pub use config::ConfigError;

mod finality;
pub use finality::FinalityCheck;

mod gas;
pub use gas::{scale_gas_price, GasError, GasOverrides};

mod packet;
pub use packet::{PacketId, PacketIdError, PacketIdParts};

mod param;
pub use param::{
    ParamError, TransmissionFinality, TransmissionParam, FINALITY_TYPE_BLOCKS,
    FINALITY_TYPE_BUCKET, FINALITY_TYPE_SECONDS, TRANSMISSION_PARAM_VERSION,
};

mod signing;
pub use signing::{SignedUpdate, SigningError, UnsignedUpdate, UpdateKind};
