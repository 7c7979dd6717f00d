use alloy::{
    primitives::TxHash,
    transports::{RpcError, TransportErrorKind},
};
use socket_constants::{ChainSlug, RegistryError};
use socket_deployments::{AddressBookError, CoreContract};
use socket_types::{GasError, PacketIdError, SigningError};
use std::path::PathBuf;

/// Errors returned by the deployer and the operational scripts.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScriptError {
    /// Address book or chain config error.
    #[error(transparent)]
    AddressBook(#[from] AddressBookError),
    /// Chain registry integrity error.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Gas resolution failed.
    #[error(transparent)]
    Gas(#[from] GasError),
    /// Signing an update failed.
    #[error(transparent)]
    Signing(#[from] SigningError),
    /// Packet id error.
    #[error(transparent)]
    PacketId(#[from] PacketIdError),
    /// A contract call failed.
    #[error("contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),
    /// The RPC transport failed.
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// No receipt appeared for a submitted transaction.
    #[error("no receipt for transaction {0}")]
    ReceiptTimeout(TxHash),
    /// A submitted transaction reverted.
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    /// A deployment receipt carried no contract address.
    #[error("deployment of {0} returned no contract address")]
    NoContractAddress(CoreContract),
    /// An artifact is missing or malformed.
    #[error("bad artifact {path}: {reason}")]
    Artifact {
        /// The artifact file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
    /// A path has no native bridge integration.
    #[error("no native bridge integration from {src} to {dst}")]
    NotNativeBridge {
        /// Source chain.
        src: ChainSlug,
        /// Remote chain.
        dst: ChainSlug,
    },
    /// A packet was sealed on a different chain than the one acting on it.
    #[error("packet was sealed on {packet_chain}, not on {local}")]
    PacketFromOtherChain {
        /// Chain encoded in the packet id.
        packet_chain: ChainSlug,
        /// Chain the script runs against.
        local: ChainSlug,
    },
    /// The contract factory failed.
    #[error("deployment failed: {0}")]
    Factory(#[source] Box<dyn core::error::Error + Send + Sync>),
}
