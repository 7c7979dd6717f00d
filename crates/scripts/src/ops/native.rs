use crate::{ChainContext, ScriptError};
use alloy::{primitives::TxHash, providers::Provider};
use socket_bindings::Switchboard;
use socket_constants::ChainSlug;
use socket_deployments::{AddressBook, IntegrationType};
use socket_types::PacketId;
use tracing::{info, instrument};

/// Ask the native bridge switchboard for the path to `dst` to relay the
/// root of `packet_id` through the canonical bridge.
///
/// The packet must have been sealed on this chain.
#[instrument(skip_all, fields(chain = %context.slug(), dst = %dst, packet_id = %packet_id))]
pub async fn relay_native<P: Provider, S>(
    context: &ChainContext<P, S>,
    book: &AddressBook,
    dst: ChainSlug,
    packet_id: PacketId,
) -> Result<TxHash, ScriptError> {
    let src = context.slug();
    let parts = packet_id.decode()?;
    if parts.chain_slug != src {
        let packet_chain = parts.chain_slug;
        return Err(ScriptError::PacketFromOtherChain { packet_chain, local: src });
    }

    let switchboard = book
        .integration(src, dst, IntegrationType::NativeBridge)
        .map_err(|_| ScriptError::NotNativeBridge { src, dst })?
        .switchboard;

    let tx = Switchboard::new(switchboard, context.provider())
        .initiateNativeConfirmation(packet_id.to_b256())
        .into_transaction_request();
    let receipt = context.send(tx).await?;
    info!(tx_hash = %receipt.transaction_hash, "native confirmation initiated");
    Ok(receipt.transaction_hash)
}
