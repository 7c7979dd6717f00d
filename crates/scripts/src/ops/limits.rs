use crate::{ChainContext, ScriptError};
use alloy::{primitives::U256, providers::Provider, signers::Signer};
use socket_bindings::{Switchboard, TransmitManager};
use socket_constants::ChainSlug;
use socket_deployments::{AddressBook, CoreContract, IntegrationType};
use socket_types::{SignedUpdate, UnsignedUpdate, UpdateKind};
use tracing::{info, instrument};

async fn sign_update<S: Signer + Send + Sync>(
    signer: &S,
    kind: UpdateKind,
    src: ChainSlug,
    dst: ChainSlug,
    nonce: U256,
    value: U256,
) -> Result<SignedUpdate, ScriptError> {
    UnsignedUpdate::new(kind, src, dst, nonce, value).sign(signer).await.map_err(Into::into)
}

/// Set the attest gas limit for `dst` on the switchboard serving
/// `integration`.
#[instrument(
    skip_all,
    fields(chain = %context.slug(), dst = %dst, integration = %integration, limit = %limit)
)]
pub async fn set_attest_gas_limit<P, S>(
    context: &ChainContext<P, S>,
    book: &AddressBook,
    dst: ChainSlug,
    integration: IntegrationType,
    limit: U256,
) -> Result<SignedUpdate, ScriptError>
where
    P: Provider,
    S: Signer + Send + Sync,
{
    let src = context.slug();
    let switchboard = book.integration(src, dst, integration)?.switchboard;
    let instance = Switchboard::new(switchboard, context.provider());

    let nonce = instance.nextNonce(context.signer().address()).call().await?;
    let update =
        sign_update(context.signer(), UpdateKind::AttestGasLimit, src, dst, nonce, limit).await?;

    let tx = instance
        .setAttestGasLimit(nonce, dst.as_u32(), limit, update.signature_bytes())
        .into_transaction_request();
    context.send(tx).await?;
    info!("attest gas limit set");
    Ok(update)
}

/// Set the execution overhead for `dst` on the switchboard serving
/// `integration`.
#[instrument(
    skip_all,
    fields(chain = %context.slug(), dst = %dst, integration = %integration, overhead = %overhead)
)]
pub async fn set_execution_overhead<P, S>(
    context: &ChainContext<P, S>,
    book: &AddressBook,
    dst: ChainSlug,
    integration: IntegrationType,
    overhead: U256,
) -> Result<SignedUpdate, ScriptError>
where
    P: Provider,
    S: Signer + Send + Sync,
{
    let src = context.slug();
    let switchboard = book.integration(src, dst, integration)?.switchboard;
    let instance = Switchboard::new(switchboard, context.provider());

    let nonce = instance.nextNonce(context.signer().address()).call().await?;
    let update =
        sign_update(context.signer(), UpdateKind::ExecutionOverhead, src, dst, nonce, overhead)
            .await?;

    let tx = instance
        .setExecutionOverhead(nonce, dst.as_u32(), overhead, update.signature_bytes())
        .into_transaction_request();
    context.send(tx).await?;
    info!("execution overhead set");
    Ok(update)
}

/// Set the propose gas limit for `dst` on the transmit manager.
#[instrument(skip_all, fields(chain = %context.slug(), dst = %dst, limit = %limit))]
pub async fn set_propose_gas_limit<P, S>(
    context: &ChainContext<P, S>,
    book: &AddressBook,
    dst: ChainSlug,
    limit: U256,
) -> Result<SignedUpdate, ScriptError>
where
    P: Provider,
    S: Signer + Send + Sync,
{
    let src = context.slug();
    let manager = book.core(src, CoreContract::TransmitManager)?;
    let instance = TransmitManager::new(manager, context.provider());

    let nonce = instance.nextNonce(context.signer().address()).call().await?;
    let update =
        sign_update(context.signer(), UpdateKind::ProposeGasLimit, src, dst, nonce, limit).await?;

    let tx = instance
        .setProposeGasLimit(nonce, dst.as_u32(), limit, update.signature_bytes())
        .into_transaction_request();
    context.send(tx).await?;
    info!("propose gas limit set");
    Ok(update)
}

/// Trip or untrip the inbound path from `src` on the switchboard serving
/// `integration`.
#[instrument(
    skip_all,
    fields(chain = %context.slug(), src = %src, integration = %integration, tripped = tripped)
)]
pub async fn set_path_tripped<P, S>(
    context: &ChainContext<P, S>,
    book: &AddressBook,
    src: ChainSlug,
    integration: IntegrationType,
    tripped: bool,
) -> Result<SignedUpdate, ScriptError>
where
    P: Provider,
    S: Signer + Send + Sync,
{
    let local = context.slug();
    let switchboard = book.integration(local, src, integration)?.switchboard;
    let instance = Switchboard::new(switchboard, context.provider());

    let nonce = instance.nextNonce(context.signer().address()).call().await?;
    let update = UnsignedUpdate::trip(src, local, nonce, tripped).sign(context.signer()).await?;

    let call = if tripped {
        instance.tripPath(nonce, src.as_u32(), update.signature_bytes()).into_transaction_request()
    } else {
        instance
            .unTripPath(nonce, src.as_u32(), update.signature_bytes())
            .into_transaction_request()
    };
    context.send(call).await?;
    info!("path trip status updated");
    Ok(update)
}
