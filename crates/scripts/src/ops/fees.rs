use crate::{ChainContext, ScriptError};
use alloy::{primitives::U256, providers::Provider, signers::Signer};
use socket_bindings::GasPriceOracle;
use socket_constants::ChainSlug;
use socket_deployments::{AddressBook, CoreContract};
use socket_types::{SignedUpdate, UnsignedUpdate, UpdateKind};
use tracing::{info, instrument};

/// Set the gas price of `dst`, relative to this chain's native token, on the
/// gas price oracle.
#[instrument(skip_all, fields(chain = %context.slug(), dst = %dst, price = %relative_gas_price))]
pub async fn set_gas_price<P, S>(
    context: &ChainContext<P, S>,
    book: &AddressBook,
    dst: ChainSlug,
    relative_gas_price: U256,
) -> Result<SignedUpdate, ScriptError>
where
    P: Provider,
    S: Signer + Send + Sync,
{
    let src = context.slug();
    let oracle =
        GasPriceOracle::new(book.core(src, CoreContract::GasPriceOracle)?, context.provider());

    let nonce = oracle.nextNonce(context.signer().address()).call().await?;
    let update = UnsignedUpdate::new(UpdateKind::Fees, src, dst, nonce, relative_gas_price)
        .sign(context.signer())
        .await?;

    let tx = oracle
        .setRelativeGasPrice(dst.as_u32(), relative_gas_price, nonce, update.signature_bytes())
        .into_transaction_request();
    context.send(tx).await?;
    info!("relative gas price set");
    Ok(update)
}
