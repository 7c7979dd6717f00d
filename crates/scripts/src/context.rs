use crate::ScriptError;
use alloy::{
    network::ReceiptResponse,
    primitives::TxHash,
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use socket_constants::{ChainRegistry, ChainSlug};
use socket_deployments::ChainConfigs;
use socket_types::GasOverrides;
use std::time::Duration;
use tracing::{debug, instrument};

/// Delay between receipt polls.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Polls before a transaction is reported as unconfirmed.
const RECEIPT_POLL_ATTEMPTS: usize = 150;

/// Everything a script needs to act on one chain: its slug, a provider that
/// can sign and send transactions, the key that signs privileged updates,
/// and the resolved gas parameters.
#[derive(Debug, Clone)]
pub struct ChainContext<P, S> {
    slug: ChainSlug,
    provider: P,
    signer: S,
    gas: GasOverrides,
}

impl<P, S> ChainContext<P, S> {
    /// Create a new context with already resolved gas parameters.
    pub const fn new(slug: ChainSlug, provider: P, signer: S, gas: GasOverrides) -> Self {
        Self { slug, provider, signer, gas }
    }

    /// Get the chain slug.
    pub const fn slug(&self) -> ChainSlug {
        self.slug
    }

    /// Get a reference to the provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Get a reference to the signer.
    pub const fn signer(&self) -> &S {
        &self.signer
    }

    /// Get the gas parameters.
    pub const fn gas(&self) -> GasOverrides {
        self.gas
    }
}

impl<P: Provider, S> ChainContext<P, S> {
    /// Create a new context, resolving gas parameters from the chain config
    /// overrides, the built-in table and the provider.
    pub async fn resolve(
        slug: ChainSlug,
        provider: P,
        signer: S,
        configs: &ChainConfigs,
    ) -> Result<Self, ScriptError> {
        ChainRegistry::validate()?;
        let gas = GasOverrides::resolve(slug, configs.gas_overrides(slug), &provider).await?;
        Ok(Self::new(slug, provider, signer, gas))
    }

    /// Apply the gas parameters to `tx`, send it, and wait for a successful
    /// receipt.
    #[instrument(skip_all, fields(chain = %self.slug))]
    pub async fn send(&self, tx: TransactionRequest) -> Result<TransactionReceipt, ScriptError> {
        let tx = self.gas.apply(tx);
        let tx_hash = *self.provider.send_transaction(tx).await?.tx_hash();
        debug!(%tx_hash, "sent");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        debug!(%tx_hash, block = ?receipt.block_number, "confirmed");
        if !receipt.status() {
            return Err(ScriptError::Reverted(tx_hash));
        }
        Ok(receipt)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, ScriptError> {
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            if let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
        Err(ScriptError::ReceiptTimeout(tx_hash))
    }
}
