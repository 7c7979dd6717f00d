use alloy::{
    eips::eip2930::AccessList,
    network::TransactionBuilder,
    providers::Provider,
    rpc::types::TransactionRequest,
    transports::{RpcError, TransportErrorKind},
};
use socket_constants::{ChainRegistry, ChainSlug, GasOverridePolicy, RegistryError, TxType};
use tracing::{debug, instrument};

/// Errors produced while resolving gas parameters.
#[derive(Debug, thiserror::Error)]
pub enum GasError {
    /// The provider could not report a gas price.
    #[error("gas price unavailable: {0}")]
    GasPriceUnavailable(#[source] RpcError<TransportErrorKind>),
    /// The chain registry failed its integrity check.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Scale a price by a multiplier expressed in thousandths.
pub const fn scale_gas_price(price: u128, multiplier_thousandths: u128) -> u128 {
    price.saturating_mul(multiplier_thousandths) / 1000
}

/// Concrete gas parameters for a transaction.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GasOverrides {
    /// Fixed gas limit. `None` leaves estimation to the provider.
    pub gas_limit: Option<u64>,
    /// Gas price in wei.
    pub gas_price: u128,
    /// Transaction type.
    pub tx_type: TxType,
}

impl GasOverrides {
    /// Resolve the gas parameters for a chain.
    ///
    /// An override from the chain config file replaces the built-in entry
    /// for the chain as a whole.
    #[instrument(skip(provider, config_override), fields(chain = %slug))]
    pub async fn resolve<P: Provider>(
        slug: ChainSlug,
        config_override: Option<GasOverridePolicy>,
        provider: &P,
    ) -> Result<Self, GasError> {
        let policy = match config_override {
            Some(policy) => policy,
            None => ChainRegistry::global()?.gas_overrides(slug),
        };
        Self::from_policy(policy, provider).await
    }

    /// Resolve the gas parameters described by `policy`.
    ///
    /// A fixed price is used as-is and the provider is not queried.
    /// Otherwise the live price is scaled by the policy's multiplier.
    pub async fn from_policy<P: Provider>(
        policy: GasOverridePolicy,
        provider: &P,
    ) -> Result<Self, GasError> {
        let gas_price = match policy.gas_price {
            Some(price) => price,
            None => {
                let live = provider.get_gas_price().await.map_err(GasError::GasPriceUnavailable)?;
                let scaled = scale_gas_price(live, policy.multiplier_thousandths());
                debug!(live, scaled, "scaled live gas price");
                scaled
            }
        };

        Ok(Self { gas_limit: policy.gas_limit, gas_price, tx_type: policy.tx_type })
    }

    /// Apply these parameters to a transaction request.
    pub fn apply(&self, tx: TransactionRequest) -> TransactionRequest {
        let mut tx = match self.gas_limit {
            Some(limit) => tx.with_gas_limit(limit),
            None => tx,
        };

        match self.tx_type {
            TxType::Legacy => {
                tx.set_gas_price(self.gas_price);
            }
            TxType::AccessList => {
                tx.set_gas_price(self.gas_price);
                if tx.access_list.is_none() {
                    tx.set_access_list(AccessList::default());
                }
            }
            TxType::Eip1559 => {
                tx.set_max_fee_per_gas(self.gas_price);
                tx.set_max_priority_fee_per_gas(self.gas_price);
            }
        }
        tx.transaction_type = Some(self.tx_type.into());
        tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        primitives::U256,
        providers::ProviderBuilder,
        transports::mock::Asserter,
    };

    fn mocked() -> (impl Provider, Asserter) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        (provider, asserter)
    }

    #[test]
    fn scaling_uses_thousandths() {
        assert_eq!(scale_gas_price(100, 1050), 105);
        assert_eq!(scale_gas_price(1_000_000_000, 1200), 1_200_000_000);
        assert_eq!(scale_gas_price(7, 1050), 7);
    }

    #[tokio::test]
    async fn fixed_price_skips_provider() {
        // no response queued: any provider call would fail
        let (provider, _asserter) = mocked();
        let overrides = GasOverrides::resolve(ChainSlug::Aevo, None, &provider).await.unwrap();
        assert_eq!(overrides.gas_price, 100_000_000);
        assert_eq!(overrides.tx_type, TxType::Legacy);
    }

    #[tokio::test]
    async fn live_price_is_scaled() {
        let (provider, asserter) = mocked();
        asserter.push_success(&U256::from(1_000_000_000u64));
        let overrides = GasOverrides::resolve(ChainSlug::Base, None, &provider).await.unwrap();
        assert_eq!(overrides.gas_price, 1_050_000_000);
        assert_eq!(overrides.gas_limit, None);

        asserter.push_success(&U256::from(1_000_000_000u64));
        let overrides = GasOverrides::resolve(ChainSlug::Mainnet, None, &provider).await.unwrap();
        assert_eq!(overrides.gas_price, 1_200_000_000);
        assert_eq!(overrides.gas_limit, Some(6_000_000));
    }

    #[tokio::test]
    async fn config_override_wins() {
        let (provider, _asserter) = mocked();
        let config = GasOverridePolicy::new().with_gas_price(42).with_tx_type(TxType::Eip1559);
        let overrides =
            GasOverrides::resolve(ChainSlug::Mainnet, Some(config), &provider).await.unwrap();
        assert_eq!(overrides, GasOverrides { gas_limit: None, gas_price: 42, tx_type: TxType::Eip1559 });
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let (provider, asserter) = mocked();
        asserter.push_failure_msg("boom");
        let err = GasOverrides::resolve(ChainSlug::Base, None, &provider).await.unwrap_err();
        assert!(matches!(err, GasError::GasPriceUnavailable(_)));
    }

    #[test]
    fn apply_sets_type_fields() {
        let legacy = GasOverrides { gas_limit: Some(21_000), gas_price: 5, tx_type: TxType::Legacy }
            .apply(TransactionRequest::default());
        assert_eq!(legacy.gas, Some(21_000));
        assert_eq!(legacy.gas_price, Some(5));
        assert_eq!(legacy.transaction_type, Some(0));

        let access = GasOverrides { gas_limit: None, gas_price: 5, tx_type: TxType::AccessList }
            .apply(TransactionRequest::default());
        assert!(access.access_list.is_some());
        assert_eq!(access.transaction_type, Some(1));

        let dynamic = GasOverrides { gas_limit: None, gas_price: 9, tx_type: TxType::Eip1559 }
            .apply(TransactionRequest::default());
        assert_eq!(dynamic.max_fee_per_gas, Some(9));
        assert_eq!(dynamic.gas_price, None);
    }
}
