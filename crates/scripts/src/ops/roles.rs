use crate::{ChainContext, ScriptError};
use alloy::{primitives::Address, providers::Provider};
use socket_bindings::{AccessControl, Role};
use socket_deployments::{AddressBook, ChainConfig, CoreContract};
use tracing::{info, instrument};

/// A role grant that is configured but not yet held on-chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PendingGrant {
    /// The contract to grant on.
    pub contract: CoreContract,
    /// Its address.
    pub address: Address,
    /// The role.
    pub role: Role,
    /// The intended holder.
    pub grantee: Address,
}

/// Roles each core contract carries.
pub const fn roles_of(contract: CoreContract) -> &'static [Role] {
    match contract {
        CoreContract::TransmitManager => &[Role::Transmitter, Role::FeesUpdater],
        CoreContract::ExecutionManager => &[Role::Executor, Role::FeesUpdater],
        CoreContract::GasPriceOracle => &[Role::Transmitter, Role::FeesUpdater],
        CoreContract::FastSwitchboard => &[Role::Watcher, Role::FeesUpdater],
        CoreContract::OptimisticSwitchboard => &[Role::Watcher, Role::FeesUpdater],
        _ => &[],
    }
}

/// Every configured grant on the chain's core contracts that `hasRole`
/// reports as missing.
#[instrument(skip_all, fields(chain = %context.slug()))]
pub async fn pending_grants<P: Provider, S>(
    context: &ChainContext<P, S>,
    config: &ChainConfig,
    book: &AddressBook,
) -> Result<Vec<PendingGrant>, ScriptError> {
    let slug = context.slug();
    let mut pending = Vec::new();

    for (contract, address) in book.chain(slug).into_iter().flat_map(|c| c.cores()) {
        let roles = roles_of(contract);
        let instance = AccessControl::new(address, context.provider());
        for (role, grantee) in config.role_owners.grants().filter(|(r, _)| roles.contains(r)) {
            if !instance.hasRole(role.id(), grantee).call().await? {
                pending.push(PendingGrant { contract, address, role, grantee });
            }
        }
    }

    Ok(pending)
}

/// Grant every configured role that is not yet held. Returns the grants
/// that were sent.
#[instrument(skip_all, fields(chain = %context.slug()))]
pub async fn grant_roles<P: Provider, S>(
    context: &ChainContext<P, S>,
    config: &ChainConfig,
    book: &AddressBook,
) -> Result<Vec<PendingGrant>, ScriptError> {
    let pending = pending_grants(context, config, book).await?;

    for grant in &pending {
        let tx = AccessControl::new(grant.address, context.provider())
            .grantRole(grant.role.id(), grant.grantee)
            .into_transaction_request();
        context.send(tx).await?;
        info!(contract = %grant.contract, role = %grant.role, grantee = %grant.grantee, "granted");
    }

    Ok(pending)
}
