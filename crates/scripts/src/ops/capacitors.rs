use crate::{ChainContext, ScriptError};
use alloy::{primitives::Address, providers::Provider};
use socket_bindings::Switchboard;
use socket_constants::ChainSlug;
use socket_deployments::{AddressBook, IntegrationType};
use tracing::{info, instrument};

/// A native switchboard whose capacitor differs from the address book.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CapacitorMismatch {
    /// Remote chain of the path.
    pub remote: ChainSlug,
    /// The switchboard.
    pub switchboard: Address,
    /// Capacitor currently set on the switchboard.
    pub on_chain: Address,
    /// Capacitor recorded in the book.
    pub expected: Address,
}

/// Compare the capacitor set on each native bridge switchboard of the chain
/// with the one recorded in the book.
///
/// Fast and optimistic switchboards are shared between paths and carry no
/// single capacitor, so only native bridge paths are checked.
#[instrument(skip_all, fields(chain = %context.slug()))]
pub async fn capacitor_mismatches<P: Provider, S>(
    context: &ChainContext<P, S>,
    book: &AddressBook,
) -> Result<Vec<CapacitorMismatch>, ScriptError> {
    let mut mismatches = Vec::new();
    let Some(chain) = book.chain(context.slug()) else { return Ok(mismatches) };

    for (remote, integration, addresses) in chain.integrations() {
        if integration != IntegrationType::NativeBridge {
            continue;
        }
        let on_chain =
            Switchboard::new(addresses.switchboard, context.provider()).capacitor__().call().await?;
        if on_chain != addresses.capacitor {
            mismatches.push(CapacitorMismatch {
                remote,
                switchboard: addresses.switchboard,
                on_chain,
                expected: addresses.capacitor,
            });
        }
    }

    Ok(mismatches)
}

/// Point every mismatched native bridge switchboard at the capacitor
/// recorded in the book. Returns the corrected mismatches.
#[instrument(skip_all, fields(chain = %context.slug()))]
pub async fn sync_capacitors<P: Provider, S>(
    context: &ChainContext<P, S>,
    book: &AddressBook,
) -> Result<Vec<CapacitorMismatch>, ScriptError> {
    let mismatches = capacitor_mismatches(context, book).await?;

    for mismatch in &mismatches {
        let tx = Switchboard::new(mismatch.switchboard, context.provider())
            .setCapacitor(mismatch.expected)
            .into_transaction_request();
        context.send(tx).await?;
        info!(
            remote = %mismatch.remote,
            switchboard = %mismatch.switchboard,
            capacitor = %mismatch.expected,
            "capacitor updated"
        );
    }

    Ok(mismatches)
}
