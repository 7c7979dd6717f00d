use crate::ScriptError;
use alloy::{
    primitives::{Address, B256},
    providers::Provider,
};
use futures_util::future::join_all;
use socket_bindings::Capacitor;
use socket_constants::ChainSlug;
use socket_deployments::{AddressBook, IntegrationType};
use socket_types::PacketId;
use std::{collections::HashMap, fmt::Write};
use tracing::{instrument, warn};

/// One outbound path of the address book.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PacketPath {
    /// Chain the capacitor lives on.
    pub chain: ChainSlug,
    /// Remote chain of the path.
    pub remote: ChainSlug,
    /// Integration serving the path.
    pub integration: IntegrationType,
    /// The outbound capacitor.
    pub capacitor: Address,
}

/// The packet a capacitor will seal next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PendingPacket {
    /// Current root of the packet.
    pub root: B256,
    /// Packet counter of the capacitor.
    pub packet_count: u64,
    /// Identifier the packet will be sealed under.
    pub packet_id: PacketId,
}

/// Every outbound path of every chain in the book.
pub fn packet_paths(book: &AddressBook) -> Vec<PacketPath> {
    book.chains()
        .flat_map(|(chain, addresses)| {
            addresses.integrations().map(move |(remote, integration, a)| PacketPath {
                chain,
                remote,
                integration,
                capacitor: a.capacitor,
            })
        })
        .collect()
}

async fn poll<P: Provider>(path: PacketPath, provider: &P) -> Result<PendingPacket, ScriptError> {
    let next = Capacitor::new(path.capacitor, provider).getNextPacketToBeSealed().call().await?;
    Ok(PendingPacket {
        root: next.root,
        packet_count: next.packetCount,
        packet_id: PacketId::new(path.chain, path.capacitor, next.packetCount),
    })
}

/// Query the next packet to be sealed on every path of the book,
/// concurrently. Paths on chains without a provider are skipped.
///
/// Results are returned in path order once every query has completed.
/// A failed query does not affect the others.
#[instrument(skip_all)]
pub async fn next_packets<P: Provider>(
    book: &AddressBook,
    providers: &HashMap<ChainSlug, P>,
) -> Vec<(PacketPath, Result<PendingPacket, ScriptError>)> {
    let mut paths = packet_paths(book);
    paths.retain(|path| {
        let known = providers.contains_key(&path.chain);
        if !known {
            warn!(chain = %path.chain, "no provider, skipping");
        }
        known
    });

    let queries = paths.iter().filter_map(|path| {
        providers.get(&path.chain).map(|provider| poll(*path, provider))
    });
    let results = join_all(queries).await;
    paths.into_iter().zip(results).collect()
}

/// Render poll results as a fixed-width table.
pub fn render_packets(results: &[(PacketPath, Result<PendingPacket, ScriptError>)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<24} {:<14} {:<8} packet id",
        "chain", "remote", "integration", "count"
    );
    for (path, result) in results {
        let _ = match result {
            Ok(packet) => writeln!(
                out,
                "{:<24} {:<24} {:<14} {:<8} {}",
                path.chain.network_key(),
                path.remote.network_key(),
                path.integration,
                packet.packet_count,
                packet.packet_id
            ),
            Err(e) => writeln!(
                out,
                "{:<24} {:<24} {:<14} {:<8} error: {e}",
                path.chain.network_key(),
                path.remote.network_key(),
                path.integration,
                "-"
            ),
        };
    }
    out
}
