use alloy::{
    primitives::{Address, Bytes, B256},
    sol_types::SolValue,
};
use socket_bindings::Role;
use socket_constants::ChainSlug;
use socket_deployments::{CoreContract, IntegrationType};
use socket_scripts::{ops, ChainContext};
use socket_test_utils::{
    book::{core_address, integration_addresses, sample_book, sample_config, OPERATOR},
    provider::{mocked_provider, TEST_GAS},
    users::make_signer,
};
use socket_types::PacketId;
use std::collections::HashMap;

fn word(held: bool) -> B256 {
    if held {
        B256::with_last_byte(1)
    } else {
        B256::ZERO
    }
}

#[tokio::test]
async fn pending_grants_lists_only_missing_roles() {
    let (provider, asserter) = mocked_provider();
    let context = ChainContext::new(ChainSlug::Mainnet, provider, make_signer(1), TEST_GAS);
    let config = sample_config(&[ChainSlug::Arbitrum]);

    // Gas price oracle transmitter missing, everything else held.
    asserter.push_success(&word(false));
    for _ in 0..9 {
        asserter.push_success(&word(true));
    }

    let pending = ops::pending_grants(&context, &config, &sample_book()).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].contract, CoreContract::GasPriceOracle);
    assert_eq!(pending[0].address, core_address(ChainSlug::Mainnet, CoreContract::GasPriceOracle));
    assert_eq!(pending[0].role, Role::Transmitter);
    assert_eq!(pending[0].grantee, OPERATOR);
}

#[tokio::test]
async fn pending_grants_checks_every_configured_role() {
    let (provider, asserter) = mocked_provider();
    let context = ChainContext::new(ChainSlug::Mainnet, provider, make_signer(1), TEST_GAS);
    let config = sample_config(&[]);

    for _ in 0..10 {
        asserter.push_success(&word(false));
    }

    let pending = ops::pending_grants(&context, &config, &sample_book()).await.unwrap();
    assert_eq!(pending.len(), 10);
    assert!(pending.iter().all(|g| ops::roles_of(g.contract).contains(&g.role)));
    assert!(pending.iter().all(|g| g.contract != CoreContract::Socket));
}

#[tokio::test]
async fn pending_grants_propagates_rpc_failure() {
    let (provider, asserter) = mocked_provider();
    let context = ChainContext::new(ChainSlug::Mainnet, provider, make_signer(1), TEST_GAS);
    asserter.push_failure_msg("node down");

    let result = ops::pending_grants(&context, &sample_config(&[]), &sample_book()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn capacitor_mismatch_detected() {
    let (provider, asserter) = mocked_provider();
    let context = ChainContext::new(ChainSlug::Mainnet, provider, make_signer(1), TEST_GAS);
    let stale = Address::repeat_byte(0x99);
    asserter.push_success(&stale.into_word());

    let mismatches = ops::capacitor_mismatches(&context, &sample_book()).await.unwrap();
    let expected = integration_addresses(
        ChainSlug::Mainnet,
        ChainSlug::Arbitrum,
        IntegrationType::NativeBridge,
    );
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].remote, ChainSlug::Arbitrum);
    assert_eq!(mismatches[0].switchboard, expected.switchboard);
    assert_eq!(mismatches[0].on_chain, stale);
    assert_eq!(mismatches[0].expected, expected.capacitor);
}

#[tokio::test]
async fn capacitor_in_sync_is_not_reported() {
    let (provider, asserter) = mocked_provider();
    let context = ChainContext::new(ChainSlug::Mainnet, provider, make_signer(1), TEST_GAS);
    let current = integration_addresses(
        ChainSlug::Mainnet,
        ChainSlug::Arbitrum,
        IntegrationType::NativeBridge,
    )
    .capacitor;
    asserter.push_success(&current.into_word());

    assert!(ops::capacitor_mismatches(&context, &sample_book()).await.unwrap().is_empty());
}

#[tokio::test]
async fn chain_without_native_paths_makes_no_calls() {
    // No responses queued: any call would fail.
    let (provider, _asserter) = mocked_provider();
    let context = ChainContext::new(ChainSlug::Arbitrum, provider, make_signer(1), TEST_GAS);

    assert!(ops::capacitor_mismatches(&context, &sample_book()).await.unwrap().is_empty());
}

#[test]
fn packet_paths_cover_every_integration() {
    let paths = ops::packet_paths(&sample_book());
    // Mainnet: fast, optimistic, native. Arbitrum: fast, optimistic.
    assert_eq!(paths.len(), 5);
    assert_eq!(paths.iter().filter(|p| p.chain == ChainSlug::Mainnet).count(), 3);
    for path in &paths {
        let expected = integration_addresses(path.chain, path.remote, path.integration);
        assert_eq!(path.capacitor, expected.capacitor);
    }
}

#[tokio::test]
async fn next_packets_skips_chains_without_provider() {
    let (provider, asserter) = mocked_provider();
    let root = B256::repeat_byte(0xab);
    let response = Bytes::from((root, 7u64).abi_encode_params());
    for _ in 0..3 {
        asserter.push_success(&response);
    }

    let providers = HashMap::from([(ChainSlug::Mainnet, provider)]);
    let results = ops::next_packets(&sample_book(), &providers).await;

    assert_eq!(results.len(), 3);
    for (path, result) in &results {
        assert_eq!(path.chain, ChainSlug::Mainnet);
        let packet = result.as_ref().unwrap();
        assert_eq!(packet.root, root);
        assert_eq!(packet.packet_count, 7);
        assert_eq!(packet.packet_id, PacketId::new(ChainSlug::Mainnet, path.capacitor, 7));
    }
}

#[tokio::test]
async fn next_packets_reports_failures_per_path() {
    let (provider, asserter) = mocked_provider();
    for _ in 0..3 {
        asserter.push_failure_msg("execution reverted");
    }

    let providers = HashMap::from([(ChainSlug::Mainnet, provider)]);
    let results = ops::next_packets(&sample_book(), &providers).await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|(_, r)| r.is_err()));

    let table = ops::render_packets(&results);
    assert_eq!(table.lines().count(), 4);
    assert!(table.lines().skip(1).all(|line| line.contains("error:")));
}
