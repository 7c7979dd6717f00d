use alloy::{
    primitives::{Address, TxHash},
    providers::{Provider, ProviderBuilder},
    transports::mock::Asserter,
};
use serde_json::{json, Value};
use socket_constants::TxType;
use socket_types::GasOverrides;

/// Legacy gas at 1 gwei with no fixed limit.
pub const TEST_GAS: GasOverrides =
    GasOverrides { gas_limit: None, gas_price: 1_000_000_000, tx_type: TxType::Legacy };

/// A provider answering every request from the returned [`Asserter`], in
/// the order responses were pushed.
pub fn mocked_provider() -> (impl Provider + Clone, Asserter) {
    let asserter = Asserter::new();
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter.clone());
    (provider, asserter)
}

/// A mined legacy receipt for `tx_hash`.
pub fn receipt(tx_hash: TxHash, success: bool) -> Value {
    json!({
        "type": "0x0",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": TxHash::repeat_byte(0xbb),
        "blockNumber": "0x64",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "from": Address::repeat_byte(0x01),
        "to": Address::repeat_byte(0x02),
        "contractAddress": null,
    })
}

/// Queue the answers to one sent transaction: its hash, then its receipt.
pub fn push_sent(asserter: &Asserter, tx_hash: TxHash, success: bool) {
    asserter.push_success(&tx_hash);
    asserter.push_success(&receipt(tx_hash, success));
}
