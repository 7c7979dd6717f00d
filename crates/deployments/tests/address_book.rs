use alloy::primitives::Address;
use socket_constants::ChainSlug;
use socket_deployments::{
    AddressBook, AddressBookError, ChainAddresses, CoreContract, IntegrationAddresses,
    IntegrationType,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("socket-deployments-{}-{name}", std::process::id()))
        .join("addresses.json")
}

#[test]
fn missing_file_is_empty_book() {
    let book = AddressBook::load(temp_path("missing")).unwrap();
    assert_eq!(book, AddressBook::new());
}

#[test]
fn load_merge_save_round_trip() {
    let path = temp_path("round-trip");
    let _ = std::fs::remove_file(&path);

    let mut book = AddressBook::load(&path).unwrap();
    book.merge_chain(
        ChainSlug::ArbitrumSepolia,
        ChainAddresses::default()
            .with_core(CoreContract::Socket, Address::repeat_byte(1))
            .with_integration(
                ChainSlug::OptimismSepolia,
                IntegrationType::NativeBridge,
                IntegrationAddresses {
                    switchboard: Address::repeat_byte(2),
                    capacitor: Address::repeat_byte(3),
                    decapacitor: Address::repeat_byte(4),
                },
            ),
    );
    book.save(&path).unwrap();

    let mut reloaded = AddressBook::load(&path).unwrap();
    assert_eq!(reloaded, book);

    reloaded.merge_chain(
        ChainSlug::ArbitrumSepolia,
        ChainAddresses::default().with_core(CoreContract::Hasher, Address::repeat_byte(5)),
    );
    reloaded.save(&path).unwrap();

    let last = AddressBook::load(&path).unwrap();
    assert_eq!(
        last.core(ChainSlug::ArbitrumSepolia, CoreContract::Socket).unwrap(),
        Address::repeat_byte(1)
    );
    assert_eq!(
        last.core(ChainSlug::ArbitrumSepolia, CoreContract::Hasher).unwrap(),
        Address::repeat_byte(5)
    );
    assert_eq!(
        last.integration(
            ChainSlug::ArbitrumSepolia,
            ChainSlug::OptimismSepolia,
            IntegrationType::NativeBridge
        )
        .unwrap()
        .capacitor,
        Address::repeat_byte(3)
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn malformed_file_is_reported() {
    let path = temp_path("malformed");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(AddressBook::load(&path), Err(AddressBookError::Json { .. })));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn fast2_paths_load() {
    let path = temp_path("fast2");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"{
  "421614": {
    "Socket": "0x1111111111111111111111111111111111111111",
    "integrations": {
      "11155420": {
        "FAST2": {
          "switchboard": "0x2222222222222222222222222222222222222222",
          "capacitor": "0x3333333333333333333333333333333333333333",
          "decapacitor": "0x4444444444444444444444444444444444444444"
        }
      }
    }
  }
}"#,
    )
    .unwrap();

    let book = AddressBook::load(&path).unwrap();
    let fast2 = book
        .integration(ChainSlug::ArbitrumSepolia, ChainSlug::OptimismSepolia, IntegrationType::Fast2)
        .unwrap();
    assert_eq!(fast2.capacitor, Address::repeat_byte(0x33));
    assert_eq!(IntegrationType::Fast2.to_string(), "FAST2");
    assert_eq!(IntegrationType::Fast2.switchboard(), None);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unmanaged_keys_survive_load_and_save() {
    let path = temp_path("foreign-keys");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"{
  "421614": {
    "Socket": "0x1111111111111111111111111111111111111111",
    "SocketBatcher": "0x5555555555555555555555555555555555555555",
    "SimpleCounter": { "address": "0x6666666666666666666666666666666666666666" },
    "startBlock": 42
  }
}"#,
    )
    .unwrap();

    let mut book = AddressBook::load(&path).unwrap();
    book.merge_chain(
        ChainSlug::ArbitrumSepolia,
        ChainAddresses::default().with_core(CoreContract::Hasher, Address::repeat_byte(7)),
    );
    book.save(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let chain = &json["421614"];
    assert_eq!(chain["SocketBatcher"], "0x5555555555555555555555555555555555555555");
    assert_eq!(chain["SimpleCounter"]["address"], "0x6666666666666666666666666666666666666666");
    assert_eq!(chain["Socket"], "0x1111111111111111111111111111111111111111");
    assert_eq!(chain["startBlock"], 42);
    assert!(chain.get("Hasher").is_some());

    let reloaded = AddressBook::load(&path).unwrap();
    assert_eq!(reloaded, book);
    assert!(reloaded.chain(ChainSlug::ArbitrumSepolia).unwrap().extra("SocketBatcher").is_some());

    let _ = std::fs::remove_file(&path);
}
