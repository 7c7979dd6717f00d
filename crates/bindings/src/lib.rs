#![doc = include_str!("../README.md")]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bindings;
pub use bindings::{
    AccessControl, Capacitor, CapacitorFactory, ExecutionManager, FastSwitchboard, GasPriceOracle,
    Hasher, OptimisticSwitchboard, SignatureVerifier, Socket, Switchboard, TransmitManager,
};

mod roles;
pub use roles::{Role, UnknownRole};

/// Version string passed to the Socket constructor.
pub const SOCKET_VERSION: &str = "IMMORTAL-DL";

/// Maximum number of messages packed into one packet.
pub const DEFAULT_MAX_PACKET_LENGTH: u64 = 1;

/// Capacitor type used when registering switchboards.
pub const DEFAULT_CAPACITOR_TYPE: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        primitives::{Address, U256},
        sol_types::{SolCall, SolConstructor},
    };

    #[test]
    fn constructor_args_are_abi_encoded() {
        let owner = Address::repeat_byte(0x11);
        let args = Hasher::constructorCall { owner_: owner }.abi_encode();
        assert_eq!(args.len(), 32);
        assert_eq!(&args[12..], owner.as_slice());

        let args = TransmitManager::constructorCall {
            signatureVerifier_: Address::ZERO,
            owner_: owner,
            chainSlug_: 31337,
        }
        .abi_encode();
        assert_eq!(args.len(), 96);
        assert_eq!(U256::from_be_slice(&args[64..]), U256::from(31337));
    }

    #[test]
    fn selectors() {
        assert_eq!(Switchboard::capacitor__Call::SIGNATURE, "capacitor__()");
        assert_eq!(
            Socket::registerSwitchBoardCall::SIGNATURE,
            "registerSwitchBoard(address,uint256,uint32,uint32)"
        );
    }
}
