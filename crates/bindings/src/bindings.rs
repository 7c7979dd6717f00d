#![allow(clippy::too_many_arguments)]
#![allow(missing_docs)]

mod access_control {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        contract AccessControl {
            function grantRole(bytes32 role_, address grantee_) external;
            function hasRole(bytes32 role_, address address_) external view returns (bool);
        }
    );
}

mod simple_owned {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        contract Hasher {
            constructor(address owner_);
        }

        #[derive(Debug, PartialEq, Eq)]
        contract SignatureVerifier {
            constructor(address owner_);
        }

        #[derive(Debug, PartialEq, Eq)]
        contract CapacitorFactory {
            constructor(address owner_);
        }
    );
}

mod socket {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        contract Socket {
            constructor(
                uint32 chainSlug_,
                address hasher_,
                address transmitManager_,
                address executionManager_,
                address capacitorFactory_,
                address owner_,
                string version_
            );

            function registerSwitchBoard(
                address switchBoardAddress_,
                uint256 maxPacketLength_,
                uint32 siblingChainSlug_,
                uint32 capacitorType_
            ) external returns (address capacitor, address decapacitor);
            function capacitors__(address switchboard_, uint32 siblingChainSlug_) external view returns (address);
            function decapacitors__(address switchboard_, uint32 siblingChainSlug_) external view returns (address);
        }
    );
}

mod switchboard {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        contract Switchboard {
            function nextNonce(address signer_) external view returns (uint256);
            function setAttestGasLimit(
                uint256 nonce_,
                uint32 dstChainSlug_,
                uint256 attestGasLimit_,
                bytes signature_
            ) external;
            function setExecutionOverhead(
                uint256 nonce_,
                uint32 dstChainSlug_,
                uint256 executionOverhead_,
                bytes signature_
            ) external;
            function tripPath(uint256 nonce_, uint32 srcChainSlug_, bytes signature_) external;
            function unTripPath(uint256 nonce_, uint32 srcChainSlug_, bytes signature_) external;
            function capacitor__() external view returns (address);
            function setCapacitor(address capacitor_) external;
            function initiateNativeConfirmation(bytes32 packetId_) external;
        }

        #[derive(Debug, PartialEq, Eq)]
        contract FastSwitchboard {
            constructor(
                address owner_,
                address socket_,
                uint32 chainSlug_,
                uint256 timeoutInSeconds_,
                address signatureVerifier_
            );
        }

        #[derive(Debug, PartialEq, Eq)]
        contract OptimisticSwitchboard {
            constructor(
                address owner_,
                address socket_,
                uint32 chainSlug_,
                uint256 timeoutInSeconds_,
                address signatureVerifier_
            );
        }
    );
}

mod capacitor {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        contract Capacitor {
            function getNextPacketToBeSealed() external view returns (bytes32 root, uint64 packetCount);
        }
    );
}

mod transmit_manager {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        contract TransmitManager {
            constructor(address signatureVerifier_, address owner_, uint32 chainSlug_);

            function nextNonce(address signer_) external view returns (uint256);
            function setProposeGasLimit(
                uint256 nonce_,
                uint32 dstChainSlug_,
                uint256 proposeGasLimit_,
                bytes signature_
            ) external;
        }
    );
}

mod execution_manager {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        contract ExecutionManager {
            constructor(address owner_, uint32 chainSlug_, address signatureVerifier_);
        }
    );
}

mod gas_price_oracle {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        contract GasPriceOracle {
            constructor(address owner_, uint32 chainSlug_);

            function nextNonce(address signer_) external view returns (uint256);
            function setRelativeGasPrice(
                uint32 dstChainSlug_,
                uint256 relativeGasPrice_,
                uint256 nonce_,
                bytes signature_
            ) external;
        }
    );
}

pub use access_control::AccessControl;
pub use capacitor::Capacitor;
pub use execution_manager::ExecutionManager;
pub use gas_price_oracle::GasPriceOracle;
pub use simple_owned::{CapacitorFactory, Hasher, SignatureVerifier};
pub use socket::Socket;
pub use switchboard::{FastSwitchboard, OptimisticSwitchboard, Switchboard};
pub use transmit_manager::TransmitManager;
