mod error;
pub use error::SigningError;

use alloy::{
    primitives::{keccak256, Address, Bytes, Signature, B256, U256},
    signers::Signer,
    sol_types::SolValue,
};
use serde::{Deserialize, Serialize};
use socket_constants::ChainSlug;

/// The kind of privileged update a signature authorizes.
///
/// Each kind hashes a distinct identifier so that a signature for one
/// update cannot be replayed as another.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateKind {
    /// Switchboard attest gas limit.
    AttestGasLimit,
    /// Switchboard execution overhead.
    ExecutionOverhead,
    /// Transmit manager propose gas limit.
    ProposeGasLimit,
    /// Relative gas price or fee update.
    Fees,
    /// Trip a path on a switchboard.
    TripPath,
    /// Untrip a path on a switchboard.
    UntripPath,
}

impl UpdateKind {
    /// The identifier hashed into the digest.
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::AttestGasLimit => "ATTEST_GAS_LIMIT_UPDATE",
            Self::ExecutionOverhead => "EXECUTION_OVERHEAD_UPDATE",
            Self::ProposeGasLimit => "PROPOSE_GAS_LIMIT_UPDATE",
            Self::Fees => "FEES_UPDATE",
            Self::TripPath => "TRIP_PATH",
            Self::UntripPath => "UNTRIP_PATH",
        }
    }
}

/// A privileged parameter update for the path `src -> dst`, ready to sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnsignedUpdate {
    /// What is being updated.
    pub kind: UpdateKind,
    /// Chain the update is applied on.
    pub src: ChainSlug,
    /// Remote chain of the path.
    pub dst: ChainSlug,
    /// Signer nonce read from the target contract.
    pub nonce: U256,
    /// New value.
    pub value: U256,
}

impl UnsignedUpdate {
    /// Create a new update.
    pub const fn new(
        kind: UpdateKind,
        src: ChainSlug,
        dst: ChainSlug,
        nonce: U256,
        value: U256,
    ) -> Self {
        Self { kind, src, dst, nonce, value }
    }

    /// A trip or untrip update. The flag occupies the value word.
    pub const fn trip(src: ChainSlug, dst: ChainSlug, nonce: U256, tripped: bool) -> Self {
        let kind = if tripped { UpdateKind::TripPath } else { UpdateKind::UntripPath };
        let value = if tripped { U256::from_limbs([1, 0, 0, 0]) } else { U256::ZERO };
        Self::new(kind, src, dst, nonce, value)
    }

    /// `keccak256(abi.encode(identifier, src, dst, nonce, value))`.
    ///
    /// A `bool` and a `uint256` holding `0` or `1` encode to the same word,
    /// so trip digests match contracts that hash the flag directly.
    pub fn digest(&self) -> B256 {
        keccak256(
            (
                self.kind.identifier().to_owned(),
                self.src.as_u32(),
                self.dst.as_u32(),
                self.nonce,
                self.value,
            )
                .abi_encode_params(),
        )
    }

    /// Sign the digest as an EIP-191 personal message.
    pub async fn sign<S: Signer + Sync>(self, signer: &S) -> Result<SignedUpdate, SigningError> {
        let signature = signer.sign_message(self.digest().as_slice()).await?;
        Ok(SignedUpdate { update: self, signature })
    }
}

/// An [`UnsignedUpdate`] with the signature that authorizes it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUpdate {
    /// The update.
    pub update: UnsignedUpdate,
    /// The signature over the update digest.
    pub signature: Signature,
}

impl SignedUpdate {
    /// The 65-byte signature as passed to contract calls.
    pub fn signature_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.signature.as_bytes())
    }

    /// Recover the address that signed the update.
    pub fn recover_signer(&self) -> Result<Address, SigningError> {
        self.signature.recover_address_from_msg(self.update.digest()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::signers::local::PrivateKeySigner;

    fn update() -> UnsignedUpdate {
        UnsignedUpdate::new(
            UpdateKind::AttestGasLimit,
            ChainSlug::Hardhat,
            ChainSlug::Sepolia,
            U256::from(4),
            U256::from(250_000),
        )
    }

    #[test]
    fn digest_matches_manual_encoding() {
        let mut buf = Vec::new();
        // head: string offset then four static words
        buf.extend_from_slice(&U256::from(5 * 32).to_be_bytes::<32>());
        buf.extend_from_slice(&U256::from(31337).to_be_bytes::<32>());
        buf.extend_from_slice(&U256::from(11155111).to_be_bytes::<32>());
        buf.extend_from_slice(&U256::from(4).to_be_bytes::<32>());
        buf.extend_from_slice(&U256::from(250_000).to_be_bytes::<32>());
        // tail: length then padded bytes
        let id = b"ATTEST_GAS_LIMIT_UPDATE";
        buf.extend_from_slice(&U256::from(id.len()).to_be_bytes::<32>());
        let mut word = [0u8; 32];
        word[..id.len()].copy_from_slice(id);
        buf.extend_from_slice(&word);

        assert_eq!(update().digest(), keccak256(&buf));
    }

    #[test]
    fn kinds_do_not_collide() {
        let a = update();
        let b = UnsignedUpdate { kind: UpdateKind::ExecutionOverhead, ..a };
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn trip_flag() {
        let trip = UnsignedUpdate::trip(ChainSlug::Hardhat, ChainSlug::Sepolia, U256::ZERO, true);
        assert_eq!(trip.kind, UpdateKind::TripPath);
        assert_eq!(trip.value, U256::from(1));
        let untrip = UnsignedUpdate::trip(ChainSlug::Hardhat, ChainSlug::Sepolia, U256::ZERO, false);
        assert_eq!(untrip.kind.identifier(), "UNTRIP_PATH");
        assert_eq!(untrip.value, U256::ZERO);
    }

    #[tokio::test]
    async fn signature_recovers_signer() {
        let signer = PrivateKeySigner::random();
        let signed = update().sign(&signer).await.unwrap();
        assert_eq!(signed.recover_signer().unwrap(), signer.address());
        assert_eq!(signed.signature_bytes().len(), 65);
    }

    async fn sign_with<S: Signer + Send + Sync>(signer: &S) -> SignedUpdate {
        update().sign(signer).await.unwrap()
    }

    #[tokio::test]
    async fn signs_through_generic_signer() {
        let signer = PrivateKeySigner::random();
        let signed = sign_with(&signer).await;
        assert_eq!(signed.update, update());
        assert_eq!(signed.recover_signer().unwrap(), signer.address());
    }
}
