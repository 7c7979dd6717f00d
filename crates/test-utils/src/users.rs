use alloy::{primitives::B256, signers::local::PrivateKeySigner};

/// Make a deterministic signer from a single repeated key byte.
pub fn make_signer(i: u8) -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&B256::repeat_byte(i)).unwrap()
}
