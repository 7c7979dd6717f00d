/// An error that can occur when signing or verifying a [`SignedUpdate`].
///
/// [`SignedUpdate`]: crate::SignedUpdate
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// Error signing the update digest.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
    /// The signature could not be recovered.
    #[error(transparent)]
    Signature(#[from] alloy::primitives::SignatureError),
}
