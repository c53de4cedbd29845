use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("public key bytes are not a valid ed25519 point")]
    InvalidPublicKey,
    #[error("signature does not verify against message and public key")]
    BadSignature,
    #[error("ring-VRF proof does not verify against the given commitment")]
    BadRingProof,
    #[error("IETF VRF proof does not verify against the given public key")]
    BadVrfProof,
    #[error("BLS aggregate signature does not verify")]
    BadBlsAggregate,
}
