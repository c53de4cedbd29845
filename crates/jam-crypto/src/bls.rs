//! BLS key aggregation as an opaque trait.
//!
//! Validator key tuples carry a BLS key alongside Ed25519 and Bandersnatch
//! keys, reserved for future aggregated-signature use; the state
//! transition defined here never itself produces or checks a BLS
//! aggregate, so this is a narrower façade than [`crate::vrf`]'s — one
//! method, one deterministic stub.

use jam_types::{BlsPublic, Hash};

use crate::error::CryptoError;
use crate::hash::blake2b_256;

pub trait BlsAggregate {
    /// Verifies an aggregate signature from `signers` over `message`.
    fn verify_aggregate(
        &self,
        signers: &[BlsPublic],
        message: &[u8],
        aggregate_signature: &[u8],
    ) -> Result<(), CryptoError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StubBlsAggregate;

impl BlsAggregate for StubBlsAggregate {
    fn verify_aggregate(
        &self,
        signers: &[BlsPublic],
        message: &[u8],
        aggregate_signature: &[u8],
    ) -> Result<(), CryptoError> {
        let expected = stub_aggregate(signers, message);
        if aggregate_signature == expected {
            Ok(())
        } else {
            Err(CryptoError::BadBlsAggregate)
        }
    }
}

fn stub_aggregate(signers: &[BlsPublic], message: &[u8]) -> Hash {
    let mut buf = Vec::new();
    for signer in signers {
        buf.extend_from_slice(signer);
    }
    buf.extend_from_slice(message);
    blake2b_256(&buf)
}

/// Builds a stub aggregate `StubBlsAggregate::verify_aggregate` will
/// accept.
pub fn stub_aggregate_signature(signers: &[BlsPublic], message: &[u8]) -> Hash {
    stub_aggregate(signers, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_aggregate_and_rejects_others() {
        let bls = StubBlsAggregate;
        let signers = vec![[3u8; 144], [4u8; 144]];
        let signature = stub_aggregate_signature(&signers, b"finality-vote");
        assert!(bls
            .verify_aggregate(&signers, b"finality-vote", &signature)
            .is_ok());
        assert_eq!(
            bls.verify_aggregate(&signers, b"other-vote", &signature),
            Err(CryptoError::BadBlsAggregate)
        );
    }
}
