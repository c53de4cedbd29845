//! Signature, hashing, and opaque-verifier primitives shared by every JAM
//! subsystem crate.

mod bls;
mod ed25519;
mod error;
mod hash;
mod vrf;

pub use bls::{stub_aggregate_signature, BlsAggregate, StubBlsAggregate};
pub use ed25519::{sign, verify, verify_all};
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_pair, Blake2b256};
pub use vrf::{
    stub_ietf_proof, stub_ring_proof, IetfVrf, IetfVrfProof, RingVrf, StubIetfVrf, StubRingVrf,
};

pub use ed25519_dalek::SigningKey;
