use ed25519_dalek::{Signature, SigningKey, Verifier, VerifyingKey};
use jam_types::{Ed25519Public, Ed25519Signature};

use crate::error::CryptoError;

/// Signs `message` with `signing_key`, the way `zeratul-p2p`'s BFT module
/// signs batch proposals before gossiping them.
pub fn sign(signing_key: &SigningKey, message: &[u8]) -> Ed25519Signature {
    signing_key.sign(message).to_bytes()
}

pub fn verify(
    public: &Ed25519Public,
    message: &[u8],
    signature: &Ed25519Signature,
) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(public).map_err(|_| CryptoError::InvalidPublicKey)?;
    let signature = Signature::from_bytes(signature);
    verifying_key
        .verify(message, &signature)
        .map_err(|_| CryptoError::BadSignature)
}

/// Verifies every `(public, message, signature)` triple, short-circuiting
/// on the first failure. Subsystems that need the triples checked
/// concurrently (guarantee signatures, assurance signatures) dispatch this
/// function over a `rayon` scope themselves rather than this crate taking
/// on a parallelism dependency it would use in only one caller.
pub fn verify_all<'a, I>(items: I) -> Result<(), CryptoError>
where
    I: IntoIterator<Item = (&'a Ed25519Public, &'a [u8], &'a Ed25519Signature)>,
{
    for (public, message, signature) in items {
        verify(public, message, signature)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    #[test]
    fn sign_then_verify_succeeds() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let public = signing_key.verifying_key().to_bytes();
        let message = b"guarantee-for-core-0";
        let signature = sign(&signing_key, message);
        assert!(verify(&public, message, &signature).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_message() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let public = signing_key.verifying_key().to_bytes();
        let signature = sign(&signing_key, b"original");
        assert_eq!(
            verify(&public, b"tampered", &signature),
            Err(CryptoError::BadSignature)
        );
    }

    #[test]
    fn verify_all_short_circuits_on_first_bad_signature() {
        let a = SigningKey::generate(&mut OsRng);
        let b = SigningKey::generate(&mut OsRng);
        let pa = a.verifying_key().to_bytes();
        let pb = b.verifying_key().to_bytes();
        let sig_a = sign(&a, b"msg-a");
        let bad_sig_b = sign(&a, b"msg-b"); // signed with the wrong key
        let items = vec![
            (&pa, b"msg-a".as_slice(), &sig_a),
            (&pb, b"msg-b".as_slice(), &bad_sig_b),
        ];
        assert_eq!(verify_all(items), Err(CryptoError::BadSignature));
    }
}
