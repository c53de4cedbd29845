use thiserror::Error;

/// Failure modes of the wire codec.
///
/// Decoding never panics: every malformed input a conformance trace can
/// contain maps to one of these variants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("varint is not in canonical minimal-length form")]
    InvalidFormat,

    #[error("input ended before the expected value was fully read")]
    UnexpectedEnd,

    #[error("sum-type discriminant {found} is outside the declared range 0..{max}")]
    DiscriminantOutOfRange { found: u64, max: u64 },

    #[error("dictionary keys were not encoded in strictly ascending order")]
    KeysNotSorted,
}
