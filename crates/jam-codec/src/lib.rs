//! Wire codec for the JAM core.
//!
//! The scheme is a bijective variable-length natural-number encoding (see
//! [`varint`]) layered under three conventions shared by every composite
//! type in the workspace: fixed-size values are encoded as raw bytes,
//! sequences are a varint length prefix followed by elements, and sum
//! types are a single discriminant byte followed by the chosen variant's
//! encoding. `Decode` takes a cursor it advances in place rather than
//! returning a remainder slice, so a struct's `decode` can simply chain
//! field decodes with `?`.

mod error;
mod impls;
mod seq;
mod varint;

pub use error::CodecError;
pub use seq::{decode_sorted_seq, encode_sorted_seq};
pub use varint::{decode_varint, encode_varint};

/// Serializes `self` by appending its wire form to `out`.
pub trait Encode {
    fn encode_to(&self, out: &mut Vec<u8>);

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_to(&mut out);
        out
    }
}

/// Deserializes a value from the front of `input`, advancing the cursor
/// past the bytes consumed. Implementations must not read past the value's
/// own boundary, so sequences and structs can decode field-by-field.
pub trait Decode: Sized {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError>;
}

/// Convenience for decoding a whole buffer, erroring if bytes remain.
pub fn decode_exact<T: Decode>(mut input: &[u8]) -> Result<T, CodecError> {
    let value = T::decode(&mut input)?;
    if !input.is_empty() {
        return Err(CodecError::InvalidFormat);
    }
    Ok(value)
}
