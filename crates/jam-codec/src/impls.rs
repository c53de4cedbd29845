use crate::error::CodecError;
use crate::varint::{decode_varint, encode_varint};
use crate::{Decode, Encode};

impl Encode for bool {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.push(if *self { 1 } else { 0 });
    }
}

impl Decode for bool {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let (&b, rest) = input.split_first().ok_or(CodecError::UnexpectedEnd)?;
        *input = rest;
        match b {
            0 => Ok(false),
            1 => Ok(true),
            found => Err(CodecError::DiscriminantOutOfRange {
                found: found as u64,
                max: 2,
            }),
        }
    }
}

/// A raw byte is not length-prefixed or varint-encoded: it is itself the
/// wire form, the way `[u8; N]` arrays and hashes are.
impl Encode for u8 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }
}

impl Decode for u8 {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let (&b, rest) = input.split_first().ok_or(CodecError::UnexpectedEnd)?;
        *input = rest;
        Ok(b)
    }
}

macro_rules! impl_varint_uint {
    ($ty:ty) => {
        impl Encode for $ty {
            fn encode_to(&self, out: &mut Vec<u8>) {
                encode_varint(*self as u64, out);
            }
        }

        impl Decode for $ty {
            fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
                let value = decode_varint(input)?;
                <$ty>::try_from(value).map_err(|_| CodecError::InvalidFormat)
            }
        }
    };
}

// Every natural-number field in the state (slots, indices, ids, gas
// amounts) rides the same bijective varint scheme.
impl_varint_uint!(u16);
impl_varint_uint!(u32);
impl_varint_uint!(u64);

impl<const N: usize> Encode for [u8; N] {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        if input.len() < N {
            return Err(CodecError::UnexpectedEnd);
        }
        let mut buf = [0u8; N];
        buf.copy_from_slice(&input[..N]);
        *input = &input[N..];
        Ok(buf)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_varint(self.len() as u64, out);
        for item in self {
            item.encode_to(out);
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let len = decode_varint(input)? as usize;
        let mut items = Vec::with_capacity(len.min(4096));
        for _ in 0..len {
            items.push(T::decode(input)?);
        }
        Ok(items)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode_to(&self, out: &mut Vec<u8>) {
        match self {
            None => out.push(0),
            Some(value) => {
                out.push(1);
                value.encode_to(out);
            }
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let (&tag, rest) = input.split_first().ok_or(CodecError::UnexpectedEnd)?;
        match tag {
            0 => {
                *input = rest;
                Ok(None)
            }
            1 => {
                *input = rest;
                Ok(Some(T::decode(input)?))
            }
            found => Err(CodecError::DiscriminantOutOfRange {
                found: found as u64,
                max: 2,
            }),
        }
    }
}

impl<A: Encode, B: Encode> Encode for (A, B) {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.0.encode_to(out);
        self.1.encode_to(out);
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok((A::decode(input)?, B::decode(input)?))
    }
}

impl Encode for String {
    fn encode_to(&self, out: &mut Vec<u8>) {
        let bytes = self.as_bytes();
        encode_varint(bytes.len() as u64, out);
        out.extend_from_slice(bytes);
    }
}

impl Decode for String {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let len = decode_varint(input)? as usize;
        if input.len() < len {
            return Err(CodecError::UnexpectedEnd);
        }
        let bytes = input[..len].to_vec();
        *input = &input[len..];
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidFormat)
    }
}
