use crate::error::CodecError;
use crate::varint::{decode_varint, encode_varint};
use crate::{Decode, Encode};

/// Encodes a sequence whose elements the caller has already arranged in
/// ascending key order (dictionaries keyed by service id, validator index,
/// and similar). Just a varint length prefix plus each element's encoding;
/// the ordering is not re-checked here, only enforced on decode.
pub fn encode_sorted_seq<T: Encode>(items: &[T], out: &mut Vec<u8>) {
    encode_varint(items.len() as u64, out);
    for item in items {
        item.encode_to(out);
    }
}

/// Decodes a sequence and rejects it with [`CodecError::KeysNotSorted`] if
/// any two consecutive elements are not in strictly ascending `key_of`
/// order — JAM dictionaries never admit duplicate or out-of-order keys.
pub fn decode_sorted_seq<T, K, F>(input: &mut &[u8], key_of: F) -> Result<Vec<T>, CodecError>
where
    T: Decode,
    K: Ord,
    F: Fn(&T) -> K,
{
    let len = decode_varint(input)? as usize;
    let mut items = Vec::with_capacity(len.min(4096));
    let mut prev: Option<K> = None;
    for _ in 0..len {
        let item = T::decode(input)?;
        let key = key_of(&item);
        if let Some(prev_key) = &prev {
            if key <= *prev_key {
                return Err(CodecError::KeysNotSorted);
            }
        }
        prev = Some(key);
        items.push(item);
    }
    Ok(items)
}
