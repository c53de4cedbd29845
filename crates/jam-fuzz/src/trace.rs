//! Recorded traces: a flat file of length-prefixed, `jam-codec`-encoded
//! blocks, read back in order. This is the bypass-synthesis path: a trace
//! captured from a real run (or handed over by another conformance target)
//! replays exactly, without the builder's own PRNG ever entering into it.

use std::io::Read;
use std::path::Path;

use jam_codec::{decode_varint, Decode};
use jam_stf::Block;

use crate::builder::Builder;
use crate::error::BuilderError;

/// Reads a sequence of varint-length-prefixed, `jam-codec`-encoded blocks.
pub fn load_recorded(path: impl AsRef<Path>) -> Result<Vec<Block>, BuilderError> {
    let mut file = std::fs::File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let mut cursor: &[u8] = &bytes;
    let mut blocks = Vec::new();
    while !cursor.is_empty() {
        let len = decode_varint(&mut cursor)? as usize;
        if cursor.len() < len {
            return Err(BuilderError::Codec(jam_codec::CodecError::UnexpectedEnd));
        }
        let (block_bytes, rest) = cursor.split_at(len);
        let mut block_cursor = block_bytes;
        let block = Block::decode(&mut block_cursor)?;
        if !block_cursor.is_empty() {
            return Err(BuilderError::Codec(jam_codec::CodecError::InvalidFormat));
        }
        blocks.push(block);
        cursor = rest;
    }
    Ok(blocks)
}

/// Where a trace's blocks come from: synthesized fresh by a seeded
/// [`Builder`], or replayed from a file recorded earlier.
pub enum TraceSource {
    Synthesized(Builder),
    Recorded(Vec<Block>),
}

impl TraceSource {
    pub fn synthesized(seed: u64, params: jam_types::Params) -> Self {
        TraceSource::Synthesized(Builder::new(seed, params))
    }

    pub fn recorded(path: impl AsRef<Path>) -> Result<Self, BuilderError> {
        Ok(TraceSource::Recorded(load_recorded(path)?))
    }
}
