use thiserror::Error;

use jam_codec::CodecError;
use jam_stf::StfError;

/// Everything that can go wrong driving the builder or loading a recorded
/// trace. A synthesized block failing `StfError` is a bug in the builder
/// itself (it only ever constructs blocks it believes are valid), not a
/// scenario under test — callers are expected to `unwrap`/propagate rather
/// than treat it as an interesting finding.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error(transparent)]
    Stf(#[from] StfError),
    #[error("recorded trace is malformed: {0}")]
    Codec(#[from] CodecError),
    #[error("recorded trace could not be read: {0}")]
    Io(#[from] std::io::Error),
}
