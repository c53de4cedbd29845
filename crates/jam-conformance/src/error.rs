use jam_codec::CodecError;
use jam_state::StateError;
use jam_stf::StfError;
use jam_types::Hash;
use thiserror::Error;

/// Everything that can end a conformance session (spec.md §7's harness
/// group), plus the `std::io::Error` / [`CodecError`] / [`StateError`] /
/// [`StfError`] a framed read, a message decode, an `initialize` keyval
/// set, or an `import_block` can each surface.
#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("i/o error on the framed stream: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Stf(#[from] StfError),

    #[error(transparent)]
    Builder(#[from] jam_fuzz::BuilderError),

    #[error("block {block_number} state root mismatch: expected {expected:02x?}, got {got:02x?}")]
    StateRootMismatch {
        block_number: u32,
        expected: Hash,
        got: Hash,
    },

    #[error("expected a {expected} message, got a {got} message")]
    UnexpectedResponse { expected: &'static str, got: &'static str },

    #[error("timed out waiting for a response")]
    Timeout,

    #[error("initial state root mismatch: expected {expected:02x?}, got {got:02x?}")]
    InitialStateRootMismatch { expected: Hash, got: Hash },

    #[error("peer reported an error: {0}")]
    Peer(String),
}
