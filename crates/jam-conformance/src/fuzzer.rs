//! The driving ("fuzzer") side of the conformance protocol: handshakes
//! with a target, ships a genesis state and a sequence of blocks, and
//! compares every returned state root bit-for-bit against the root the
//! local [`jam_fuzz::Builder`] (or a recorded trace) already computed for
//! the same block — exactly spec.md §4.12's "used both to seed
//! conformance tests and to replay recorded traces".

use jam_fuzz::Builder;
use jam_state::State;
use jam_stf::{Block, Header};
use jam_types::{Hash, GENESIS_PARENT};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::message::{read_frame, write_frame, Message, PeerInfo};
use crate::ConformanceError;

/// Result of a clean fuzzer-driven session: how many blocks were
/// imported before either the trace ran out or `should_shutdown` fired
/// (spec.md §5: "a cancellation between blocks returns
/// `success=true, blocks_processed=i`").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuzzerOutcome {
    pub success: bool,
    pub blocks_processed: u32,
}

fn fuzzer_peer_info() -> PeerInfo {
    PeerInfo {
        fuzz_version: 1,
        fuzz_features: 0,
        jam_version: (0, 6, 7),
        app_version: (0, 1, 0),
        app_name: "jam-conformance-fuzzer".to_string(),
    }
}

fn genesis_header() -> Header {
    Header {
        parent_hash: GENESIS_PARENT,
        parent_state_root: jam_types::ZERO_HASH,
        slot: 0,
        author_index: 0,
        entropy_source: jam_types::ZERO_HASH,
        epoch_mark: None,
        tickets_mark: None,
    }
}

async fn expect_state_root<S: AsyncRead + Unpin>(stream: &mut S) -> Result<Hash, ConformanceError> {
    match read_frame(stream).await? {
        Message::StateRoot(root) => Ok(root),
        Message::Error(message) => Err(ConformanceError::Peer(message)),
        other => Err(ConformanceError::UnexpectedResponse {
            expected: "state_root",
            got: other.name(),
        }),
    }
}

/// Runs the handshake, `SetState`, and then up to `max_blocks` rounds of
/// `ImportBlock → state_root`, synthesizing each block from `builder` and
/// checking the target's reported root against the one `builder` itself
/// computed. `should_shutdown` is polled between blocks, never mid-import
/// (spec.md §5's cancellation model).
pub async fn run_fuzzer_session<S, F>(
    stream: &mut S,
    builder: &mut Builder,
    max_blocks: u32,
    mut should_shutdown: F,
) -> Result<FuzzerOutcome, ConformanceError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    F: FnMut() -> bool,
{
    write_frame(stream, &Message::PeerInfo(fuzzer_peer_info())).await?;
    match read_frame(stream).await? {
        Message::PeerInfo(_) => {}
        Message::Error(message) => return Err(ConformanceError::Peer(message)),
        other => {
            return Err(ConformanceError::UnexpectedResponse {
                expected: "peer_info",
                got: other.name(),
            })
        }
    }

    let genesis_state = builder.state().clone();
    let expected_genesis_root = genesis_state.state_root();
    write_frame(
        stream,
        &Message::Initialize {
            header: genesis_header(),
            keyvals: genesis_state.dictionary_entries(),
            ancestry: vec![],
        },
    )
    .await?;
    let got_genesis_root = expect_state_root(stream).await?;
    if got_genesis_root != expected_genesis_root {
        return Err(ConformanceError::InitialStateRootMismatch {
            expected: expected_genesis_root,
            got: got_genesis_root,
        });
    }

    for i in 0..max_blocks {
        if should_shutdown() {
            return Ok(FuzzerOutcome { success: true, blocks_processed: i });
        }
        let (block, expected_root): (Block, Hash) = builder.apply_next()?;
        write_frame(stream, &Message::ImportBlock(block)).await?;
        let got_root = expect_state_root(stream).await?;
        if got_root != expected_root {
            return Err(ConformanceError::StateRootMismatch {
                block_number: i + 1,
                expected: expected_root,
                got: got_root,
            });
        }
    }

    Ok(FuzzerOutcome { success: true, blocks_processed: max_blocks })
}

/// Like [`run_fuzzer_session`] but replaying a recorded trace (spec.md
/// §4.12: "For traces, the builder is bypassed and blocks are loaded from
/// disk") instead of synthesizing fresh blocks. The expected root per
/// block is whatever `genesis_state` plus the STF itself produces when
/// the trace is replayed locally first — callers that already trust a
/// reference root sequence should compare against that instead.
pub async fn run_recorded_session<S, F>(
    stream: &mut S,
    genesis_state: &State,
    blocks: &[Block],
    expected_roots: &[Hash],
    mut should_shutdown: F,
) -> Result<FuzzerOutcome, ConformanceError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    F: FnMut() -> bool,
{
    write_frame(stream, &Message::PeerInfo(fuzzer_peer_info())).await?;
    match read_frame(stream).await? {
        Message::PeerInfo(_) => {}
        Message::Error(message) => return Err(ConformanceError::Peer(message)),
        other => {
            return Err(ConformanceError::UnexpectedResponse {
                expected: "peer_info",
                got: other.name(),
            })
        }
    }

    let expected_genesis_root = genesis_state.state_root();
    write_frame(
        stream,
        &Message::Initialize {
            header: genesis_header(),
            keyvals: genesis_state.dictionary_entries(),
            ancestry: vec![],
        },
    )
    .await?;
    let got_genesis_root = expect_state_root(stream).await?;
    if got_genesis_root != expected_genesis_root {
        return Err(ConformanceError::InitialStateRootMismatch {
            expected: expected_genesis_root,
            got: got_genesis_root,
        });
    }

    for (i, (block, expected_root)) in blocks.iter().zip(expected_roots.iter()).enumerate() {
        if should_shutdown() {
            return Ok(FuzzerOutcome { success: true, blocks_processed: i as u32 });
        }
        write_frame(stream, &Message::ImportBlock(block.clone())).await?;
        let got_root = expect_state_root(stream).await?;
        if got_root != *expected_root {
            return Err(ConformanceError::StateRootMismatch {
                block_number: i as u32 + 1,
                expected: *expected_root,
                got: got_root,
            });
        }
    }

    Ok(FuzzerOutcome { success: true, blocks_processed: blocks.len() as u32 })
}
