//! The conformance-target role: the side that owns a [`jam_state::State`]
//! and drives it through `jam-stf` in response to framed requests.
//!
//! Grounded on `zeratul-mvp/src/node.rs`'s `Node` (one mutable state
//! handle, explicit accessor methods) narrowed to the protocol's own
//! request/response shape instead of a local block-production loop; the
//! explicit `SessionState` enum follows spec.md §9's design note ("expose
//! it as an explicit enum with a step function consuming one message, not
//! as nested callbacks").

use jam_accumulate::PvmHost;
use jam_crypto::RingVrf;
use jam_state::State;
use jam_stf::{apply_block, Block};
use jam_types::Params;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::message::{read_frame, write_frame, Message, PeerInfo};
use crate::ConformanceError;

/// The protocol's finite state machine (spec.md §9).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Init,
    HandshakeSent,
    HandshakeDone,
    StateSet,
    Running,
    Ended,
}

/// One conformance-target session: a single in-memory [`State`], entered
/// once via `initialize` and then driven block by block. Nothing here
/// persists past the session (spec.md §6 Persistence: "none is mandated
/// by the core").
pub struct TargetSession<'a, R, H> {
    params: Params,
    ring_vrf: &'a R,
    host: &'a H,
    state: Option<State>,
    session_state: SessionState,
    peer_info: PeerInfo,
}

impl<'a, R: RingVrf, H: PvmHost> TargetSession<'a, R, H> {
    pub fn new(params: Params, ring_vrf: &'a R, host: &'a H) -> Self {
        Self {
            params,
            ring_vrf,
            host,
            state: None,
            session_state: SessionState::Init,
            peer_info: PeerInfo {
                fuzz_version: 1,
                fuzz_features: 0,
                jam_version: (0, 6, 7),
                app_version: (0, 1, 0),
                app_name: env!("CARGO_PKG_NAME").to_string(),
            },
        }
    }

    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Consumes one incoming message, advancing the session's state
    /// machine and producing the response to write back.
    pub fn handle(&mut self, message: Message) -> Message {
        match (self.session_state, message) {
            (SessionState::Init, Message::PeerInfo(_peer)) => {
                self.session_state = SessionState::HandshakeSent;
                Message::PeerInfo(self.peer_info.clone())
            }
            (SessionState::HandshakeSent, Message::Initialize { header: _, keyvals, ancestry: _ }) => {
                match State::from_dictionary_entries(&keyvals, self.params) {
                    Ok(state) => {
                        let root = state.state_root();
                        self.state = Some(state);
                        self.session_state = SessionState::StateSet;
                        Message::StateRoot(root)
                    }
                    Err(e) => Message::Error(e.to_string()),
                }
            }
            (SessionState::StateSet, Message::ImportBlock(block))
            | (SessionState::Running, Message::ImportBlock(block)) => {
                self.session_state = SessionState::Running;
                self.import_block(&block)
            }
            (_, Message::GetState(_header_hash)) => match &self.state {
                Some(state) => Message::State(state.dictionary_entries()),
                None => Message::Error("no state has been set yet".to_string()),
            },
            (session_state, other) => {
                self.session_state = SessionState::Ended;
                Message::Error(format!(
                    "unexpected {} message in session state {session_state:?}",
                    other.name()
                ))
            }
        }
    }

    fn import_block(&mut self, block: &Block) -> Message {
        let Some(pre_state) = self.state.as_ref() else {
            return Message::Error("no state has been set yet".to_string());
        };
        match apply_block(pre_state, &self.params, self.ring_vrf, self.host, block) {
            Ok((post_state, root)) => {
                self.state = Some(post_state);
                Message::StateRoot(root)
            }
            Err(e) => Message::Error(e.to_string()),
        }
    }

    /// Drives the session to completion over `stream`: handshake,
    /// `SetState`, then `ImportBlock*` until the peer disconnects or the
    /// `shutdown` predicate (polled between blocks, spec.md §5) returns
    /// true. A clean stop — EOF between messages, or `shutdown` firing —
    /// ends the session without propagating an error.
    pub async fn run<S, F>(
        &mut self,
        stream: &mut S,
        mut should_shutdown: F,
    ) -> Result<(), ConformanceError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
        F: FnMut() -> bool,
    {
        loop {
            if self.session_state == SessionState::Running && should_shutdown() {
                self.session_state = SessionState::Ended;
                return Ok(());
            }

            let message = match read_frame(stream).await {
                Ok(message) => message,
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    self.session_state = SessionState::Ended;
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            let response = self.handle(message);
            let is_terminal_error = matches!(response, Message::Error(_))
                && self.session_state == SessionState::Ended;
            write_frame(stream, &response).await?;
            if is_terminal_error {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jam_accumulate::NullPvmHost;
    use jam_crypto::StubRingVrf;
    use jam_types::GENESIS_PARENT;

    fn genesis_message(params: Params) -> Message {
        let state = State::genesis(params);
        Message::Initialize {
            header: jam_stf::Header {
                parent_hash: GENESIS_PARENT,
                parent_state_root: [0u8; 32],
                slot: 0,
                author_index: 0,
                entropy_source: [0u8; 32],
                epoch_mark: None,
                tickets_mark: None,
            },
            keyvals: state.dictionary_entries(),
            ancestry: vec![],
        }
    }

    #[test]
    fn handshake_then_initialize_reaches_state_set() {
        let params = Params::tiny();
        let mut session = TargetSession::new(params, &StubRingVrf, &NullPvmHost);

        let reply = session.handle(Message::PeerInfo(PeerInfo {
            fuzz_version: 1,
            fuzz_features: 0,
            jam_version: (0, 6, 7),
            app_version: (0, 1, 0),
            app_name: "fuzzer".to_string(),
        }));
        assert!(matches!(reply, Message::PeerInfo(_)));
        assert_eq!(session.session_state(), SessionState::HandshakeSent);

        let reply = session.handle(genesis_message(params));
        assert!(matches!(reply, Message::StateRoot(_)));
        assert_eq!(session.session_state(), SessionState::StateSet);
    }

    #[test]
    fn import_block_before_state_is_set_is_rejected() {
        let params = Params::tiny();
        let mut session = TargetSession::new(params, &StubRingVrf, &NullPvmHost);
        session.handle(Message::PeerInfo(PeerInfo {
            fuzz_version: 1,
            fuzz_features: 0,
            jam_version: (0, 6, 7),
            app_version: (0, 1, 0),
            app_name: "fuzzer".to_string(),
        }));

        let block = jam_stf::Block {
            header: jam_stf::Header {
                parent_hash: GENESIS_PARENT,
                parent_state_root: [0u8; 32],
                slot: 1,
                author_index: 0,
                entropy_source: [1u8; 32],
                epoch_mark: None,
                tickets_mark: None,
            },
            tickets: vec![],
            disputes: jam_disputes::DisputesExtrinsic::default(),
            preimages: jam_accumulate::PreimagesExtrinsic::default(),
            guarantees: vec![],
            assurances: vec![],
        };
        let reply = session.handle(Message::ImportBlock(block));
        assert!(matches!(reply, Message::Error(_)));
    }

    #[tokio::test]
    async fn full_session_over_a_duplex_pipe_reaches_running() {
        let params = Params::tiny();
        let (mut fuzzer_side, mut target_side) = tokio::io::duplex(1 << 20);

        let handle = tokio::spawn(async move {
            let mut session = TargetSession::new(params, &StubRingVrf, &NullPvmHost);
            session.run(&mut target_side, || false).await
        });

        crate::message::write_frame(
            &mut fuzzer_side,
            &Message::PeerInfo(PeerInfo {
                fuzz_version: 1,
                fuzz_features: 0,
                jam_version: (0, 6, 7),
                app_version: (0, 1, 0),
                app_name: "fuzzer".to_string(),
            }),
        )
        .await
        .unwrap();
        let reply = crate::message::read_frame(&mut fuzzer_side).await.unwrap();
        assert!(matches!(reply, Message::PeerInfo(_)));

        crate::message::write_frame(&mut fuzzer_side, &genesis_message(params))
            .await
            .unwrap();
        let reply = crate::message::read_frame(&mut fuzzer_side).await.unwrap();
        let genesis_root = match reply {
            Message::StateRoot(root) => root,
            other => panic!("expected a state root, got {other:?}"),
        };

        drop(fuzzer_side);
        handle.await.unwrap().unwrap();
        let _ = genesis_root;
    }
}
