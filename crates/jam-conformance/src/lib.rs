//! Conformance protocol for the JAM core (spec.md §4.11): a length-prefixed
//! framed wire format plus both sides of it — `target` answers requests
//! against a live [`jam_state::State`] and `fuzzer` drives a target through
//! a genesis state and a block sequence, checking every reported root.

mod error;
mod fuzzer;
mod message;
mod target;

pub use error::ConformanceError;
pub use fuzzer::{run_fuzzer_session, run_recorded_session, FuzzerOutcome};
pub use message::{read_frame, write_frame, AncestryItem, Message, PeerInfo};
pub use target::{SessionState, TargetSession};
