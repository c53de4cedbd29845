//! Verdict, culprit, and fault processing (spec.md §4.3): the Disputes
//! subsystem.
//!
//! Grounded on `zeratul-p2p/src/bft.rs`'s quorum-counting style (super-
//! majority / one-third thresholds computed from the live validator
//! count) and its `thiserror` error enum convention.

mod codec;
mod error;
mod types;
mod verdict;

pub use error::DisputesError;
pub use types::{Culprit, DisputesExtrinsic, Fault, Judgment, Verdict};
pub use verdict::process_disputes;
