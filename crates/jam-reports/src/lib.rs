//! Work-report guarantee validation and guarantor core-assignment timing
//! (spec.md §4.4): the Reports subsystem.
//!
//! Grounded on `zeratul-mvp/src/consensus.rs`'s rotation-window arithmetic
//! and `zeratul-p2p`'s guarantee-shaped gossip message, adapted to carry
//! a `WorkReport` plus a guarantor signature set instead of a block vote.

mod assignment;
mod codec;
mod error;
mod guarantee;
mod types;

pub use assignment::{guarantor_assignment, rotation_entropy};
pub use error::ReportsError;
pub use guarantee::process_guarantees;
pub use types::{Guarantee, GuarantorSignature};
