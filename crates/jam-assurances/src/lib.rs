//! Availability bitfield processing and report promotion (spec.md §4.5):
//! the Assurances subsystem.
//!
//! Grounded on `zeratul-mvp/src/da.rs`'s sample-then-threshold shape,
//! adapted from Fiat-Shamir sampling to direct full-bitfield counting
//! since JAM assurances carry one bit per core, not a sampled subset.

mod bitfield;
mod codec;
mod error;
mod process;
mod types;

pub use bitfield::{bit_at, has_bit_beyond};
pub use error::AssurancesError;
pub use process::process_assurances;
pub use types::Assurance;
