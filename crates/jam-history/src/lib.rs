//! Recent history (β) truncation and validator/service statistics (π):
//! spec.md §4.7 and §4.8.
//!
//! Grounded on `zeratul-mvp/src/state.rs`'s bounded-history-by-truncation
//! pattern; the per-validator counters mirror the fields `zeratul-p2p`'s
//! gossip layer already tracks per-peer (messages sent/received, bytes
//! relayed) renamed to JAM's block-production vocabulary.

mod history;
mod stats;

pub use history::{append_entry, patch_parent_root};
pub use stats::{record_assurer, record_author, record_core_gas, record_guarantor, record_service_gas, rotate_epoch};
