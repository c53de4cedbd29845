//! Ticket admission, outside-in ordering, and epoch rotation (spec.md
//! §4.2): the Safrole subsystem.
//!
//! Grounded on `zeratul-mvp/src/consensus.rs`'s leader-rotation arithmetic
//! and `zeratul-p2p/src/bft.rs`'s `thiserror` error style; ticket/epoch
//! terminology cross-checked against the ring-VRF sealing scheme in
//! `other_examples`'s sassafras reference.

mod error;
mod rotation;
mod ticket;

pub use error::SafroleError;
pub use rotation::rotate_epoch;
pub use ticket::{outside_in_order, process_ticket_extrinsic};
