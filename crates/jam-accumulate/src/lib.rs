//! Per-service PVM invocation bookkeeping, FIFO transfers, preimage
//! solicitation, and gas accounting (spec.md §4.6): the Accumulation
//! subsystem.
//!
//! `PvmHost` is the opaque external-PVM boundary (§6): real bytecode
//! execution is out of scope, so [`NullPvmHost`] drives every other piece
//! of bookkeeping without one. Grounded on `zeratul-blockchain`'s
//! `PvmBatchExecutor` (`execution/pvm_batch.rs`) — a PolkaVM-shaped
//! executor wrapping deterministic logic — narrowed here to a single
//! `invoke` trait method since this workspace carries no PVM interpreter.

mod accumulate;
mod codec;
mod error;
mod preimages;
mod pvm;

pub use accumulate::process_accumulation;
pub use error::AccumulateError;
pub use preimages::{process_preimages, PreimageEntry, PreimagesExtrinsic};
pub use pvm::{NewService, NullPvmHost, PvmCall, PvmEntryPoint, PvmHost, PvmOutcome, PvmStatus, Transfer};
