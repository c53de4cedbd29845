//! Seeded block synthesis for driving the JAM state transition without a
//! network of validators.
//!
//! Grounded on `zeratul-mvp/src/node.rs`'s block-production loop: where
//! that node drives blocks off a wall clock and real validator keys, this
//! crate drives them off a `rand_chacha` seed, so a conformance target or
//! a benchmark can replay the exact same chain on every run.

mod builder;
mod error;
mod trace;

pub use builder::Builder;
pub use error::BuilderError;
pub use trace::{load_recorded, TraceSource};
