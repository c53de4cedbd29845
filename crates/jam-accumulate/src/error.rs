use thiserror::Error;

/// Preimages/Accumulation error group. Per spec.md §7 these are non-fatal
/// for the accumulation sub-errors (`InsufficientGas`): they are recorded
/// per call in statistics rather than aborting the block. `process_preimages`
/// does surface its two variants as hard errors, since an invalid preimage
/// extrinsic is a block-level validation failure, not a per-call PVM
/// outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccumulateError {
    #[error("preimage already provided, or no matching Requested lookup entry exists")]
    PreimageAlreadyProvided,
    #[error("preimage extrinsic names a service id with no account in delta")]
    ServiceUnknown,
}
