use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssurancesError {
    #[error("assurance anchor does not match the current block's parent hash")]
    InvalidAnchorHash,
    #[error("assurance validator_index is not below validators_count")]
    InvalidValidatorIndex,
    #[error("assurance asserts a core with no pending report in rho")]
    CoreNotEngaged,
    #[error("assurance ed25519 signature does not verify")]
    InvalidSignature,
    #[error("assurances are not sorted strictly increasing by validator_index")]
    NotSortedOrUniqueValidatorIndex,
    #[error("assurance bitfield length or a set bit beyond core_count-1 is invalid")]
    InvalidBitfieldSize,
}
