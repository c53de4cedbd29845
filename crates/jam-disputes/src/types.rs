use jam_types::{Ed25519Public, Ed25519Signature, EpochIndex, Hash, ValidatorIndex};
use serde::{Deserialize, Serialize};

/// One validator's signed vote on a verdict's target: good (`true`) or
/// bad/wonky (`false`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub validator_index: ValidatorIndex,
    pub is_good: bool,
    pub signature: Ed25519Signature,
}

/// A judgment panel over one work-report hash. `age` is the epoch index
/// the judgment was formed in, checked against the current epoch to
/// reject stale verdicts (`BadAgeOfJudgement`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub target: Hash,
    pub age: EpochIndex,
    /// Sorted strictly increasing by `validator_index`.
    pub judgments: Vec<Judgment>,
}

/// A guarantor's signed confession that a now-bad report is theirs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culprit {
    pub target: Hash,
    pub key: Ed25519Public,
    pub signature: Ed25519Signature,
}

/// A validator's signed vote that contradicts the panel's resolved
/// verdict for `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub target: Hash,
    pub vote: bool,
    pub key: Ed25519Public,
    pub signature: Ed25519Signature,
}

/// The disputes extrinsic: zero or more verdicts, each optionally
/// accompanied by culprits (if resolved bad) and faults (contradicting
/// votes) over the same block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputesExtrinsic {
    pub verdicts: Vec<Verdict>,
    pub culprits: Vec<Culprit>,
    pub faults: Vec<Fault>,
}
