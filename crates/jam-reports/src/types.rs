use jam_state::WorkReport;
use jam_types::{Ed25519Signature, ValidatorIndex};
use serde::{Deserialize, Serialize};

/// One validator's attestation to a [`WorkReport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuarantorSignature {
    pub validator_index: ValidatorIndex,
    pub signature: Ed25519Signature,
}

/// A guarantee: a work report plus 2-3 guarantor signatures, sorted
/// strictly increasing by `validator_index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guarantee {
    pub report: WorkReport,
    pub signatures: Vec<GuarantorSignature>,
}
