use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisputesError {
    #[error("a verdict, culprit, or fault signature does not verify")]
    BadSignature,
    #[error("an offender key named in a culprit or fault is not in kappa or lambda")]
    OffendersNotInValidators,
    #[error("a verdict target already appears in good, bad, wonky, or punish")]
    VerdictAlreadyResolved,
    #[error("a verdict's signer count does not meet its required quorum")]
    QuorumNotMet,
    #[error("a verdict's judgement age falls outside the accepted window")]
    BadAgeOfJudgement,
}
