use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportsError {
    #[error("work report core_index is not below core_count")]
    BadCoreIndex,
    #[error("more than one guarantee targets the same core in this block")]
    DuplicateReportOnCore,
    #[error("report context.anchor is not a known recent-history entry, or its state_root does not match")]
    BadAnchor,
    #[error("report authorizer_hash is not present in that core's authorization pool")]
    AuthorizationNotInPool,
    #[error("a guarantor was not assigned to this core for the report's rotation window")]
    BadGuarantorAssignment,
    #[error("a guarantor's ed25519 signature over the report does not verify")]
    BadGuarantorSignature,
    #[error("a package_spec.hash duplicates another guarantee in this block")]
    DuplicatePackageHash,
}
