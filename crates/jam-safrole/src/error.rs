use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SafroleError {
    #[error("ticket extrinsic submitted after the epoch's ticket submission window closed")]
    UnexpectedTicket,
    #[error("ticket attempt number is not below max_ticket_entries_per_validator")]
    BadTicketAttempt,
    #[error("ticket extrinsic carries more envelopes than epoch_length")]
    TooManyTicketsInExtrinsic,
    #[error("ring-VRF proof does not verify for a submitted ticket")]
    BadTicketProof,
    #[error("ticket ids within the extrinsic are not strictly increasing")]
    BadTicketOrder,
    #[error("ticket id already present in the accumulator or extrinsic")]
    DuplicateTicket,
}
