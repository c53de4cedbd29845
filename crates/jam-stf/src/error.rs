use thiserror::Error;

use jam_accumulate::AccumulateError;
use jam_assurances::AssurancesError;
use jam_disputes::DisputesError;
use jam_reports::ReportsError;
use jam_safrole::SafroleError;

/// Every way a block can fail the state transition (spec.md §7), plus the
/// header-level checks the orchestrator itself owns: slot monotonicity and
/// the epoch/tickets marks a header must carry at an epoch boundary (and
/// must not carry otherwise).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StfError {
    #[error("header.slot is not strictly greater than the pre-state's tau")]
    BadSlot,
    #[error("header.author_index is not below validators_count")]
    BadAuthorIndex,
    #[error("header epoch_mark is missing, present when it should not be, or does not match the computed value")]
    BadEpochMark,
    #[error("header tickets_mark is missing, present when it should not be, or does not match the computed sealing-key sequence")]
    BadTicketsMark,
    #[error(transparent)]
    Safrole(#[from] SafroleError),
    #[error(transparent)]
    Disputes(#[from] DisputesError),
    #[error(transparent)]
    Reports(#[from] ReportsError),
    #[error(transparent)]
    Assurances(#[from] AssurancesError),
    #[error(transparent)]
    Accumulate(#[from] AccumulateError),
}
