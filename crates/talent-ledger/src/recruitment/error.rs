use super::domain::{DomainError, EntityKind, JobTitle, Phone};
use super::view::{ViewGate, ViewState};

/// Failures raised by store, ledger, and view-state operations.
///
/// Every variant aborts the operation that raised it; nothing is committed
/// for a failed call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("{0} already exists")]
    DuplicateEntity(EntityKind),
    #[error("{0} not found")]
    EntityNotFound(EntityKind),
    #[error("application already exists")]
    DuplicateApplication,
    #[error("application not found")]
    ApplicationNotFound,
    #[error("invalid application status: {0}")]
    InvalidApplicationStatus(StatusViolation),
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    #[error("this command is only available in {required}, current view is {current}")]
    WrongView {
        required: ViewGate,
        current: ViewState,
    },
    #[error(transparent)]
    InvalidValue(#[from] DomainError),
}

/// Reason an application status could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusViolation {
    #[error("status {status} exceeds the {rounds} rounds of the job")]
    ExceedsRounds { status: u32, rounds: u8 },
    #[error("no person with phone {0}")]
    UnknownPerson(Phone),
    #[error("no job titled '{0}'")]
    UnknownJob(JobTitle),
}
