//! Recruitment workspace: candidates, openings, and the applications that
//! bind them, with filtered projections and a view-state machine.

pub mod domain;
pub mod error;
pub mod filter;
pub mod history;
pub mod ledger;
pub mod router;
pub mod sample;
pub mod search;
pub mod status;
pub mod store;
pub mod view;
pub mod workspace;

#[cfg(test)]
mod tests;

pub use domain::{
    skill_set, Application, ApplicationStatus, ApplicationView, DomainError, EntityKind,
    Identified, Job, JobRounds, JobTitle, Person, Phone, Skill, MAX_JOB_ROUNDS,
};
pub use error::{LedgerError, StatusViolation};
pub use filter::{FilterStack, Predicate};
pub use history::CommandHistory;
pub use ledger::ApplicationLedger;
pub use router::{recruitment_router, shared, SharedWorkspace};
pub use search::KeywordQuery;
pub use status::{FilteredViews, StatusFilterCoordinator};
pub use store::{EntityList, EntityStore};
pub use view::{ViewGate, ViewState, ViewStateMachine};
pub use workspace::Workspace;
