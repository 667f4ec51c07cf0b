use std::sync::Arc;

use super::common::*;

use crate::recruitment::error::{LedgerError, StatusViolation};
use crate::recruitment::ledger::ApplicationLedger;

#[test]
fn add_rebinds_to_live_store_entries() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();

    let added = ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("add succeeds");

    let live = store.persons().find(&alice().phone).expect("alice stored");
    assert!(Arc::ptr_eq(added.person(), live));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn add_rejects_equal_application() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("first add");

    let result = ledger.add(&store, application(alice(), backend(), 1));

    assert_eq!(result, Err(LedgerError::DuplicateApplication));
}

#[test]
fn ledger_accepts_same_pair_at_different_status() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("first add");

    ledger
        .add(&store, application(alice(), backend(), 2))
        .expect("ledger only guards full equality");

    assert_eq!(ledger.len(), 2);
}

#[test]
fn add_rejects_unknown_person_or_job() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();

    let unknown_person = ledger.add(&store, application(carol(), backend(), 0));
    let unknown_job = ledger.add(&store, application(alice(), job("Designer", 4), 0));

    assert_eq!(
        unknown_person,
        Err(LedgerError::InvalidApplicationStatus(
            StatusViolation::UnknownPerson(carol().phone)
        ))
    );
    assert!(matches!(
        unknown_job,
        Err(LedgerError::InvalidApplicationStatus(StatusViolation::UnknownJob(_)))
    ));
    assert!(ledger.is_empty());
}

#[test]
fn binding_rejects_status_beyond_rounds() {
    let result = crate::recruitment::domain::Application::bind(
        Arc::new(alice()),
        Arc::new(frontend()),
        status(3),
    );

    assert_eq!(
        result,
        Err(LedgerError::InvalidApplicationStatus(
            StatusViolation::ExceedsRounds {
                status: 3,
                rounds: 2
            }
        ))
    );
}

#[test]
fn advance_stays_within_rounds() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    let mut current = ledger
        .add(&store, application(alice(), backend(), 0))
        .expect("add");

    for expected in 1..=3 {
        current = ledger.advance(&current, 1).expect("advance");
        assert_eq!(current.status().get(), expected);
        assert!(current.status().get() <= current.job().rounds.get());
    }

    let result = ledger.advance(&current, 1);
    assert!(matches!(
        result,
        Err(LedgerError::InvalidApplicationStatus(
            StatusViolation::ExceedsRounds { status: 4, rounds: 3 }
        ))
    ));
    assert_eq!(ledger.all(), [current]);
}

#[test]
fn advance_rejects_negative_rounds_and_missing_application() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    let stored = ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("add");

    assert!(matches!(
        ledger.advance(&stored, -1),
        Err(LedgerError::IllegalArgument(_))
    ));
    assert_eq!(
        ledger.advance(&application(bob(), backend(), 1), 1),
        Err(LedgerError::ApplicationNotFound)
    );
    assert_eq!(ledger.all()[0].status().get(), 1);
}

#[test]
fn advance_by_zero_returns_same_application() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    let stored = ledger
        .add(&store, application(bob(), frontend(), 2))
        .expect("add");

    let unchanged = ledger.advance(&stored, 0).expect("zero step");

    assert_eq!(unchanged, stored);
}

#[test]
fn job_edit_below_existing_status_is_rejected_atomically() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("alice");
    ledger
        .add(&store, application(bob(), backend(), 2))
        .expect("bob");
    let before = ledger.all().to_vec();

    let shrunk = Arc::new(job("Backend", 1));
    assert!(ledger.validate_job_replacement(&backend(), &shrunk).is_err());
    let result = ledger.on_job_replaced(&backend(), &shrunk);

    assert!(matches!(
        result,
        Err(LedgerError::InvalidApplicationStatus(
            StatusViolation::ExceedsRounds { status: 2, rounds: 1 }
        ))
    ));
    assert_eq!(ledger.all(), before.as_slice());
}

#[test]
fn job_edit_rebinds_every_application_of_the_job() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("alice");
    ledger
        .add(&store, application(alice(), frontend(), 1))
        .expect("frontend");

    let renamed = Arc::new(job("Platform", 4));
    let rebound = ledger
        .on_job_replaced(&backend(), &renamed)
        .expect("edit fits");

    assert_eq!(rebound, 1);
    assert!(Arc::ptr_eq(ledger.all()[0].job(), &renamed));
    assert_eq!(ledger.all()[1].job().title, frontend().title);
}

#[test]
fn person_edit_rebinds_applications() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("alice");

    let mut edited = alice();
    edited.name = "Alice Tan".to_string();
    let edited = Arc::new(edited);

    assert_eq!(ledger.on_person_replaced(&alice(), &edited), 1);
    assert_eq!(ledger.all()[0].person().name, "Alice Tan");
    assert_eq!(ledger.all()[0].status().get(), 1);
}

#[test]
fn removing_entity_drops_only_its_applications() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    for (candidate, opening) in [
        (alice(), backend()),
        (alice(), frontend()),
        (bob(), backend()),
    ] {
        ledger
            .add(&store, application(candidate, opening, 0))
            .expect("add");
    }

    let removed = ledger.on_person_removed(&alice());

    assert_eq!(removed.len(), 2);
    assert!(ledger.by_person(&alice()).is_empty());
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.all()[0].person().name, "Bob");

    let removed = ledger.on_job_removed(&frontend());
    assert!(removed.is_empty());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn projections_cover_the_whole_ledger() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("alice");
    ledger
        .add(&store, application(bob(), backend(), 2))
        .expect("bob");

    assert_eq!(ledger.by_job(&backend()).len(), 2);
    assert_eq!(ledger.by_person(&bob()).len(), 1);
    assert!(ledger.by_person_and_job(&bob(), &frontend()).is_none());
    assert_eq!(
        ledger
            .by_person_and_job(&bob(), &backend())
            .map(|application| application.status().get()),
        Some(2)
    );
}

#[test]
fn remove_requires_stored_application() {
    let store = seeded_store();
    let mut ledger = ApplicationLedger::new();
    let stored = ledger
        .add(&store, application(alice(), backend(), 1))
        .expect("add");

    assert_eq!(
        ledger.remove(&application(alice(), backend(), 2)),
        Err(LedgerError::ApplicationNotFound)
    );
    assert_eq!(ledger.remove(&stored), Ok(stored));
    assert!(ledger.is_empty());
}
