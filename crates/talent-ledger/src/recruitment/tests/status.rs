use super::common::*;

use crate::recruitment::domain::Application;
use crate::recruitment::status::StatusFilterCoordinator;
use crate::recruitment::view::ViewState;

#[test]
fn set_status_records_without_filtering() {
    let mut workspace = recruiting_workspace();

    workspace.set_status_filter(Some(status(2)));

    assert_eq!(workspace.status_filter(), Some(status(2)));
    assert!(!workspace.application_filter().is_filtered());
    assert_eq!(workspace.filtered_applications().count(), 3);
}

#[test]
fn applied_status_hides_entities_without_matching_applications() {
    let mut workspace = recruiting_workspace();

    workspace.filter_by_status(status(2));

    assert!(workspace
        .filtered_applications()
        .all(|application| application.status() == status(2)));
    assert_eq!(workspace.filtered_applications().count(), 2);
    assert_eq!(titles(workspace.filtered_jobs()), ["Backend", "Frontend"]);
    assert_eq!(names(workspace.filtered_persons()), ["Alice", "Bob"]);

    for person in workspace.filtered_persons() {
        let matching = workspace
            .applications_by_person(person)
            .into_iter()
            .filter(|application| application.status() == status(2))
            .count();
        assert!(matching > 0, "{} has no status 2 application", person.name);
    }
}

#[test]
fn status_with_single_match_narrows_jobs_and_persons() {
    let mut workspace = recruiting_workspace();

    workspace.filter_by_status(status(1));

    assert_eq!(titles(workspace.filtered_jobs()), ["Backend"]);
    assert_eq!(names(workspace.filtered_persons()), ["Alice"]);
}

#[test]
fn status_without_matches_empties_every_view() {
    let mut workspace = recruiting_workspace();

    workspace.filter_by_status(status(3));

    assert_eq!(workspace.filtered_applications().count(), 0);
    assert_eq!(workspace.filtered_jobs().count(), 0);
    assert_eq!(workspace.filtered_persons().count(), 0);
}

#[test]
fn clearing_restores_pre_filter_views_in_order() {
    let mut workspace = recruiting_workspace();
    let persons_before = names(workspace.filtered_persons());
    let jobs_before = titles(workspace.filtered_jobs());
    let applications_before: Vec<Application> =
        workspace.filtered_applications().cloned().collect();

    workspace.set_status_filter(Some(status(1)));
    workspace.apply_status_filter();
    workspace.clear_status_filter();

    assert_eq!(workspace.status_filter(), None);
    assert_eq!(names(workspace.filtered_persons()), persons_before);
    assert_eq!(titles(workspace.filtered_jobs()), jobs_before);
    let applications_after: Vec<Application> =
        workspace.filtered_applications().cloned().collect();
    assert_eq!(applications_after, applications_before);
}

#[test]
fn applying_without_status_resets_the_views() {
    let mut workspace = recruiting_workspace();
    workspace.filter_by_status(status(2));

    workspace.set_status_filter(None);
    workspace.apply_status_filter();

    assert!(!workspace.person_filter().is_filtered());
    assert!(!workspace.job_filter().is_filtered());
    assert_eq!(workspace.filtered_applications().count(), 3);
}

#[test]
fn status_composes_with_an_earlier_keyword_filter() {
    let mut workspace = recruiting_workspace();
    workspace.push_person_filter(|person| person.name == "Bob");

    workspace.filter_by_status(status(2));

    assert_eq!(names(workspace.filtered_persons()), ["Bob"]);
    assert_eq!(workspace.person_filter().depth(), 2);
}

#[test]
fn filtered_projections_narrow_by_stored_status() {
    let mut workspace = recruiting_workspace();
    workspace.set_status_filter(Some(status(2)));

    let by_job = workspace.filtered_applications_by_job(&backend());
    let by_person = workspace.filtered_applications_by_person(&alice());

    assert_eq!(by_job.len(), 1);
    assert_eq!(by_job[0].person().name, "Bob");
    assert_eq!(by_person.len(), 1);
    assert_eq!(by_person[0].job().title, frontend().title);
    assert_eq!(workspace.applications_by_job(&backend()).len(), 2);
}

#[test]
fn coordinator_without_status_admits_everything() {
    let coordinator = StatusFilterCoordinator::new();
    let candidate = application(alice(), backend(), 3);

    assert!(coordinator.admits(&candidate));
}

#[test]
fn second_status_replaces_the_first() {
    let mut workspace = recruiting_workspace();

    workspace.filter_by_status(status(2));
    workspace.filter_by_status(status(1));

    assert_eq!(workspace.status_filter(), Some(status(1)));
    let visible: Vec<Application> = workspace.filtered_applications().cloned().collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].person().name, "Alice");
    assert_eq!(titles(workspace.filtered_jobs()), ["Backend"]);
    assert_eq!(names(workspace.filtered_persons()), ["Alice"]);
    assert_eq!(workspace.application_filter().depth(), 1);

    let by_job: Vec<Application> = workspace
        .filtered_applications_by_job(&backend())
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(by_job, visible);
}

#[test]
fn restatus_keeps_keyword_predicates() {
    let mut workspace = recruiting_workspace();
    workspace.push_person_filter(|person| person.name == "Alice");

    workspace.filter_by_status(status(1));
    workspace.filter_by_status(status(2));

    assert_eq!(names(workspace.filtered_persons()), ["Alice"]);
    assert_eq!(workspace.person_filter().depth(), 2);
}

#[test]
fn membership_follows_advances_under_an_applied_status() {
    let mut workspace = recruiting_workspace();
    workspace.filter_by_status(status(2));
    let bob_backend = workspace
        .find_application(&bob().phone, &backend().title)
        .cloned()
        .expect("bob applied to backend");

    workspace
        .advance_application(&bob_backend, 1)
        .expect("bob advances");

    assert_eq!(titles(workspace.filtered_jobs()), ["Frontend"]);
    assert_eq!(names(workspace.filtered_persons()), ["Alice"]);
    for job in workspace.filtered_jobs() {
        assert!(
            !workspace.filtered_applications_by_job(job).is_empty(),
            "{} has no status 2 application",
            job.title
        );
    }
}

#[test]
fn membership_follows_added_and_removed_applications() {
    let mut workspace = recruiting_workspace();
    workspace.filter_by_status(status(1));

    let carol_frontend = workspace
        .submit_application(&carol().phone, &frontend().title, status(1))
        .expect("carol applies");
    assert_eq!(titles(workspace.filtered_jobs()), ["Backend", "Frontend"]);
    assert_eq!(names(workspace.filtered_persons()), ["Alice", "Carol"]);

    workspace
        .remove_application(&carol_frontend)
        .expect("carol withdraws");
    assert_eq!(titles(workspace.filtered_jobs()), ["Backend"]);
    assert_eq!(names(workspace.filtered_persons()), ["Alice"]);
}

#[test]
fn recorded_status_is_not_applied_by_ledger_changes() {
    let mut workspace = recruiting_workspace();
    workspace.set_status_filter(Some(status(1)));

    workspace
        .submit_application(&carol().phone, &backend().title, status(1))
        .expect("carol applies");

    assert!(!workspace.job_filter().is_filtered());
    assert_eq!(workspace.filtered_applications().count(), 4);
}

#[test]
fn filtering_leaves_detail_views_for_job_view() {
    let mut workspace = recruiting_workspace();
    workspace.set_view_state(ViewState::JobDetailView);

    workspace.filter_by_status(status(2));

    assert_eq!(workspace.view_state(), ViewState::JobView);
}
