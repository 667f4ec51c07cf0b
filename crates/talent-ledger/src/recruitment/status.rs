use std::collections::HashSet;

use tracing::debug;

use super::domain::{Application, ApplicationStatus, Job, JobTitle, Person, Phone};
use super::filter::FilterStack;
use super::ledger::ApplicationLedger;

/// The three filter stacks projected over persons, jobs, and applications.
#[derive(Debug, Default)]
pub struct FilteredViews {
    pub persons: FilterStack<Person>,
    pub jobs: FilterStack<Job>,
    pub applications: FilterStack<Application>,
}

impl FilteredViews {
    pub fn clear(&mut self) {
        self.persons.clear();
        self.jobs.clear();
        self.applications.clear();
    }
}

/// Single active status filter, fanned out into consistent filter stacks.
///
/// The status lives in the scope slot of each stack, so a second status
/// replaces the first and pushed keyword predicates survive either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusFilterCoordinator {
    status: Option<ApplicationStatus>,
    applied: Option<ApplicationStatus>,
}

impl StatusFilterCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the status only; call [`Self::apply`] to narrow the views.
    pub fn set_status(&mut self, status: Option<ApplicationStatus>) {
        self.status = status;
    }

    pub fn status(&self) -> Option<ApplicationStatus> {
        self.status
    }

    /// Status currently narrowing the views, if any.
    pub fn applied(&self) -> Option<ApplicationStatus> {
        self.applied
    }

    /// Narrows the views to the stored status, or resets them when unset.
    ///
    /// Jobs and persons are derived from the applications left visible after
    /// the status scope is installed, so the three views agree on which
    /// entities carry the status.
    pub fn apply(&mut self, views: &mut FilteredViews, applications: &[Application]) {
        self.applied = self.status;
        match self.status {
            Some(status) => scope_to(status, views, applications),
            None => views.clear(),
        }
    }

    /// Re-derives job and person membership for the applied status after the
    /// ledger changed. Does nothing while no status is applied.
    pub fn refresh(&self, views: &mut FilteredViews, applications: &[Application]) {
        if let Some(status) = self.applied {
            scope_to(status, views, applications);
        }
    }

    pub fn clear(&mut self, views: &mut FilteredViews) {
        self.status = None;
        self.applied = None;
        views.clear();
    }

    pub fn admits(&self, application: &Application) -> bool {
        self.status
            .is_none_or(|status| application.status() == status)
    }

    pub fn by_job_filtered<'a>(
        &self,
        ledger: &'a ApplicationLedger,
        job: &Job,
    ) -> Vec<&'a Application> {
        ledger
            .by_job(job)
            .into_iter()
            .filter(|application| self.admits(application))
            .collect()
    }

    pub fn by_person_filtered<'a>(
        &self,
        ledger: &'a ApplicationLedger,
        person: &Person,
    ) -> Vec<&'a Application> {
        ledger
            .by_person(person)
            .into_iter()
            .filter(|application| self.admits(application))
            .collect()
    }
}

fn scope_to(status: ApplicationStatus, views: &mut FilteredViews, applications: &[Application]) {
    views
        .applications
        .set_scope(move |application: &Application| application.status() == status);

    let mut titles: HashSet<JobTitle> = HashSet::new();
    let mut phones: HashSet<Phone> = HashSet::new();
    for application in views.applications.view(applications) {
        titles.insert(application.job().title.clone());
        phones.insert(application.person().phone.clone());
    }
    debug!(%status, jobs = titles.len(), persons = phones.len(), "scoped views to status");

    views.jobs.set_scope(move |job: &Job| titles.contains(&job.title));
    views
        .persons
        .set_scope(move |person: &Person| phones.contains(&person.phone));
}
