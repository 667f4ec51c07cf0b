//! Consistency-preserving facade over the store, ledger, filters, and view state.
//!
//! Every mutation that touches more than one collection validates first and
//! writes second, so a failed call leaves the workspace exactly as it was.
//! The workspace is single-writer: surfaces that share it across threads must
//! hold one lock for the whole call (see [`super::router`]).

use std::sync::Arc;

use tracing::info;

use super::domain::{Application, ApplicationStatus, Identified, Job, JobTitle, Person, Phone};
use super::error::{LedgerError, StatusViolation};
use super::filter::FilterStack;
use super::history::CommandHistory;
use super::ledger::ApplicationLedger;
use super::status::{FilteredViews, StatusFilterCoordinator};
use super::store::EntityStore;
use super::view::{ViewGate, ViewState, ViewStateMachine};

#[derive(Debug, Default)]
pub struct Workspace {
    store: EntityStore,
    ledger: ApplicationLedger,
    views: FilteredViews,
    status_filter: StatusFilterCoordinator,
    view_state: ViewStateMachine,
    history: CommandHistory,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn ledger(&self) -> &ApplicationLedger {
        &self.ledger
    }

    // Persons

    pub fn add_person(&mut self, person: Person) -> Result<Arc<Person>, LedgerError> {
        person.validate()?;
        let added = self.store.persons_mut().add(person)?;
        info!(phone = %added.phone, "person added");
        Ok(added)
    }

    pub fn replace_person(
        &mut self,
        target: &Person,
        edited: Person,
    ) -> Result<Arc<Person>, LedgerError> {
        edited.validate()?;
        let replacement = self.store.persons_mut().replace(target, edited)?;
        let rebound = self.ledger.on_person_replaced(target, &replacement);
        self.refresh_status_scope();
        info!(phone = %replacement.phone, rebound, "person replaced");
        Ok(replacement)
    }

    /// Removes `target` and every application that references it.
    pub fn remove_person(&mut self, target: &Person) -> Result<Vec<Application>, LedgerError> {
        if !self.store.persons().contains(target) {
            return Err(LedgerError::EntityNotFound(Person::KIND));
        }
        let removed = self.ledger.on_person_removed(target);
        self.store.persons_mut().remove(target)?;
        self.refresh_status_scope();
        info!(phone = %target.phone, applications = removed.len(), "person removed");
        Ok(removed)
    }

    pub fn find_person(&self, phone: &Phone) -> Option<&Arc<Person>> {
        self.store.persons().find(phone)
    }

    // Jobs

    pub fn add_job(&mut self, job: Job) -> Result<Arc<Job>, LedgerError> {
        let added = self.store.jobs_mut().add(job)?;
        info!(title = %added.title, rounds = added.rounds.get(), "job added");
        Ok(added)
    }

    /// Replaces `target`, rejecting the edit outright when any application
    /// would exceed the new round count.
    pub fn replace_job(&mut self, target: &Job, edited: Job) -> Result<Arc<Job>, LedgerError> {
        self.ledger.validate_job_replacement(target, &edited)?;
        let replacement = self.store.jobs_mut().replace(target, edited)?;
        let rebound = self.ledger.on_job_replaced(target, &replacement)?;
        self.refresh_status_scope();
        info!(title = %replacement.title, rebound, "job replaced");
        Ok(replacement)
    }

    /// Removes `target` and every application that references it.
    pub fn remove_job(&mut self, target: &Job) -> Result<Vec<Application>, LedgerError> {
        if !self.store.jobs().contains(target) {
            return Err(LedgerError::EntityNotFound(Job::KIND));
        }
        let removed = self.ledger.on_job_removed(target);
        self.store.jobs_mut().remove(target)?;
        self.refresh_status_scope();
        info!(title = %target.title, applications = removed.len(), "job removed");
        Ok(removed)
    }

    pub fn find_job(&self, title: &JobTitle) -> Option<&Arc<Job>> {
        self.store.jobs().find(title)
    }

    // Applications

    /// Builds an application bound to the live person and job with these keys.
    pub fn resolve_application(
        &self,
        phone: &Phone,
        title: &JobTitle,
        status: ApplicationStatus,
    ) -> Result<Application, LedgerError> {
        let person = self.find_person(phone).ok_or_else(|| {
            LedgerError::InvalidApplicationStatus(StatusViolation::UnknownPerson(phone.clone()))
        })?;
        let job = self.find_job(title).ok_or_else(|| {
            LedgerError::InvalidApplicationStatus(StatusViolation::UnknownJob(title.clone()))
        })?;
        Application::bind(Arc::clone(person), Arc::clone(job), status)
    }

    /// Ledger-level add: rejects only fully equal duplicates.
    pub fn add_application(
        &mut self,
        application: Application,
    ) -> Result<Application, LedgerError> {
        let added = self.ledger.add(&self.store, application)?;
        self.refresh_status_scope();
        info!(application = %added, "application added");
        Ok(added)
    }

    /// Command-level add: additionally rejects a second application for a
    /// person and job pair that already has one, at any status.
    pub fn submit_application(
        &mut self,
        phone: &Phone,
        title: &JobTitle,
        status: ApplicationStatus,
    ) -> Result<Application, LedgerError> {
        let application = self.resolve_application(phone, title, status)?;
        if self
            .ledger
            .by_person_and_job(application.person(), application.job())
            .is_some()
        {
            return Err(LedgerError::DuplicateApplication);
        }
        self.add_application(application)
    }

    pub fn advance_application(
        &mut self,
        application: &Application,
        rounds: i32,
    ) -> Result<Application, LedgerError> {
        let advanced = self.ledger.advance(application, rounds)?;
        self.refresh_status_scope();
        info!(application = %advanced, "application advanced");
        Ok(advanced)
    }

    pub fn remove_application(
        &mut self,
        application: &Application,
    ) -> Result<Application, LedgerError> {
        let removed = self.ledger.remove(application)?;
        self.refresh_status_scope();
        info!(application = %removed, "application removed");
        Ok(removed)
    }

    pub fn find_application(&self, phone: &Phone, title: &JobTitle) -> Option<&Application> {
        self.ledger
            .all()
            .iter()
            .find(|application| {
                &application.person().phone == phone && &application.job().title == title
            })
    }

    // Read projections

    pub fn all_persons(&self) -> &[Arc<Person>] {
        self.store.persons().all()
    }

    pub fn all_jobs(&self) -> &[Arc<Job>] {
        self.store.jobs().all()
    }

    pub fn all_applications(&self) -> &[Application] {
        self.ledger.all()
    }

    pub fn filtered_persons(&self) -> impl Iterator<Item = &Arc<Person>> + '_ {
        self.views.persons.view(self.store.persons().all())
    }

    pub fn filtered_jobs(&self) -> impl Iterator<Item = &Arc<Job>> + '_ {
        self.views.jobs.view(self.store.jobs().all())
    }

    pub fn filtered_applications(&self) -> impl Iterator<Item = &Application> + '_ {
        self.views.applications.view(self.ledger.all())
    }

    pub fn applications_by_job(&self, job: &Job) -> Vec<&Application> {
        self.ledger.by_job(job)
    }

    pub fn applications_by_person(&self, person: &Person) -> Vec<&Application> {
        self.ledger.by_person(person)
    }

    pub fn filtered_applications_by_job(&self, job: &Job) -> Vec<&Application> {
        self.status_filter.by_job_filtered(&self.ledger, job)
    }

    pub fn filtered_applications_by_person(&self, person: &Person) -> Vec<&Application> {
        self.status_filter.by_person_filtered(&self.ledger, person)
    }

    // Filters

    pub fn push_person_filter<P>(&mut self, predicate: P)
    where
        P: Fn(&Person) -> bool + Send + Sync + 'static,
    {
        self.views.persons.push(predicate);
    }

    pub fn push_job_filter<P>(&mut self, predicate: P)
    where
        P: Fn(&Job) -> bool + Send + Sync + 'static,
    {
        self.views.jobs.push(predicate);
    }

    pub fn push_application_filter<P>(&mut self, predicate: P)
    where
        P: Fn(&Application) -> bool + Send + Sync + 'static,
    {
        self.views.applications.push(predicate);
    }

    pub fn person_filter(&self) -> &FilterStack<Person> {
        &self.views.persons
    }

    pub fn job_filter(&self) -> &FilterStack<Job> {
        &self.views.jobs
    }

    pub fn application_filter(&self) -> &FilterStack<Application> {
        &self.views.applications
    }

    /// Records the status filter without touching the views.
    pub fn set_status_filter(&mut self, status: Option<ApplicationStatus>) {
        self.status_filter.set_status(status);
    }

    pub fn apply_status_filter(&mut self) {
        self.status_filter
            .apply(&mut self.views, self.ledger.all());
    }

    /// Records and applies `status` in one step, leaving any detail view
    /// for `JobView` first.
    pub fn filter_by_status(&mut self, status: ApplicationStatus) {
        self.clear_detail_view();
        self.set_status_filter(Some(status));
        self.apply_status_filter();
        info!(%status, "status filter applied");
    }

    /// Drops the status filter and every stacked predicate.
    pub fn clear_status_filter(&mut self) {
        self.status_filter.clear(&mut self.views);
        info!("filters cleared");
    }

    pub fn status_filter(&self) -> Option<ApplicationStatus> {
        self.status_filter.status()
    }

    // Job and person membership follow the ledger while a status is applied.
    fn refresh_status_scope(&mut self) {
        self.status_filter
            .refresh(&mut self.views, self.ledger.all());
    }

    // View state

    pub fn view_state(&self) -> ViewState {
        self.view_state.current()
    }

    pub fn set_view_state(&mut self, state: ViewState) {
        self.view_state.set(state);
    }

    pub fn toggle_view_state(&mut self) -> ViewState {
        self.view_state.toggle()
    }

    /// Returns to `JobView` from either detail view. Reports whether the
    /// state changed.
    pub fn clear_detail_view(&mut self) -> bool {
        let cleared = self.view_state.clear_detail();
        if cleared {
            info!(state = %self.view_state.current(), "detail view cleared");
        }
        cleared
    }

    pub fn is_job_family(&self) -> bool {
        self.view_state.is_job_family()
    }

    pub fn require_view(&self, gate: ViewGate) -> Result<(), LedgerError> {
        self.view_state.require(gate)
    }

    // History

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }
}
