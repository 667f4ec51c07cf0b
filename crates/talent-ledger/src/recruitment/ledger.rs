use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{
    ensure_within_rounds, Application, ApplicationStatus, Identified, Job, Person,
};
use super::error::{LedgerError, StatusViolation};
use super::store::EntityStore;

/// Application join records plus the cascades that keep them bound to the
/// entities in [`EntityStore`].
///
/// Only full-equality duplicates are rejected here. The stricter "one
/// application per person and job" rule belongs to the caller.
#[derive(Debug, Clone, Default)]
pub struct ApplicationLedger {
    entries: Vec<Application>,
}

impl ApplicationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, application: &Application) -> bool {
        self.position(application).is_some()
    }

    /// Stores `application` after rebinding it to the live store entries.
    pub fn add(
        &mut self,
        store: &EntityStore,
        application: Application,
    ) -> Result<Application, LedgerError> {
        if self.contains(&application) {
            return Err(LedgerError::DuplicateApplication);
        }

        let person = store.persons().find_same(application.person()).ok_or_else(|| {
            LedgerError::InvalidApplicationStatus(StatusViolation::UnknownPerson(
                application.person().phone.clone(),
            ))
        })?;
        let job = store.jobs().find_same(application.job()).ok_or_else(|| {
            LedgerError::InvalidApplicationStatus(StatusViolation::UnknownJob(
                application.job().title.clone(),
            ))
        })?;

        let bound = Application::bind(Arc::clone(person), Arc::clone(job), application.status())?;
        if bound != application && self.contains(&bound) {
            return Err(LedgerError::DuplicateApplication);
        }

        self.entries.push(bound.clone());
        Ok(bound)
    }

    /// Moves `application` forward by `rounds` and returns the replacement.
    pub fn advance(
        &mut self,
        application: &Application,
        rounds: i32,
    ) -> Result<Application, LedgerError> {
        let step = u32::try_from(rounds).map_err(|_| {
            LedgerError::IllegalArgument(format!(
                "cannot advance by a negative number of rounds ({rounds})"
            ))
        })?;
        let index = self
            .position(application)
            .ok_or(LedgerError::ApplicationNotFound)?;

        let target = u32::from(application.status().get()).saturating_add(step);
        let limit = application.job().rounds.get();
        let status = u8::try_from(target)
            .ok()
            .filter(|status| *status <= limit)
            .ok_or(LedgerError::InvalidApplicationStatus(
                StatusViolation::ExceedsRounds {
                    status: target,
                    rounds: limit,
                },
            ))?;

        let advanced = application.with_status(ApplicationStatus::new(status))?;
        if step > 0 && self.contains(&advanced) {
            return Err(LedgerError::DuplicateApplication);
        }

        self.entries[index] = advanced.clone();
        Ok(advanced)
    }

    pub fn remove(&mut self, application: &Application) -> Result<Application, LedgerError> {
        let index = self
            .position(application)
            .ok_or(LedgerError::ApplicationNotFound)?;
        Ok(self.entries.remove(index))
    }

    /// Rebinds every application of `old` to `new`. Returns the number rebound.
    pub fn on_person_replaced(&mut self, old: &Person, new: &Arc<Person>) -> usize {
        let mut rebound = 0;
        for entry in self.entries.iter_mut() {
            if entry.person().is_same(old) {
                *entry = entry.with_person(Arc::clone(new));
                rebound += 1;
            }
        }
        debug!(phone = %old.phone, rebound, "rebound applications to edited person");
        rebound
    }

    /// Checks that every application of `old` fits within `new.rounds`.
    pub fn validate_job_replacement(&self, old: &Job, new: &Job) -> Result<(), LedgerError> {
        self.entries
            .iter()
            .filter(|entry| entry.job().is_same(old))
            .try_for_each(|entry| ensure_within_rounds(u32::from(entry.status().get()), new))
    }

    /// Rebinds every application of `old` to `new`.
    ///
    /// All replacements are built before any is written, so a single
    /// application that no longer fits leaves the ledger untouched.
    pub fn on_job_replaced(&mut self, old: &Job, new: &Arc<Job>) -> Result<usize, LedgerError> {
        let rebuilt = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.job().is_same(old))
            .map(|(index, entry)| entry.with_job(Arc::clone(new)).map(|app| (index, app)))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| warn!(title = %old.title, %err, "job edit rejected by ledger"))?;

        let rebound = rebuilt.len();
        for (index, application) in rebuilt {
            self.entries[index] = application;
        }
        debug!(title = %old.title, rebound, "rebound applications to edited job");
        Ok(rebound)
    }

    /// Drops every application of `person` and returns them.
    pub fn on_person_removed(&mut self, person: &Person) -> Vec<Application> {
        self.extract(|entry| entry.person().is_same(person))
    }

    /// Drops every application of `job` and returns them.
    pub fn on_job_removed(&mut self, job: &Job) -> Vec<Application> {
        self.extract(|entry| entry.job().is_same(job))
    }

    pub fn by_person(&self, person: &Person) -> Vec<&Application> {
        self.entries
            .iter()
            .filter(|entry| entry.person().is_same(person))
            .collect()
    }

    pub fn by_job(&self, job: &Job) -> Vec<&Application> {
        self.entries
            .iter()
            .filter(|entry| entry.job().is_same(job))
            .collect()
    }

    pub fn by_person_and_job(&self, person: &Person, job: &Job) -> Option<&Application> {
        self.entries
            .iter()
            .find(|entry| entry.is_same_pair(person, job))
    }

    pub fn all(&self) -> &[Application] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, application: &Application) -> Option<usize> {
        self.entries.iter().position(|entry| entry == application)
    }

    fn extract<F>(&mut self, mut predicate: F) -> Vec<Application>
    where
        F: FnMut(&Application) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| predicate(entry));
        self.entries = kept;
        removed
    }
}
