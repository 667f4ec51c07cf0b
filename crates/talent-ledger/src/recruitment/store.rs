use std::sync::Arc;

use super::domain::{Identified, Job, Person};
use super::error::LedgerError;

/// Insertion-ordered collection that rejects entries sharing an identity.
///
/// Entries are handed out as `Arc`s so applications can bind to the live
/// instance without copying it. Nothing here cascades; dependants are the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct EntityList<T> {
    entries: Vec<Arc<T>>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> EntityList<T>
where
    T: Identified + PartialEq,
{
    /// Identity-based containment.
    pub fn has(&self, entity: &T) -> bool {
        self.entries.iter().any(|entry| entry.is_same(entity))
    }

    /// Full structural containment.
    pub fn contains(&self, entity: &T) -> bool {
        self.position(entity).is_some()
    }

    pub fn find(&self, key: &T::Key) -> Option<&Arc<T>> {
        self.entries.iter().find(|entry| entry.identity() == key)
    }

    pub fn find_same(&self, entity: &T) -> Option<&Arc<T>> {
        self.find(entity.identity())
    }

    pub fn add(&mut self, entity: T) -> Result<Arc<T>, LedgerError> {
        if self.has(&entity) {
            return Err(LedgerError::DuplicateEntity(T::KIND));
        }
        let entry = Arc::new(entity);
        self.entries.push(Arc::clone(&entry));
        Ok(entry)
    }

    /// Swaps `target` for `edited` at the same position.
    ///
    /// `edited` may keep the identity of `target`; it may not take the
    /// identity of any other entry.
    pub fn replace(&mut self, target: &T, edited: T) -> Result<Arc<T>, LedgerError> {
        let index = self
            .position(target)
            .ok_or(LedgerError::EntityNotFound(T::KIND))?;

        let collides = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, entry)| i != index && entry.is_same(&edited));
        if collides {
            return Err(LedgerError::DuplicateEntity(T::KIND));
        }

        let entry = Arc::new(edited);
        self.entries[index] = Arc::clone(&entry);
        Ok(entry)
    }

    pub fn remove(&mut self, entity: &T) -> Result<Arc<T>, LedgerError> {
        let index = self
            .position(entity)
            .ok_or(LedgerError::EntityNotFound(T::KIND))?;
        Ok(self.entries.remove(index))
    }

    pub fn all(&self) -> &[Arc<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, entity: &T) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.as_ref() == entity)
    }
}

/// Source of truth for persons and jobs.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    persons: EntityList<Person>,
    jobs: EntityList<Job>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persons(&self) -> &EntityList<Person> {
        &self.persons
    }

    pub fn jobs(&self) -> &EntityList<Job> {
        &self.jobs
    }

    pub fn persons_mut(&mut self) -> &mut EntityList<Person> {
        &mut self.persons
    }

    pub fn jobs_mut(&mut self) -> &mut EntityList<Job> {
        &mut self.jobs
    }
}
