use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{LedgerError, StatusViolation};

/// Upper bound on the number of interview rounds a job may declare.
pub const MAX_JOB_ROUNDS: u8 = 10;

/// Validation failures raised while constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("phone numbers should only contain digits and be at least 3 digits long, got '{0}'")]
    InvalidPhone(String),
    #[error("job titles should only contain alphanumeric characters and spaces, and must not be blank, got '{0}'")]
    InvalidJobTitle(String),
    #[error("job rounds must be between 1 and {max}, got {0}", max = MAX_JOB_ROUNDS)]
    InvalidJobRounds(u8),
    #[error("skill names should be alphanumeric with '.' and '/' allowed, got '{0}'")]
    InvalidSkill(String),
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("application status should be a non-negative integer, got '{0}'")]
    InvalidStatus(String),
}

/// The two entity collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Person,
    Job,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Job => "job",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Uniqueness rule for store entries.
///
/// Two entries with the same identity key are "the same" entity even when the
/// remaining fields differ; full structural equality stays on `PartialEq`.
pub trait Identified {
    type Key: Eq + Hash + Clone + fmt::Debug;

    const KIND: EntityKind;

    fn identity(&self) -> &Self::Key;

    fn is_same(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.len() >= 3 && value.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidPhone(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobTitle(String);

impl JobTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let mut chars = value.chars();
        let leads_alphanumeric = chars.next().is_some_and(char::is_alphanumeric);
        if leads_alphanumeric && chars.all(|c| c.is_alphanumeric() || c == ' ') {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidJobTitle(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JobTitle {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JobTitle> for String {
    fn from(value: JobTitle) -> Self {
        value.0
    }
}

impl fmt::Display for JobTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of interview rounds a job runs, in `1..=MAX_JOB_ROUNDS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct JobRounds(u8);

impl JobRounds {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (1..=MAX_JOB_ROUNDS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidJobRounds(value))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for JobRounds {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JobRounds> for u8 {
    fn from(value: JobRounds) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Skill(String);

impl Skill {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_alphanumeric() || c == '.' || c == '/');
        if valid {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidSkill(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Skill {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Skill> for String {
    fn from(value: Skill) -> Self {
        value.0
    }
}

/// Builds a skill set from raw names, rejecting the first invalid entry.
pub fn skill_set<I, S>(names: I) -> Result<BTreeSet<Skill>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Skill::new).collect()
}

/// Interview round an application has completed; `0` means applied only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationStatus(u8);

impl ApplicationStatus {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidStatus(raw.to_string()));
        }
        trimmed
            .parse::<u8>()
            .map(Self)
            .map_err(|_| DomainError::InvalidStatus(raw.to_string()))
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Candidate tracked by the store. Identity is the phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub phone: Phone,
    pub email: String,
    pub address: String,
    pub school: String,
    pub degree: String,
    #[serde(default)]
    pub skills: BTreeSet<Skill>,
}

impl Person {
    /// Rejects blank free-text fields; typed fields validate on construction.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
            ("school", &self.school),
            ("degree", &self.degree),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(DomainError::BlankField { field: *field }),
            None => Ok(()),
        }
    }
}

impl Identified for Person {
    type Key = Phone;

    const KIND: EntityKind = EntityKind::Person;

    fn identity(&self) -> &Phone {
        &self.phone
    }
}

/// Job opening tracked by the store. Identity is the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: JobTitle,
    pub rounds: JobRounds,
    #[serde(default)]
    pub skills: BTreeSet<Skill>,
}

impl Identified for Job {
    type Key = JobTitle;

    const KIND: EntityKind = EntityKind::Job;

    fn identity(&self) -> &JobTitle {
        &self.title
    }
}

/// Join record binding a live person and job with interview progress.
///
/// Instances are never edited: status changes and cascades build a fresh
/// value through the `with_*` constructors and swap it into the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    person: Arc<Person>,
    job: Arc<Job>,
    status: ApplicationStatus,
}

impl Application {
    /// Binds to the given entities, enforcing `status <= job.rounds`.
    pub fn bind(
        person: Arc<Person>,
        job: Arc<Job>,
        status: ApplicationStatus,
    ) -> Result<Self, LedgerError> {
        ensure_within_rounds(u32::from(status.get()), &job)?;
        Ok(Self {
            person,
            job,
            status,
        })
    }

    pub fn person(&self) -> &Arc<Person> {
        &self.person
    }

    pub fn job(&self) -> &Arc<Job> {
        &self.job
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn with_person(&self, person: Arc<Person>) -> Self {
        Self {
            person,
            job: Arc::clone(&self.job),
            status: self.status,
        }
    }

    pub fn with_job(&self, job: Arc<Job>) -> Result<Self, LedgerError> {
        Self::bind(Arc::clone(&self.person), job, self.status)
    }

    pub fn with_status(&self, status: ApplicationStatus) -> Result<Self, LedgerError> {
        Self::bind(Arc::clone(&self.person), Arc::clone(&self.job), status)
    }

    /// Whether the application references the same person and job, ignoring status.
    pub fn is_same_pair(&self, person: &Person, job: &Job) -> bool {
        self.person.is_same(person) && self.job.is_same(job)
    }

    pub fn to_view(&self) -> ApplicationView {
        ApplicationView {
            phone: self.person.phone.clone(),
            candidate: self.person.name.clone(),
            job_title: self.job.title.clone(),
            status: self.status,
            rounds: self.job.rounds,
        }
    }
}

pub(crate) fn ensure_within_rounds(status: u32, job: &Job) -> Result<(), LedgerError> {
    let rounds = job.rounds.get();
    if status > u32::from(rounds) {
        return Err(LedgerError::InvalidApplicationStatus(
            StatusViolation::ExceedsRounds { status, rounds },
        ));
    }
    Ok(())
}

/// Flattened application representation for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationView {
    pub phone: Phone,
    pub candidate: String,
    pub job_title: JobTitle,
    pub status: ApplicationStatus,
    pub rounds: JobRounds,
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} (status {}/{})",
            self.person.name,
            self.job.title,
            self.status,
            self.job.rounds.get()
        )
    }
}
