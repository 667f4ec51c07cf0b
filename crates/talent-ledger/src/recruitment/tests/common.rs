use std::collections::BTreeSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::recruitment::domain::{
    skill_set, Application, ApplicationStatus, Job, JobRounds, JobTitle, Person, Phone,
};
use crate::recruitment::store::EntityStore;
use crate::recruitment::workspace::Workspace;

pub(super) fn phone(raw: &str) -> Phone {
    Phone::new(raw).expect("valid phone")
}

pub(super) fn title(raw: &str) -> JobTitle {
    JobTitle::new(raw).expect("valid title")
}

pub(super) fn status(value: u8) -> ApplicationStatus {
    ApplicationStatus::new(value)
}

pub(super) fn person(name: &str, number: &str) -> Person {
    Person {
        name: name.to_string(),
        phone: phone(number),
        email: format!("{}@example.com", name.to_lowercase()),
        address: "Blk 1 Example Road, #01-01".to_string(),
        school: "NUS".to_string(),
        degree: "Computer Science".to_string(),
        skills: skill_set(["rust"]).expect("valid skills"),
    }
}

pub(super) fn alice() -> Person {
    person("Alice", "91234567")
}

pub(super) fn bob() -> Person {
    person("Bob", "98765432")
}

pub(super) fn carol() -> Person {
    person("Carol", "93334444")
}

pub(super) fn job(name: &str, rounds: u8) -> Job {
    Job {
        title: title(name),
        rounds: JobRounds::new(rounds).expect("valid rounds"),
        skills: BTreeSet::new(),
    }
}

pub(super) fn backend() -> Job {
    job("Backend", 3)
}

pub(super) fn frontend() -> Job {
    job("Frontend", 2)
}

/// Store holding Alice, Bob, Backend (3 rounds) and Frontend (2 rounds).
pub(super) fn seeded_store() -> EntityStore {
    let mut store = EntityStore::new();
    store.persons_mut().add(alice()).expect("add alice");
    store.persons_mut().add(bob()).expect("add bob");
    store.jobs_mut().add(backend()).expect("add backend");
    store.jobs_mut().add(frontend()).expect("add frontend");
    store
}

pub(super) fn application(person: Person, job: Job, value: u8) -> Application {
    Application::bind(Arc::new(person), Arc::new(job), status(value)).expect("status fits job")
}

/// Workspace with Alice and Bob on Backend (statuses 1 and 2), Alice on
/// Frontend (status 2), and Carol with no applications.
pub(super) fn recruiting_workspace() -> Workspace {
    let mut workspace = Workspace::new();
    for candidate in [alice(), bob(), carol()] {
        workspace.add_person(candidate).expect("add person");
    }
    workspace.add_job(backend()).expect("add backend");
    workspace.add_job(frontend()).expect("add frontend");
    for (number, opening, value) in [
        ("91234567", "Backend", 1),
        ("98765432", "Backend", 2),
        ("91234567", "Frontend", 2),
    ] {
        workspace
            .submit_application(&phone(number), &title(opening), status(value))
            .expect("submit application");
    }
    workspace
}

pub(super) fn names<'a>(persons: impl IntoIterator<Item = &'a Arc<Person>>) -> Vec<String> {
    persons
        .into_iter()
        .map(|person| person.name.clone())
        .collect()
}

pub(super) fn titles<'a>(jobs: impl IntoIterator<Item = &'a Arc<Job>>) -> Vec<String> {
    jobs.into_iter()
        .map(|job| job.title.as_str().to_string())
        .collect()
}

pub(super) fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("build request")
}

pub(super) fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json body")
}
