use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Path, Query, Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    Application, ApplicationStatus, ApplicationView, Identified, Job, JobTitle, Person, Phone,
};
use super::error::LedgerError;
use super::search::KeywordQuery;
use super::view::{ViewGate, ViewState};
use super::workspace::Workspace;

/// The workspace behind one lock; each handler holds it for its whole call.
pub type SharedWorkspace = Arc<Mutex<Workspace>>;

pub fn shared(workspace: Workspace) -> SharedWorkspace {
    Arc::new(Mutex::new(workspace))
}

/// Router builder exposing the recruitment workspace over JSON.
pub fn recruitment_router(workspace: SharedWorkspace) -> Router {
    Router::new()
        .route("/api/v1/persons", get(list_persons).post(create_person))
        .route("/api/v1/persons/search", post(search_persons))
        .route(
            "/api/v1/persons/:phone",
            put(replace_person).delete(delete_person),
        )
        .route(
            "/api/v1/persons/:phone/applications",
            get(person_applications),
        )
        .route("/api/v1/jobs", get(list_jobs).post(create_job))
        .route("/api/v1/jobs/search", post(search_jobs))
        .route("/api/v1/jobs/:title", put(replace_job).delete(delete_job))
        .route("/api/v1/jobs/:title/applications", get(job_applications))
        .route(
            "/api/v1/applications",
            get(list_applications)
                .post(create_application)
                .delete(delete_application),
        )
        .route("/api/v1/applications/advance", post(advance_application))
        .route("/api/v1/filters", delete(clear_filters))
        .route("/api/v1/filters/status", put(filter_by_status))
        .route("/api/v1/view", get(current_view).put(set_view))
        .route("/api/v1/view/toggle", post(toggle_view))
        .route("/api/v1/view/clear", post(clear_view))
        .route("/api/v1/history", get(command_history))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&workspace),
            record_command,
        ))
        .with_state(workspace)
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filtered: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordRequest {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewApplication {
    pub phone: Phone,
    pub title: JobTitle,
    #[serde(default)]
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApplicationKey {
    pub phone: Phone,
    pub title: JobTitle,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdvanceRequest {
    pub phone: Phone,
    pub title: JobTitle,
    #[serde(default = "default_advance")]
    pub rounds: i32,
}

fn default_advance() -> i32 {
    1
}

/// Status arrives as text so malformed values surface as a domain error.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusFilterRequest {
    pub status: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ViewRequest {
    pub state: ViewState,
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match &self {
            LedgerError::DuplicateEntity(_) | LedgerError::DuplicateApplication => {
                StatusCode::CONFLICT
            }
            LedgerError::EntityNotFound(_) | LedgerError::ApplicationNotFound => {
                StatusCode::NOT_FOUND
            }
            LedgerError::InvalidApplicationStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::IllegalArgument(_) | LedgerError::InvalidValue(_) => {
                StatusCode::BAD_REQUEST
            }
            LedgerError::WrongView { .. } => StatusCode::CONFLICT,
        };
        let payload = json!({
            "error": self.to_string(),
        });
        (status, Json(payload)).into_response()
    }
}

type ApiResult<T> = Result<T, LedgerError>;

// Workspace mutations validate before writing; a poisoned lock still guards
// consistent state.
fn lock(workspace: &SharedWorkspace) -> MutexGuard<'_, Workspace> {
    workspace.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn record_command(
    State(workspace): State<SharedWorkspace>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        let line = format!("{} {}", request.method(), request.uri().path());
        lock(&workspace).history_mut().record(line);
    }
    next.run(request).await
}

fn person_key(raw: String) -> ApiResult<Phone> {
    Ok(Phone::new(raw)?)
}

fn job_key(raw: String) -> ApiResult<JobTitle> {
    Ok(JobTitle::new(raw)?)
}

fn person_snapshot(workspace: &Workspace, phone: &Phone) -> ApiResult<Person> {
    workspace
        .find_person(phone)
        .map(|person| person.as_ref().clone())
        .ok_or(LedgerError::EntityNotFound(Person::KIND))
}

fn job_snapshot(workspace: &Workspace, title: &JobTitle) -> ApiResult<Job> {
    workspace
        .find_job(title)
        .map(|job| job.as_ref().clone())
        .ok_or(LedgerError::EntityNotFound(Job::KIND))
}

fn application_snapshot(workspace: &Workspace, key: &ApplicationKey) -> ApiResult<Application> {
    workspace
        .find_application(&key.phone, &key.title)
        .cloned()
        .ok_or(LedgerError::ApplicationNotFound)
}

fn views<'a>(applications: impl IntoIterator<Item = &'a Application>) -> Vec<ApplicationView> {
    applications.into_iter().map(Application::to_view).collect()
}

fn persons_listing(workspace: &Workspace, filtered: bool) -> Vec<Arc<Person>> {
    if filtered {
        workspace.filtered_persons().cloned().collect()
    } else {
        workspace.all_persons().to_vec()
    }
}

fn jobs_listing(workspace: &Workspace, filtered: bool) -> Vec<Arc<Job>> {
    if filtered {
        workspace.filtered_jobs().cloned().collect()
    } else {
        workspace.all_jobs().to_vec()
    }
}

// Persons

async fn list_persons(
    State(workspace): State<SharedWorkspace>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Arc<Person>>> {
    let workspace = lock(&workspace);
    Json(persons_listing(&workspace, query.filtered))
}

async fn create_person(
    State(workspace): State<SharedWorkspace>,
    Json(person): Json<Person>,
) -> ApiResult<(StatusCode, Json<Arc<Person>>)> {
    let added = lock(&workspace).add_person(person)?;
    Ok((StatusCode::CREATED, Json(added)))
}

async fn replace_person(
    State(workspace): State<SharedWorkspace>,
    Path(phone): Path<String>,
    Json(edited): Json<Person>,
) -> ApiResult<Json<Arc<Person>>> {
    let phone = person_key(phone)?;
    let mut workspace = lock(&workspace);
    let target = person_snapshot(&workspace, &phone)?;
    Ok(Json(workspace.replace_person(&target, edited)?))
}

async fn delete_person(
    State(workspace): State<SharedWorkspace>,
    Path(phone): Path<String>,
) -> ApiResult<Response> {
    let phone = person_key(phone)?;
    let mut workspace = lock(&workspace);
    let target = person_snapshot(&workspace, &phone)?;
    let removed = workspace.remove_person(&target)?;
    let payload = json!({
        "removed": target,
        "applications": views(&removed),
    });
    Ok(Json(payload).into_response())
}

async fn search_persons(
    State(workspace): State<SharedWorkspace>,
    Json(request): Json<KeywordRequest>,
) -> ApiResult<Json<Vec<Arc<Person>>>> {
    let mut workspace = lock(&workspace);
    workspace.require_view(ViewGate::PersonFamily)?;
    let query = keyword_query(request)?;
    workspace.push_person_filter(query.person_predicate());
    Ok(Json(persons_listing(&workspace, true)))
}

async fn person_applications(
    State(workspace): State<SharedWorkspace>,
    Path(phone): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ApplicationView>>> {
    let phone = person_key(phone)?;
    let workspace = lock(&workspace);
    let person = person_snapshot(&workspace, &phone)?;
    let applications = if query.filtered {
        workspace.filtered_applications_by_person(&person)
    } else {
        workspace.applications_by_person(&person)
    };
    Ok(Json(views(applications)))
}

// Jobs

async fn list_jobs(
    State(workspace): State<SharedWorkspace>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Arc<Job>>> {
    let workspace = lock(&workspace);
    Json(jobs_listing(&workspace, query.filtered))
}

async fn create_job(
    State(workspace): State<SharedWorkspace>,
    Json(job): Json<Job>,
) -> ApiResult<(StatusCode, Json<Arc<Job>>)> {
    let added = lock(&workspace).add_job(job)?;
    Ok((StatusCode::CREATED, Json(added)))
}

async fn replace_job(
    State(workspace): State<SharedWorkspace>,
    Path(title): Path<String>,
    Json(edited): Json<Job>,
) -> ApiResult<Json<Arc<Job>>> {
    let title = job_key(title)?;
    let mut workspace = lock(&workspace);
    let target = job_snapshot(&workspace, &title)?;
    Ok(Json(workspace.replace_job(&target, edited)?))
}

async fn delete_job(
    State(workspace): State<SharedWorkspace>,
    Path(title): Path<String>,
) -> ApiResult<Response> {
    let title = job_key(title)?;
    let mut workspace = lock(&workspace);
    let target = job_snapshot(&workspace, &title)?;
    let removed = workspace.remove_job(&target)?;
    let payload = json!({
        "removed": target,
        "applications": views(&removed),
    });
    Ok(Json(payload).into_response())
}

async fn search_jobs(
    State(workspace): State<SharedWorkspace>,
    Json(request): Json<KeywordRequest>,
) -> ApiResult<Json<Vec<Arc<Job>>>> {
    let mut workspace = lock(&workspace);
    workspace.require_view(ViewGate::JobFamily)?;
    let query = keyword_query(request)?;
    workspace.push_job_filter(query.job_predicate());
    Ok(Json(jobs_listing(&workspace, true)))
}

async fn job_applications(
    State(workspace): State<SharedWorkspace>,
    Path(title): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ApplicationView>>> {
    let title = job_key(title)?;
    let workspace = lock(&workspace);
    let job = job_snapshot(&workspace, &title)?;
    let applications = if query.filtered {
        workspace.filtered_applications_by_job(&job)
    } else {
        workspace.applications_by_job(&job)
    };
    Ok(Json(views(applications)))
}

fn keyword_query(request: KeywordRequest) -> ApiResult<KeywordQuery> {
    let query = KeywordQuery::new(request.keywords);
    if query.is_empty() {
        return Err(LedgerError::IllegalArgument(
            "at least one keyword is required".to_string(),
        ));
    }
    Ok(query)
}

// Applications

async fn list_applications(
    State(workspace): State<SharedWorkspace>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<ApplicationView>> {
    let workspace = lock(&workspace);
    let listing = if query.filtered {
        views(workspace.filtered_applications())
    } else {
        views(workspace.all_applications())
    };
    Json(listing)
}

async fn create_application(
    State(workspace): State<SharedWorkspace>,
    Json(request): Json<NewApplication>,
) -> ApiResult<(StatusCode, Json<ApplicationView>)> {
    let added =
        lock(&workspace).submit_application(&request.phone, &request.title, request.status)?;
    Ok((StatusCode::CREATED, Json(added.to_view())))
}

async fn delete_application(
    State(workspace): State<SharedWorkspace>,
    Json(key): Json<ApplicationKey>,
) -> ApiResult<Json<ApplicationView>> {
    let mut workspace = lock(&workspace);
    let target = application_snapshot(&workspace, &key)?;
    let removed = workspace.remove_application(&target)?;
    Ok(Json(removed.to_view()))
}

async fn advance_application(
    State(workspace): State<SharedWorkspace>,
    Json(request): Json<AdvanceRequest>,
) -> ApiResult<Json<ApplicationView>> {
    let key = ApplicationKey {
        phone: request.phone,
        title: request.title,
    };
    let mut workspace = lock(&workspace);
    let target = application_snapshot(&workspace, &key)?;
    let advanced = workspace.advance_application(&target, request.rounds)?;
    Ok(Json(advanced.to_view()))
}

// Filters

async fn filter_by_status(
    State(workspace): State<SharedWorkspace>,
    Json(request): Json<StatusFilterRequest>,
) -> ApiResult<Response> {
    let mut workspace = lock(&workspace);
    workspace.require_view(ViewGate::JobFamily)?;
    let status: ApplicationStatus = request.status.parse()?;
    workspace.filter_by_status(status);
    let payload = json!({
        "status": status,
        "jobs": jobs_listing(&workspace, true),
        "persons": persons_listing(&workspace, true),
        "applications": views(workspace.filtered_applications()),
    });
    Ok(Json(payload).into_response())
}

async fn clear_filters(State(workspace): State<SharedWorkspace>) -> StatusCode {
    lock(&workspace).clear_status_filter();
    StatusCode::NO_CONTENT
}

// View state

#[derive(Debug, Clone, Copy, Serialize)]
struct ViewPayload {
    state: ViewState,
    job_family: bool,
}

fn view_payload(workspace: &Workspace) -> Json<ViewPayload> {
    Json(ViewPayload {
        state: workspace.view_state(),
        job_family: workspace.is_job_family(),
    })
}

async fn current_view(State(workspace): State<SharedWorkspace>) -> Json<ViewPayload> {
    view_payload(&lock(&workspace))
}

async fn set_view(
    State(workspace): State<SharedWorkspace>,
    Json(request): Json<ViewRequest>,
) -> Json<ViewPayload> {
    let mut workspace = lock(&workspace);
    workspace.set_view_state(request.state);
    view_payload(&workspace)
}

async fn toggle_view(State(workspace): State<SharedWorkspace>) -> Json<ViewPayload> {
    let mut workspace = lock(&workspace);
    workspace.toggle_view_state();
    view_payload(&workspace)
}

async fn clear_view(State(workspace): State<SharedWorkspace>) -> Json<serde_json::Value> {
    let mut workspace = lock(&workspace);
    let cleared = workspace.clear_detail_view();
    Json(json!({
        "cleared": cleared,
        "state": workspace.view_state(),
        "job_family": workspace.is_job_family(),
    }))
}

async fn command_history(State(workspace): State<SharedWorkspace>) -> Json<Vec<String>> {
    Json(lock(&workspace).history().entries().to_vec())
}
