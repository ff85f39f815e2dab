use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::board::domain::{Employer, Job, Preferences, Profile, RecordId, User, UserType};
use crate::board::query::Window;
use crate::board::schema::{EmployerDraft, JobDraft};
use crate::board::store::{Collection, Document, MemoryCollection, Predicate, SortOrder, StoreError};
use crate::board::{board_router, BoardService, RouterOptions};

pub(super) type MemoryBoard =
    BoardService<MemoryCollection<Job>, MemoryCollection<Employer>, MemoryCollection<User>>;

pub(super) struct Fixture {
    pub(super) service: Arc<MemoryBoard>,
    pub(super) jobs: Arc<MemoryCollection<Job>>,
    pub(super) employers: Arc<MemoryCollection<Employer>>,
    pub(super) users: Arc<MemoryCollection<User>>,
}

impl Fixture {
    pub(super) fn router(&self) -> axum::Router {
        board_router(self.service.clone(), RouterOptions::default())
    }
}

pub(super) fn build_service() -> Fixture {
    let jobs = Arc::new(MemoryCollection::new());
    let employers = Arc::new(MemoryCollection::new());
    let users = Arc::new(MemoryCollection::new());
    let service = Arc::new(BoardService::new(
        jobs.clone(),
        employers.clone(),
        users.clone(),
    ));
    Fixture {
        service,
        jobs,
        employers,
        users,
    }
}

pub(super) fn job_draft(title: &str, category: &str) -> JobDraft {
    JobDraft {
        title: Some(title.to_string()),
        company: Some("Acme Corp".to_string()),
        location: Some("Denver, CO".to_string()),
        job_type: Some("Full-time".to_string()),
        category: Some(category.to_string()),
        salary: Some("$120k - $150k".to_string()),
        description: Some(format!("Join us as a {title}.")),
        requirements: Some(vec!["3+ years experience".to_string()]),
        is_remote: Some(false),
        is_featured: Some(false),
        is_urgent: Some(false),
        employer_id: Some("user_acme".to_string()),
        ..JobDraft::default()
    }
}

pub(super) fn employer_draft(company_name: &str, user_id: &str) -> EmployerDraft {
    EmployerDraft {
        company_name: Some(company_name.to_string()),
        description: Some("We build things.".to_string()),
        website: Some("https://example.com".to_string()),
        industry: Some("Software".to_string()),
        size: Some("11-50".to_string()),
        location: Some("Denver, CO".to_string()),
        contact_email: Some("Jobs@Example.com".to_string()),
        user_id: Some(user_id.to_string()),
        ..EmployerDraft::default()
    }
}

pub(super) fn user(clerk_user_id: &str, email: &str) -> User {
    let now = Utc::now();
    User {
        id: RecordId::generate(),
        clerk_user_id: clerk_user_id.to_string(),
        email: email.to_string(),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        profile_image: None,
        user_type: UserType::JobSeeker,
        is_active: true,
        preferences: Preferences::default(),
        profile: Profile::default(),
        applications: Vec::new(),
        saved_jobs: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Collection whose every call fails as if the backing database were offline.
pub(super) struct UnavailableCollection<D> {
    marker: PhantomData<fn() -> D>,
}

impl<D> Default for UnavailableCollection<D> {
    fn default() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

fn offline() -> StoreError {
    StoreError::Unavailable("database offline".to_string())
}

impl<D: Document> Collection<D> for UnavailableCollection<D> {
    fn insert(&self, _document: D) -> Result<D, StoreError> {
        Err(offline())
    }

    fn fetch(&self, _id: &RecordId) -> Result<Option<D>, StoreError> {
        Err(offline())
    }

    fn find_one(&self, _predicate: &dyn Predicate<D>) -> Result<Option<D>, StoreError> {
        Err(offline())
    }

    fn find(
        &self,
        _predicate: &dyn Predicate<D>,
        _order: SortOrder<D>,
        _window: Window,
    ) -> Result<Vec<D>, StoreError> {
        Err(offline())
    }

    fn count(&self, _predicate: &dyn Predicate<D>) -> Result<u64, StoreError> {
        Err(offline())
    }

    fn replace(&self, _document: D) -> Result<(), StoreError> {
        Err(offline())
    }

    fn remove(&self, _id: &RecordId) -> Result<Option<D>, StoreError> {
        Err(offline())
    }

    fn modify_one<T, F>(
        &self,
        _predicate: &dyn Predicate<D>,
        _apply: F,
    ) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut D) -> T,
    {
        Err(offline())
    }

    fn scan(&self) -> Result<Vec<D>, StoreError> {
        Err(offline())
    }
}

pub(super) type OfflineBoard = BoardService<
    UnavailableCollection<Job>,
    UnavailableCollection<Employer>,
    UnavailableCollection<User>,
>;

pub(super) fn offline_service() -> Arc<OfflineBoard> {
    Arc::new(BoardService::new(
        Arc::new(UnavailableCollection::default()),
        Arc::new(UnavailableCollection::default()),
        Arc::new(UnavailableCollection::default()),
    ))
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

pub(super) fn json_request(method: Method, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize payload")))
        .expect("request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
