use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Utc;
use serde_json::json;

use super::envelope::{failure, listing, rejected_body, success, JobView, ScoredJobView};
use super::SharedContext;
use crate::board::domain::{Employer, Job, User};
use crate::board::schema::{JobDraft, JobPatch};
use crate::board::store::Collection;

pub(crate) async fn list_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    match context.service.list_jobs(&params) {
        Ok(page) => listing(&page, JobView::all(&page.items, Utc::now()), None),
        Err(error) => failure(error, "Error fetching jobs", context.options),
    }
}

pub(crate) async fn search_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    match context.service.search_jobs(&params) {
        Ok(page) => listing(&page, ScoredJobView::all(&page.items, Utc::now()), None),
        Err(error) => failure(error, "Error searching jobs", context.options),
    }
}

pub(crate) async fn stats_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    match context.service.job_stats() {
        Ok(stats) => success(StatusCode::OK, None, stats),
        Err(error) => failure(error, "Error fetching job statistics", context.options),
    }
}

pub(crate) async fn get_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Path(id): Path<String>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    match context.service.get_job(&id) {
        Ok(job) => success(StatusCode::OK, None, JobView::new(&job, Utc::now())),
        Err(error) => failure(error, "Error fetching job", context.options),
    }
}

pub(crate) async fn create_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    body: Result<Json<JobDraft>, JsonRejection>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    let Json(draft) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match context.service.create_job(draft) {
        Ok(job) => success(
            StatusCode::CREATED,
            Some("Job created successfully"),
            JobView::new(&job, Utc::now()),
        ),
        Err(error) => failure(error, "Error creating job", context.options),
    }
}

pub(crate) async fn update_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Path(id): Path<String>,
    body: Result<Json<JobPatch>, JsonRejection>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    let Json(patch) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match context.service.update_job(&id, patch) {
        Ok(job) => success(
            StatusCode::OK,
            Some("Job updated successfully"),
            JobView::new(&job, Utc::now()),
        ),
        Err(error) => failure(error, "Error updating job", context.options),
    }
}

pub(crate) async fn delete_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Path(id): Path<String>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    match context.service.delete_job(&id) {
        Ok(removed) => success(
            StatusCode::OK,
            Some("Job deleted successfully"),
            json!({ "id": removed.id, "title": removed.title, "company": removed.company }),
        ),
        Err(error) => failure(error, "Error deleting job", context.options),
    }
}
