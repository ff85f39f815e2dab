use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Utc;
use serde_json::json;

use super::envelope::{failure, listing, rejected_body, success, JobView};
use super::SharedContext;
use crate::board::domain::{Employer, Job, User};
use crate::board::schema::{EmployerDraft, EmployerPatch};
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
    match context.service.list_employers(&params) {
        Ok(page) => listing(&page, &page.items, None),
        Err(error) => failure(error, "Error fetching employers", context.options),
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
    match context.service.employer_stats() {
        Ok(stats) => success(StatusCode::OK, None, stats),
        Err(error) => failure(error, "Error fetching employer statistics", context.options),
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
    match context.service.get_employer(&id) {
        Ok(employer) => success(StatusCode::OK, None, employer),
        Err(error) => failure(error, "Error fetching employer", context.options),
    }
}

pub(crate) async fn jobs_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    match context.service.employer_jobs(&id, &params) {
        Ok(scoped) => listing(
            &scoped.jobs,
            JobView::all(&scoped.jobs.items, Utc::now()),
            Some(("employer", json!(scoped.employer))),
        ),
        Err(error) => failure(error, "Error fetching employer jobs", context.options),
    }
}

pub(crate) async fn create_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    body: Result<Json<EmployerDraft>, JsonRejection>,
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

    match context.service.create_employer(draft) {
        Ok(employer) => success(
            StatusCode::CREATED,
            Some("Employer created successfully"),
            employer,
        ),
        Err(error) => failure(error, "Error creating employer", context.options),
    }
}

pub(crate) async fn update_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Path(id): Path<String>,
    body: Result<Json<EmployerPatch>, JsonRejection>,
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

    match context.service.update_employer(&id, patch) {
        Ok(employer) => success(
            StatusCode::OK,
            Some("Employer updated successfully"),
            employer,
        ),
        Err(error) => failure(error, "Error updating employer", context.options),
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
    match context.service.delete_employer(&id) {
        Ok(removed) => success(
            StatusCode::OK,
            Some("Employer deleted successfully"),
            json!({ "id": removed.id, "companyName": removed.company_name }),
        ),
        Err(error) => failure(error, "Error deleting employer", context.options),
    }
}
