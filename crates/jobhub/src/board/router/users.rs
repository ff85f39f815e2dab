use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde_json::json;

use super::envelope::{failure, rejected_body, success};
use super::SharedContext;
use crate::board::domain::{Employer, Job, User};
use crate::board::service::{ApplyRequest, ProfileUpdateRequest, SaveJobRequest};
use crate::board::store::Collection;

pub(crate) async fn me_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    let clerk_user_id = params.get("clerkUserId").map(String::as_str);
    match context.service.get_me(clerk_user_id) {
        Ok(profile) => success(StatusCode::OK, None, profile),
        Err(error) => failure(error, "Error fetching user profile", context.options),
    }
}

pub(crate) async fn update_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    body: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match context.service.update_me(request) {
        Ok(user) => success(StatusCode::OK, Some("Profile updated successfully"), user),
        Err(error) => failure(error, "Error updating user profile", context.options),
    }
}

pub(crate) async fn apply_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    body: Result<Json<ApplyRequest>, JsonRejection>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match context.service.apply_to_job(request) {
        Ok(application) => success(
            StatusCode::CREATED,
            Some("Application submitted successfully"),
            application,
        ),
        Err(error) => failure(error, "Error submitting application", context.options),
    }
}

pub(crate) async fn save_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    body: Result<Json<SaveJobRequest>, JsonRejection>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match context.service.save_job(request) {
        Ok(saved) => success(
            StatusCode::OK,
            Some("Job saved successfully"),
            json!({ "jobId": saved.job_id }),
        ),
        Err(error) => failure(error, "Error saving job", context.options),
    }
}
