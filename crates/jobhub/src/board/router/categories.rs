use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::Utc;
use serde_json::Value;

use super::envelope::{failure, listing, success, JobView};
use super::SharedContext;
use crate::board::domain::{Employer, Job, User};
use crate::board::store::Collection;

pub(crate) async fn list_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    match context.service.categories() {
        Ok(summaries) => success(StatusCode::OK, None, summaries),
        Err(error) => failure(error, "Error fetching categories", context.options),
    }
}

pub(crate) async fn jobs_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    match context.service.category_jobs(&name, &params) {
        Ok(page) => listing(
            &page,
            JobView::all(&page.items, Utc::now()),
            Some(("category", Value::String(name))),
        ),
        Err(error) => failure(error, "Error fetching category jobs", context.options),
    }
}
