use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::error;

use super::RouterOptions;
use crate::board::domain::Job;
use crate::board::query::{Page, ScoredJob};
use crate::board::service::ServiceError;
use crate::board::store::StoreError;

/// A job as rendered to API callers, with its relative `postedDate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobView<'a> {
    #[serde(flatten)]
    job: &'a Job,
    posted_date: String,
}

impl<'a> JobView<'a> {
    pub(crate) fn new(job: &'a Job, now: DateTime<Utc>) -> Self {
        Self {
            posted_date: job.posted_date(now),
            job,
        }
    }

    pub(crate) fn all(jobs: &'a [Job], now: DateTime<Utc>) -> Vec<Self> {
        jobs.iter().map(|job| Self::new(job, now)).collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoredJobView<'a> {
    #[serde(flatten)]
    scored: &'a ScoredJob,
    posted_date: String,
}

impl<'a> ScoredJobView<'a> {
    pub(crate) fn all(jobs: &'a [ScoredJob], now: DateTime<Utc>) -> Vec<Self> {
        jobs.iter()
            .map(|scored| Self {
                posted_date: scored.job.posted_date(now),
                scored,
            })
            .collect()
    }
}

pub(crate) fn success<T: Serialize>(
    status: StatusCode,
    message: Option<&str>,
    data: T,
) -> Response {
    let mut payload = Map::new();
    payload.insert("success".to_string(), Value::Bool(true));
    if let Some(message) = message {
        payload.insert("message".to_string(), Value::String(message.to_string()));
    }
    payload.insert("data".to_string(), json!(data));
    (status, Json(Value::Object(payload))).into_response()
}

/// Listing envelope; `scope` adds a sibling such as `employer` or `category`.
pub(crate) fn listing<T, D: Serialize>(
    page: &Page<T>,
    data: D,
    scope: Option<(&str, Value)>,
) -> Response {
    let mut payload = Map::new();
    payload.insert("success".to_string(), Value::Bool(true));
    payload.insert("data".to_string(), json!(data));
    payload.insert("pagination".to_string(), json!(page.pagination));
    if let Some((key, value)) = scope {
        payload.insert(key.to_string(), value);
    }
    (StatusCode::OK, Json(Value::Object(payload))).into_response()
}

pub(crate) fn failure_payload(
    status: StatusCode,
    message: &str,
    errors: Option<Vec<String>>,
) -> Response {
    let mut payload = json!({
        "success": false,
        "message": message,
    });
    if let Some(errors) = errors {
        payload["errors"] = json!(errors);
    }
    (status, Json(payload)).into_response()
}

/// Map a service failure onto its status code and envelope.
///
/// `context` names the operation for upstream failures, e.g. "Error fetching jobs".
pub(crate) fn failure(error: ServiceError, context: &str, options: RouterOptions) -> Response {
    match error {
        ServiceError::Validation(errors) => {
            let messages = errors.messages();
            let message = match messages.as_slice() {
                [only] => only.clone(),
                _ => "Validation error".to_string(),
            };
            failure_payload(StatusCode::BAD_REQUEST, &message, Some(messages))
        }
        ServiceError::MalformedId { .. } => {
            failure_payload(StatusCode::BAD_REQUEST, &error.to_string(), None)
        }
        ServiceError::NotFound { .. } | ServiceError::Store(StoreError::NotFound) => {
            failure_payload(StatusCode::NOT_FOUND, &error.to_string(), None)
        }
        ServiceError::Duplicate(_)
        | ServiceError::Integrity(_)
        | ServiceError::Store(StoreError::Conflict) => {
            failure_payload(StatusCode::CONFLICT, &error.to_string(), None)
        }
        ServiceError::Store(StoreError::Unavailable(_)) => {
            error!(error = %error, "{context}");
            let mut payload = json!({
                "success": false,
                "message": context,
            });
            if options.expose_internal_errors {
                payload["error"] = json!(error.to_string());
            }
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Malformed JSON bodies are a caller error, answered in the same envelope.
pub(crate) fn rejected_body(rejection: JsonRejection) -> Response {
    failure_payload(
        StatusCode::BAD_REQUEST,
        "Malformed request body",
        Some(vec![rejection.body_text()]),
    )
}
