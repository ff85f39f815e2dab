use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::envelope::rejected_body;
use super::SharedContext;
use crate::board::domain::{Employer, Job, User};
use crate::board::service::{IdentityEvent, IdentityFacts};
use crate::board::store::Collection;

/// Auth-provider webhook body. Both camelCase and snake_case attribute spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WebhookPayload {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) data: ProviderUser,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProviderUser {
    pub(crate) id: String,
    #[serde(rename = "emailAddresses", alias = "email_addresses")]
    pub(crate) email_addresses: Vec<ProviderEmail>,
    #[serde(rename = "firstName", alias = "first_name")]
    pub(crate) first_name: Option<String>,
    #[serde(rename = "lastName", alias = "last_name")]
    pub(crate) last_name: Option<String>,
    #[serde(
        rename = "profileImageUrl",
        alias = "profile_image_url",
        alias = "image_url"
    )]
    pub(crate) profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProviderEmail {
    #[serde(rename = "emailAddress", alias = "email_address")]
    pub(crate) email_address: String,
}

impl WebhookPayload {
    /// The lifecycle event this payload carries, or `None` for types the board ignores.
    pub(crate) fn into_event(self) -> Option<IdentityEvent> {
        let facts = IdentityFacts {
            external_id: self.data.id,
            email: self
                .data
                .email_addresses
                .into_iter()
                .next()
                .map(|entry| entry.email_address),
            first_name: self.data.first_name,
            last_name: self.data.last_name,
            profile_image_url: self.data.profile_image_url,
        };

        match self.kind.as_str() {
            "user.created" => Some(IdentityEvent::Created(facts)),
            "user.updated" => Some(IdentityEvent::Updated(facts)),
            "user.deleted" => Some(IdentityEvent::Deleted(facts)),
            _ => None,
        }
    }
}

pub(crate) async fn clerk_handler<J, E, U>(
    State(context): State<SharedContext<J, E, U>>,
    body: Result<Json<WebhookPayload>, JsonRejection>,
) -> Response
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    let kind = payload.kind.clone();
    info!(event_type = %kind, "identity webhook received");

    let Some(event) = payload.into_event() else {
        info!(event_type = %kind, "unhandled identity webhook type");
        return received();
    };

    match context.service.sync_identity(event) {
        Ok(outcome) => {
            info!(event_type = %kind, outcome = outcome.label(), "identity webhook processed");
            received()
        }
        Err(err) => {
            error!(event_type = %kind, error = %err, "identity webhook failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Webhook processing failed" })),
            )
                .into_response()
        }
    }
}

fn received() -> Response {
    (StatusCode::OK, Json(json!({ "received": true }))).into_response()
}
