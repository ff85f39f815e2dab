//! Resource operations composing validation, filtering, paging, search and statistics.

mod employers;
mod identity;
mod jobs;
mod users;

pub use employers::{EmployerJobs, EmployerSummary};
pub use identity::{IdentityEvent, IdentityFacts, SyncOutcome};
pub use users::{
    ApplyRequest, ProfileUpdateRequest, ResolvedApplication, ResolvedSavedJob, SaveJobRequest,
    UserProfile,
};

use std::fmt;
use std::sync::Arc;

use super::domain::{Employer, Job, RecordId, User};
use super::schema::ValidationErrors;
use super::store::{Collection, StoreError};

/// Service composing the job, employer and user collections.
///
/// Cross-entity invariants live here because the store never enforces references: an employer
/// is tied to its jobs only through `Job::employer_id == Employer::user_id`.
pub struct BoardService<J, E, U> {
    jobs: Arc<J>,
    employers: Arc<E>,
    users: Arc<U>,
}

impl<J, E, U> BoardService<J, E, U>
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    pub fn new(jobs: Arc<J>, employers: Arc<E>, users: Arc<U>) -> Self {
        Self {
            jobs,
            employers,
            users,
        }
    }

    pub(crate) fn parse_id(resource: Resource, raw: &str) -> Result<RecordId, ServiceError> {
        RecordId::parse(raw).map_err(|_| ServiceError::MalformedId {
            resource,
            id: raw.to_string(),
        })
    }
}

/// Resource kinds named in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Job,
    Employer,
    User,
}

impl Resource {
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Job => "Job",
            Resource::Employer => "Employer",
            Resource::User => "User",
        }
    }

    pub const fn noun(self) -> &'static str {
        match self {
            Resource::Job => "job",
            Resource::Employer => "employer",
            Resource::User => "user",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised by the board service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    Duplicate(String),
    #[error("{resource} not found")]
    NotFound { resource: Resource },
    #[error("Invalid {} ID", .resource.noun())]
    MalformedId { resource: Resource, id: String },
    #[error("{0}")]
    Integrity(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub(crate) fn not_found(resource: Resource) -> Self {
        Self::NotFound { resource }
    }

    /// Expected outcomes a caller can act on, as opposed to upstream failures.
    pub fn is_expected(&self) -> bool {
        !matches!(self, ServiceError::Store(StoreError::Unavailable(_)))
    }
}
