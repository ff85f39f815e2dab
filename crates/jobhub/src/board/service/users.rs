use chrono::{DateTime, Utc};
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{info, warn};

use super::{BoardService, Resource, ServiceError};
use crate::board::domain::{
    Application, ApplicationStatus, Employer, Job, RecordId, SavedJob, User,
};
use crate::board::schema::{UserUpdate, ValidationErrors};
use crate::board::store::Collection;

const USER_ID_REQUIRED: &str = "User ID is required";
const USER_AND_JOB_REQUIRED: &str = "User ID and Job ID are required";
const USER_AND_UPDATES_REQUIRED: &str = "User ID and updates are required";
const ALREADY_APPLIED: &str = "You have already applied for this job";
const ALREADY_SAVED: &str = "Job already saved";
const EMAIL_TAKEN: &str = "Email is already in use";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyRequest {
    pub clerk_user_id: Option<String>,
    pub job_id: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveJobRequest {
    pub clerk_user_id: Option<String>,
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdateRequest {
    pub clerk_user_id: Option<String>,
    pub updates: Option<UserUpdate>,
}

/// An application with its job looked up; `job` is `None` once the job has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedApplication {
    pub job_id: RecordId,
    pub job: Option<Job>,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub cover_letter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSavedJob {
    pub job_id: RecordId,
    pub job: Option<Job>,
    pub saved_at: DateTime<Utc>,
}

/// The "me" view: the stored user with `fullName` and resolved job references.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: User,
    pub applications: Vec<ResolvedApplication>,
    pub saved_jobs: Vec<ResolvedSavedJob>,
}

impl Serialize for UserProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = match serde_json::to_value(&self.user).map_err(S::Error::custom)? {
            serde_json::Value::Object(fields) => fields,
            _ => return Err(S::Error::custom("user did not serialize to an object")),
        };
        fields.insert(
            "fullName".to_string(),
            serde_json::Value::String(self.user.full_name()),
        );
        fields.insert(
            "applications".to_string(),
            serde_json::to_value(&self.applications).map_err(S::Error::custom)?,
        );
        fields.insert(
            "savedJobs".to_string(),
            serde_json::to_value(&self.saved_jobs).map_err(S::Error::custom)?,
        );
        fields.serialize(serializer)
    }
}

impl<J, E, U> BoardService<J, E, U>
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    pub fn get_me(&self, clerk_user_id: Option<&str>) -> Result<UserProfile, ServiceError> {
        let clerk_user_id = required_identity(clerk_user_id, "clerkUserId", USER_ID_REQUIRED)?;
        let user = self.user_by_clerk_id(&clerk_user_id)?;

        let applications = user
            .applications
            .iter()
            .map(|entry| self.resolve_application(entry))
            .collect::<Result<Vec<_>, _>>()?;
        let saved_jobs = user
            .saved_jobs
            .iter()
            .map(|entry| {
                Ok(ResolvedSavedJob {
                    job_id: entry.job_id.clone(),
                    job: self.jobs.fetch(&entry.job_id)?,
                    saved_at: entry.saved_at,
                })
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;

        Ok(UserProfile {
            user,
            applications,
            saved_jobs,
        })
    }

    /// Apply the profile fields in `request.updates` to the user it names.
    pub fn update_me(&self, request: ProfileUpdateRequest) -> Result<User, ServiceError> {
        let (clerk_user_id, updates) = match (
            request.clerk_user_id.filter(|id| !id.trim().is_empty()),
            request.updates,
        ) {
            (Some(id), Some(updates)) => (id, updates),
            _ => {
                return Err(
                    ValidationErrors::single("clerkUserId", USER_AND_UPDATES_REQUIRED).into(),
                )
            }
        };

        if let Some(email) = updates.normalized_email() {
            let owner = clerk_user_id.clone();
            let clash = self.users.find_one(&|candidate: &User| {
                candidate.email == email && candidate.clerk_user_id != owner
            })?;
            if clash.is_some() {
                warn!(clerk_user_id = %clerk_user_id, "profile update rejected: email in use");
                return Err(ServiceError::Duplicate(EMAIL_TAKEN.to_string()));
            }
        }

        let now = Utc::now();
        let outcome = self
            .users
            .modify_one(
                &by_clerk_id(&clerk_user_id),
                |user: &mut User| -> Result<User, ValidationErrors> {
                    let mut updated = updates.applied_to(user)?;
                    updated.updated_at = now;
                    *user = updated.clone();
                    Ok(updated)
                },
            )?
            .ok_or(ServiceError::not_found(Resource::User))?;

        let updated = outcome?;
        info!(user_id = %updated.id, "user profile updated");
        Ok(updated)
    }

    /// Record an application; the duplicate check and the append happen in one atomic step.
    pub fn apply_to_job(&self, request: ApplyRequest) -> Result<ResolvedApplication, ServiceError> {
        let (clerk_user_id, job_id) = self.user_and_job(request.clerk_user_id, request.job_id)?;
        let cover_letter = request.cover_letter.unwrap_or_default();

        let now = Utc::now();
        let application = self
            .users
            .modify_one(&by_clerk_id(&clerk_user_id), |user: &mut User| {
                if user.has_applied_to(&job_id) {
                    return None;
                }
                let entry = Application {
                    job_id: job_id.clone(),
                    applied_at: now,
                    status: ApplicationStatus::Applied,
                    cover_letter,
                };
                user.applications.push(entry.clone());
                user.updated_at = now;
                Some(entry)
            })?
            .ok_or(ServiceError::not_found(Resource::User))?
            .ok_or_else(|| {
                warn!(
                    clerk_user_id = %clerk_user_id,
                    job_id = %job_id,
                    "duplicate application rejected"
                );
                ServiceError::Duplicate(ALREADY_APPLIED.to_string())
            })?;

        info!(clerk_user_id = %clerk_user_id, job_id = %job_id, "application submitted");
        self.resolve_application(&application)
    }

    pub fn save_job(&self, request: SaveJobRequest) -> Result<SavedJob, ServiceError> {
        let (clerk_user_id, job_id) = self.user_and_job(request.clerk_user_id, request.job_id)?;

        let now = Utc::now();
        let saved = self
            .users
            .modify_one(&by_clerk_id(&clerk_user_id), |user: &mut User| {
                if user.has_saved(&job_id) {
                    return None;
                }
                let entry = SavedJob {
                    job_id: job_id.clone(),
                    saved_at: now,
                };
                user.saved_jobs.push(entry.clone());
                user.updated_at = now;
                Some(entry)
            })?
            .ok_or(ServiceError::not_found(Resource::User))?
            .ok_or_else(|| ServiceError::Duplicate(ALREADY_SAVED.to_string()))?;

        info!(clerk_user_id = %clerk_user_id, job_id = %job_id, "job saved");
        Ok(saved)
    }

    pub(crate) fn user_by_clerk_id(&self, clerk_user_id: &str) -> Result<User, ServiceError> {
        self.users
            .find_one(&by_clerk_id(clerk_user_id))?
            .ok_or(ServiceError::not_found(Resource::User))
    }

    fn user_and_job(
        &self,
        clerk_user_id: Option<String>,
        job_id: Option<String>,
    ) -> Result<(String, RecordId), ServiceError> {
        let clerk_user_id =
            required_identity(clerk_user_id.as_deref(), "clerkUserId", USER_AND_JOB_REQUIRED)?;
        let raw_job_id = required_identity(job_id.as_deref(), "jobId", USER_AND_JOB_REQUIRED)?;
        let job_id = Self::parse_id(Resource::Job, &raw_job_id)?;
        Ok((clerk_user_id, job_id))
    }

    fn resolve_application(
        &self,
        entry: &Application,
    ) -> Result<ResolvedApplication, ServiceError> {
        Ok(ResolvedApplication {
            job_id: entry.job_id.clone(),
            job: self.jobs.fetch(&entry.job_id)?,
            applied_at: entry.applied_at,
            status: entry.status,
            cover_letter: entry.cover_letter.clone(),
        })
    }
}

pub(crate) fn by_clerk_id(clerk_user_id: &str) -> impl Fn(&User) -> bool + Send + Sync + '_ {
    move |user: &User| user.clerk_user_id == clerk_user_id
}

fn required_identity(
    value: Option<&str>,
    field: &'static str,
    message: &str,
) -> Result<String, ValidationErrors> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ValidationErrors::single(field, message)),
    }
}
