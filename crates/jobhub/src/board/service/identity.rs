use chrono::Utc;
use tracing::{info, warn};

use super::users::by_clerk_id;
use super::{BoardService, ServiceError};
use crate::board::domain::{Employer, Job, Preferences, Profile, RecordId, User, UserType};
use crate::board::schema::{optional_text, validate_user};
use crate::board::store::Collection;

const EMAIL_TAKEN: &str = "Email is already in use";

/// Identity attributes pushed by the auth provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityFacts {
    pub external_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl IdentityFacts {
    fn email(&self) -> Option<String> {
        optional_text(self.email.as_deref()).map(|email| email.to_lowercase())
    }

    /// The provider id as stored and looked up; surrounding whitespace is not part of it.
    fn normalized(mut self) -> Self {
        self.external_id = self.external_id.trim().to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    Created(IdentityFacts),
    Updated(IdentityFacts),
    Deleted(IdentityFacts),
}

/// What an identity event did to the local user collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Created(User),
    Existing(User),
    Updated(User),
    Deactivated(User),
    /// A deletion for a user never mirrored locally.
    Ignored,
}

impl SyncOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SyncOutcome::Created(_) => "created",
            SyncOutcome::Existing(_) => "existing",
            SyncOutcome::Updated(_) => "updated",
            SyncOutcome::Deactivated(_) => "deactivated",
            SyncOutcome::Ignored => "ignored",
        }
    }
}

impl<J, E, U> BoardService<J, E, U>
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    /// Mirror one auth-provider lifecycle event. Replaying an event leaves the same state.
    pub fn sync_identity(&self, event: IdentityEvent) -> Result<SyncOutcome, ServiceError> {
        match event {
            IdentityEvent::Created(facts) => self.find_or_create_user(facts.normalized()),
            IdentityEvent::Updated(facts) => self.refresh_user(facts.normalized()),
            IdentityEvent::Deleted(facts) => self.deactivate_user(&facts.normalized().external_id),
        }
    }

    fn find_or_create_user(&self, facts: IdentityFacts) -> Result<SyncOutcome, ServiceError> {
        if let Some(existing) = self.users.find_one(&by_clerk_id(&facts.external_id))? {
            return Ok(SyncOutcome::Existing(existing));
        }

        let email = facts.email().unwrap_or_default();
        if !email.is_empty() {
            let taken = self
                .users
                .find_one(&|candidate: &User| candidate.email == email)?;
            if taken.is_some() {
                warn!(clerk_user_id = %facts.external_id, "identity sync rejected: email in use");
                return Err(ServiceError::Duplicate(EMAIL_TAKEN.to_string()));
            }
        }

        let now = Utc::now();
        let user = User {
            id: RecordId::generate(),
            clerk_user_id: facts.external_id.clone(),
            email,
            first_name: optional_text(facts.first_name.as_deref()),
            last_name: optional_text(facts.last_name.as_deref()),
            profile_image: optional_text(facts.profile_image_url.as_deref()),
            user_type: UserType::default(),
            is_active: true,
            preferences: Preferences::default(),
            profile: Profile::default(),
            applications: Vec::new(),
            saved_jobs: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        validate_user(&user)?;

        let stored = self.users.insert(user)?;
        info!(
            user_id = %stored.id,
            clerk_user_id = %stored.clerk_user_id,
            "user created from identity event"
        );
        Ok(SyncOutcome::Created(stored))
    }

    fn refresh_user(&self, facts: IdentityFacts) -> Result<SyncOutcome, ServiceError> {
        let email = facts.email();
        if let Some(email) = &email {
            let taken = self.users.find_one(&|candidate: &User| {
                candidate.email == *email && candidate.clerk_user_id != facts.external_id
            })?;
            if taken.is_some() {
                warn!(
                    clerk_user_id = %facts.external_id,
                    "identity refresh rejected: email in use"
                );
                return Err(ServiceError::Duplicate(EMAIL_TAKEN.to_string()));
            }
        }
        let now = Utc::now();

        let refreshed = self
            .users
            .modify_one(&by_clerk_id(&facts.external_id), |user: &mut User| {
                if let Some(first_name) = optional_text(facts.first_name.as_deref()) {
                    user.first_name = Some(first_name);
                }
                if let Some(last_name) = optional_text(facts.last_name.as_deref()) {
                    user.last_name = Some(last_name);
                }
                if let Some(image) = optional_text(facts.profile_image_url.as_deref()) {
                    user.profile_image = Some(image);
                }
                if let Some(email) = &email {
                    user.email = email.clone();
                }
                user.updated_at = now;
                user.clone()
            })?;

        match refreshed {
            Some(user) => {
                info!(user_id = %user.id, "user refreshed from identity event");
                Ok(SyncOutcome::Updated(user))
            }
            None => self.find_or_create_user(facts),
        }
    }

    fn deactivate_user(&self, external_id: &str) -> Result<SyncOutcome, ServiceError> {
        let now = Utc::now();
        let deactivated = self
            .users
            .modify_one(&by_clerk_id(external_id), |user: &mut User| {
                user.is_active = false;
                user.updated_at = now;
                user.clone()
            })?;

        match deactivated {
            Some(user) => {
                info!(user_id = %user.id, "user deactivated from identity event");
                Ok(SyncOutcome::Deactivated(user))
            }
            None => {
                info!(clerk_user_id = %external_id, "deletion for unknown user ignored");
                Ok(SyncOutcome::Ignored)
            }
        }
    }
}
