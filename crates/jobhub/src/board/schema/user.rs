use serde::{Deserialize, Serialize};

use super::{max_chars, optional_text, ValidationErrors};
use crate::board::domain::{Preferences, Profile, User, UserType};

const NAME_MAX: usize = 50;
const HEADLINE_MAX: usize = 100;
const BIO_MAX: usize = 500;

/// Profile fields a user may change about themselves.
///
/// Identity (`clerkUserId`), activity state, applications and saved jobs are managed by their own
/// operations and cannot be written through this payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image: Option<String>,
    pub user_type: Option<String>,
    pub preferences: Option<Preferences>,
    pub profile: Option<Profile>,
}

impl UserUpdate {
    /// Normalized email this update would store, used for the uniqueness check.
    pub fn normalized_email(&self) -> Option<String> {
        self.email.as_deref().map(|email| email.trim().to_lowercase())
    }

    /// Apply to a copy of `user` and validate the result; `user` is untouched on failure.
    pub fn applied_to(self, user: &User) -> Result<User, ValidationErrors> {
        let mut updated = user.clone();
        let mut errors = ValidationErrors::new();

        if let Some(email) = self.normalized_email() {
            updated.email = email;
        }
        if let Some(first_name) = self.first_name {
            updated.first_name = optional_text(Some(&first_name));
        }
        if let Some(last_name) = self.last_name {
            updated.last_name = optional_text(Some(&last_name));
        }
        if let Some(profile_image) = self.profile_image {
            updated.profile_image = optional_text(Some(&profile_image));
        }
        if let Some(raw) = self.user_type {
            match UserType::from_label(raw.trim()) {
                Some(user_type) => updated.user_type = user_type,
                None => errors.push(
                    "userType",
                    format!(
                        "'{raw}' is not a valid userType; \
                         expected one of: job_seeker, employer, admin"
                    ),
                ),
            }
        }
        if let Some(preferences) = self.preferences {
            updated.preferences = preferences;
        }
        if let Some(profile) = self.profile {
            updated.profile = profile;
        }

        if let Err(schema_errors) = validate_user(&updated) {
            for error in schema_errors.errors() {
                errors.push(error.field, error.message.clone());
            }
        }

        errors.finish(|| updated)
    }
}

/// Schema rules for a complete user record.
pub fn validate_user(user: &User) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if user.clerk_user_id.trim().is_empty() {
        errors.push("clerkUserId", "Clerk User ID is required");
    }
    if user.email.trim().is_empty() {
        errors.push("email", "Email is required");
    }
    max_chars(
        &mut errors,
        "firstName",
        user.first_name.as_deref(),
        NAME_MAX,
        "First name cannot be more than 50 characters",
    );
    max_chars(
        &mut errors,
        "lastName",
        user.last_name.as_deref(),
        NAME_MAX,
        "Last name cannot be more than 50 characters",
    );
    max_chars(
        &mut errors,
        "profile.headline",
        user.profile.headline.as_deref(),
        HEADLINE_MAX,
        "Headline cannot be more than 100 characters",
    );
    max_chars(
        &mut errors,
        "profile.bio",
        user.profile.bio.as_deref(),
        BIO_MAX,
        "Bio cannot be more than 500 characters",
    );
    if let Some(range) = user.preferences.salary_range {
        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                errors.push(
                    "preferences.salaryRange",
                    "Salary range minimum cannot exceed maximum",
                );
            }
        }
    }

    errors.finish(|| ())
}
