use std::collections::HashMap;

use crate::board::domain::{Employer, Job};
use crate::board::store::Predicate;

/// Conjunction of the job listing constraints present in a request.
///
/// Recognized parameters: `type`, `category`, `location`, `remote`, `featured`. Anything else
/// is ignored, and an absent or blank parameter leaves its dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub job_type: Option<String>,
    pub category: Option<String>,
    /// Lowercased; matched as a substring.
    pub location: Option<String>,
    pub remote: Option<bool>,
    pub featured: Option<bool>,
    pub employer_id: Option<String>,
}

impl JobFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            job_type: text_param(params, "type"),
            category: text_param(params, "category"),
            location: text_param(params, "location").map(|value| value.to_lowercase()),
            remote: flag_param(params, "remote"),
            featured: flag_param(params, "featured"),
            employer_id: None,
        }
    }

    /// Jobs posted by the employer owned by `user_id`.
    pub fn for_employer(user_id: impl Into<String>) -> Self {
        Self {
            employer_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn for_category(name: impl Into<String>) -> Self {
        Self {
            category: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Predicate<Job> for JobFilter {
    fn matches(&self, job: &Job) -> bool {
        self.job_type
            .as_deref()
            .map_or(true, |wanted| job.job_type.label() == wanted)
            && self
                .category
                .as_deref()
                .map_or(true, |wanted| job.category.label() == wanted)
            && self
                .location
                .as_deref()
                .map_or(true, |needle| job.location.to_lowercase().contains(needle))
            && self.remote.map_or(true, |wanted| job.is_remote == wanted)
            && self.featured.map_or(true, |wanted| job.is_featured == wanted)
            && self
                .employer_id
                .as_deref()
                .map_or(true, |wanted| job.employer_id == wanted)
    }
}

/// Employer listing constraints; only `verified` is recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployerFilter {
    pub verified: Option<bool>,
}

impl EmployerFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            verified: flag_param(params, "verified"),
        }
    }
}

impl Predicate<Employer> for EmployerFilter {
    fn matches(&self, employer: &Employer) -> bool {
        self.verified
            .map_or(true, |wanted| employer.is_verified == wanted)
    }
}

fn text_param(params: &HashMap<String, String>, name: &str) -> Option<String> {
    params
        .get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Present flags compare against the literal `true`; any other value means `false`.
fn flag_param(params: &HashMap<String, String>, name: &str) -> Option<bool> {
    text_param(params, name).map(|value| value == "true")
}
