use serde::{Deserialize, Serialize};

use super::{enum_value, max_chars, overwrite_text, required_text, Stamp, ValidationErrors};
use crate::board::domain::{Job, JobCategory, JobType};

const TITLE_MAX: usize = 100;
const COMPANY_MAX: usize = 50;

/// Unvalidated job fields as submitted on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDraft {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub is_remote: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_urgent: Option<bool>,
    pub employer_id: Option<String>,
    #[serde(skip)]
    pub application_count: u32,
}

/// Fields accepted on update. `employerId` is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub is_remote: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_urgent: Option<bool>,
}

impl From<&Job> for JobDraft {
    fn from(job: &Job) -> Self {
        Self {
            title: Some(job.title.clone()),
            company: Some(job.company.clone()),
            location: Some(job.location.clone()),
            job_type: Some(job.job_type.label().to_string()),
            category: Some(job.category.label().to_string()),
            salary: Some(job.salary.clone()),
            description: Some(job.description.clone()),
            requirements: Some(job.requirements.clone()),
            is_remote: Some(job.is_remote),
            is_featured: Some(job.is_featured),
            is_urgent: Some(job.is_urgent),
            employer_id: Some(job.employer_id.clone()),
            application_count: job.application_count,
        }
    }
}

impl JobDraft {
    /// Overlay the supplied patch fields; absent and blank values keep the current ones.
    pub fn merge(&mut self, patch: JobPatch) {
        overwrite_text(&mut self.title, patch.title);
        overwrite_text(&mut self.company, patch.company);
        overwrite_text(&mut self.location, patch.location);
        overwrite_text(&mut self.job_type, patch.job_type);
        overwrite_text(&mut self.category, patch.category);
        overwrite_text(&mut self.salary, patch.salary);
        overwrite_text(&mut self.description, patch.description);
        if patch.requirements.is_some() {
            self.requirements = patch.requirements;
        }
        if patch.is_remote.is_some() {
            self.is_remote = patch.is_remote;
        }
        if patch.is_featured.is_some() {
            self.is_featured = patch.is_featured;
        }
        if patch.is_urgent.is_some() {
            self.is_urgent = patch.is_urgent;
        }
    }

    pub fn validate(self, stamp: Stamp) -> Result<Job, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required_text(
            &mut errors,
            "title",
            self.title.as_deref(),
            "Job title is required",
        );
        max_chars(
            &mut errors,
            "title",
            Some(&title),
            TITLE_MAX,
            "Title cannot be more than 100 characters",
        );
        let company = required_text(
            &mut errors,
            "company",
            self.company.as_deref(),
            "Company name is required",
        );
        max_chars(
            &mut errors,
            "company",
            Some(&company),
            COMPANY_MAX,
            "Company name cannot be more than 50 characters",
        );
        let location = required_text(
            &mut errors,
            "location",
            self.location.as_deref(),
            "Location is required",
        );
        let job_type = enum_value(
            &mut errors,
            "type",
            self.job_type.as_deref(),
            "Job type is required",
            &JobType::ALL,
            JobType::label,
        );
        let category = enum_value(
            &mut errors,
            "category",
            self.category.as_deref(),
            "Category is required",
            &JobCategory::ALL,
            JobCategory::label,
        );
        let salary = required_text(
            &mut errors,
            "salary",
            self.salary.as_deref(),
            "Salary information is required",
        );
        let description = required_text(
            &mut errors,
            "description",
            self.description.as_deref(),
            "Job description is required",
        );
        let requirements = self.requirements.unwrap_or_default();
        if requirements.is_empty() || requirements.iter().any(|entry| entry.trim().is_empty()) {
            errors.push("requirements", "At least one requirement is needed");
        }
        let employer_id = required_text(
            &mut errors,
            "employerId",
            self.employer_id.as_deref(),
            "Employer ID is required",
        );

        let is_remote = self.is_remote.unwrap_or(false);
        let is_featured = self.is_featured.unwrap_or(false);
        let is_urgent = self.is_urgent.unwrap_or(false);
        let application_count = self.application_count;

        match (job_type, category) {
            (Some(job_type), Some(category)) if errors.is_empty() => Ok(Job {
                id: stamp.id,
                title,
                company,
                location,
                job_type,
                category,
                salary,
                description,
                requirements,
                is_remote,
                is_featured,
                is_urgent,
                employer_id,
                application_count,
                created_at: stamp.created_at,
                updated_at: stamp.updated_at,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn complete_draft() -> JobDraft {
        JobDraft {
            title: Some("  Platform Engineer ".to_string()),
            company: Some("TechCorp".to_string()),
            location: Some("Lisbon".to_string()),
            job_type: Some("Full-time".to_string()),
            category: Some("Technology".to_string()),
            salary: Some("$120k".to_string()),
            description: Some("Run the platform".to_string()),
            requirements: Some(vec!["Rust".to_string(), "Kubernetes".to_string()]),
            employer_id: Some("user_42".to_string()),
            ..JobDraft::default()
        }
    }

    #[test]
    fn complete_draft_validates_with_defaults() {
        let job = complete_draft()
            .validate(Stamp::fresh(Utc::now()))
            .expect("draft is valid");

        assert_eq!(job.title, "Platform Engineer");
        assert_eq!(job.job_type, JobType::FullTime);
        assert!(!job.is_remote && !job.is_featured && !job.is_urgent);
        assert_eq!(job.application_count, 0);
    }

    #[test]
    fn missing_or_empty_requirements_are_rejected() {
        for requirements in [None, Some(Vec::new()), Some(vec![" ".to_string()])] {
            let draft = JobDraft {
                requirements,
                ..complete_draft()
            };
            let errors = draft
                .validate(Stamp::fresh(Utc::now()))
                .expect_err("requirements invalid");
            assert!(errors.has_field("requirements"));
            assert_eq!(errors.errors().len(), 1);
        }
    }

    #[test]
    fn reports_every_invalid_field_at_once() {
        let draft = JobDraft {
            title: Some("x".repeat(101)),
            job_type: Some("Gig".to_string()),
            category: None,
            salary: Some(String::new()),
            ..complete_draft()
        };

        let errors = draft
            .validate(Stamp::fresh(Utc::now()))
            .expect_err("draft invalid");
        for field in ["title", "type", "category", "salary"] {
            assert!(errors.has_field(field), "expected error for {field}");
        }
        assert_eq!(errors.errors().len(), 4);
    }

    #[test]
    fn merge_only_overwrites_supplied_fields() {
        let mut draft = complete_draft();
        draft.merge(JobPatch {
            title: Some("Staff Engineer".to_string()),
            location: Some(String::new()),
            is_remote: Some(true),
            ..JobPatch::default()
        });

        assert_eq!(draft.title.as_deref(), Some("Staff Engineer"));
        assert_eq!(draft.location.as_deref(), Some("Lisbon"));
        assert_eq!(draft.is_remote, Some(true));
        assert_eq!(draft.employer_id.as_deref(), Some("user_42"));
    }
}
