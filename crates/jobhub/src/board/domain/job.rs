use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

/// A posted job opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub category: JobCategory,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub is_remote: bool,
    pub is_featured: bool,
    pub is_urgent: bool,
    /// Owning employer's `userId`; not enforced as a reference by the store.
    pub employer_id: String,
    pub application_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Human readable age of the posting relative to `now`.
    pub fn posted_date(&self, now: DateTime<Utc>) -> String {
        let hours = (now - self.created_at).num_hours();
        let days = hours / 24;

        if hours < 1 {
            "Just now".to_string()
        } else if hours < 24 {
            format!("{hours} hours ago")
        } else if days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{days} days ago")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
    Temporary,
    Volunteer,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
        JobType::Temporary,
        JobType::Volunteer,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
            JobType::Temporary => "Temporary",
            JobType::Volunteer => "Volunteer",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobCategory {
    Technology,
    Design,
    Marketing,
    Sales,
    Business,
    #[serde(rename = "Customer Service")]
    CustomerService,
    Healthcare,
    Education,
    Engineering,
    Finance,
    #[serde(rename = "Human Resources")]
    HumanResources,
    Operations,
}

impl JobCategory {
    pub const ALL: [JobCategory; 12] = [
        JobCategory::Technology,
        JobCategory::Design,
        JobCategory::Marketing,
        JobCategory::Sales,
        JobCategory::Business,
        JobCategory::CustomerService,
        JobCategory::Healthcare,
        JobCategory::Education,
        JobCategory::Engineering,
        JobCategory::Finance,
        JobCategory::HumanResources,
        JobCategory::Operations,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            JobCategory::Technology => "Technology",
            JobCategory::Design => "Design",
            JobCategory::Marketing => "Marketing",
            JobCategory::Sales => "Sales",
            JobCategory::Business => "Business",
            JobCategory::CustomerService => "Customer Service",
            JobCategory::Healthcare => "Healthcare",
            JobCategory::Education => "Education",
            JobCategory::Engineering => "Engineering",
            JobCategory::Finance => "Finance",
            JobCategory::HumanResources => "Human Resources",
            JobCategory::Operations => "Operations",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == value)
    }
}
