mod employer;
mod job;
mod user;

pub use employer::{CompanySize, Employer};
pub use job::{Job, JobCategory, JobType};
pub use user::{
    Application, ApplicationStatus, Education, Experience, Preferences, Profile, SalaryRange,
    SavedJob, User, UserType,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store-assigned document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4().simple().to_string())
    }

    /// Accepts only identifiers in the shape the store issues.
    pub fn parse(raw: &str) -> Result<Self, MalformedId> {
        let trimmed = raw.trim();
        Uuid::try_parse(trimmed)
            .map(|uuid| RecordId(uuid.simple().to_string()))
            .map_err(|_| MalformedId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a caller supplies an identifier the store could never have issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed identifier '{0}'")]
pub struct MalformedId(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_parse_back_to_themselves() {
        let id = RecordId::generate();
        assert_eq!(RecordId::parse(id.as_str()), Ok(id));
    }

    #[test]
    fn hyphenated_uuids_normalize_to_simple_form() {
        let id = RecordId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("valid uuid");
        assert_eq!(id.as_str(), "67e5504410b1426f9247bb680e5fe0c8");
    }

    #[test]
    fn rejects_foreign_shapes() {
        assert!(RecordId::parse("not-an-id").is_err());
        assert!(RecordId::parse("").is_err());
    }
}
