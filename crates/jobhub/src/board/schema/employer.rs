use serde::{Deserialize, Serialize};

use super::{
    enum_value, max_chars, optional_text, overwrite_text, required_text, Stamp, ValidationErrors,
};
use crate::board::domain::{CompanySize, Employer};

const COMPANY_NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;

/// Unvalidated employer fields as submitted on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployerDraft {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub user_id: Option<String>,
    #[serde(skip)]
    pub is_verified: bool,
    #[serde(skip)]
    pub job_count: u32,
}

/// Fields accepted on update. The owning `userId` never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployerPatch {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub is_verified: Option<bool>,
}

impl From<&Employer> for EmployerDraft {
    fn from(employer: &Employer) -> Self {
        Self {
            company_name: Some(employer.company_name.clone()),
            description: employer.description.clone(),
            website: employer.website.clone(),
            industry: Some(employer.industry.clone()),
            size: Some(employer.size.label().to_string()),
            location: Some(employer.location.clone()),
            contact_email: Some(employer.contact_email.clone()),
            user_id: Some(employer.user_id.clone()),
            is_verified: employer.is_verified,
            job_count: employer.job_count,
        }
    }
}

impl EmployerDraft {
    pub fn merge(&mut self, patch: EmployerPatch) {
        overwrite_text(&mut self.company_name, patch.company_name);
        overwrite_text(&mut self.description, patch.description);
        overwrite_text(&mut self.website, patch.website);
        overwrite_text(&mut self.industry, patch.industry);
        overwrite_text(&mut self.size, patch.size);
        overwrite_text(&mut self.location, patch.location);
        overwrite_text(&mut self.contact_email, patch.contact_email);
        if let Some(verified) = patch.is_verified {
            self.is_verified = verified;
        }
    }

    /// The trimmed company name used for the uniqueness check, if one was supplied.
    pub fn normalized_company_name(&self) -> Option<String> {
        optional_text(self.company_name.as_deref())
    }

    pub fn validate(self, stamp: Stamp) -> Result<Employer, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let company_name = required_text(
            &mut errors,
            "companyName",
            self.company_name.as_deref(),
            "Company name is required",
        );
        max_chars(
            &mut errors,
            "companyName",
            Some(&company_name),
            COMPANY_NAME_MAX,
            "Company name cannot be more than 100 characters",
        );
        max_chars(
            &mut errors,
            "description",
            self.description.as_deref(),
            DESCRIPTION_MAX,
            "Description cannot be more than 500 characters",
        );
        let industry = required_text(
            &mut errors,
            "industry",
            self.industry.as_deref(),
            "Industry is required",
        );
        let size = enum_value(
            &mut errors,
            "size",
            self.size.as_deref(),
            "Company size is required",
            &CompanySize::ALL,
            CompanySize::label,
        );
        let location = required_text(
            &mut errors,
            "location",
            self.location.as_deref(),
            "Location is required",
        );
        let contact_email = required_text(
            &mut errors,
            "contactEmail",
            self.contact_email.as_deref(),
            "Contact email is required",
        )
        .to_lowercase();
        let user_id = required_text(
            &mut errors,
            "userId",
            self.user_id.as_deref(),
            "User ID is required",
        );

        match size {
            Some(size) if errors.is_empty() => Ok(Employer {
                id: stamp.id,
                company_name,
                description: self.description.filter(|text| !text.is_empty()),
                website: optional_text(self.website.as_deref()),
                industry,
                size,
                location,
                contact_email,
                user_id,
                is_verified: self.is_verified,
                job_count: self.job_count,
                created_at: stamp.created_at,
                updated_at: stamp.updated_at,
            }),
            _ => Err(errors),
        }
    }
}
