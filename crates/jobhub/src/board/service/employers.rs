use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::{BoardService, Resource, ServiceError};
use crate::board::domain::{Employer, Job, RecordId, User};
use crate::board::query::{
    by_company_name, EmployerFilter, EmployerStats, JobFilter, Page, PageRequest, Totals,
};
use crate::board::schema::{EmployerDraft, EmployerPatch, Stamp};
use crate::board::store::Collection;

const DUPLICATE_EMPLOYER: &str = "Employer with this company name or user ID already exists";
const EMPLOYER_HAS_JOBS: &str =
    "Cannot delete employer with active jobs. Please delete all jobs first.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerSummary {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An employer's public summary alongside a page of its jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployerJobs {
    pub employer: EmployerSummary,
    pub jobs: Page<Job>,
}

impl<J, E, U> BoardService<J, E, U>
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    /// Filtered page of employers ordered by company name.
    pub fn list_employers(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Page<Employer>, ServiceError> {
        let request = PageRequest::from_params(params)?;
        let filter = EmployerFilter::from_params(params);

        let items = self
            .employers
            .find(&filter, by_company_name, request.window())?;
        let total = self.employers.count(&filter)?;
        let pagination = request.describe(items.len(), total, Totals::Employers);
        Ok(Page { items, pagination })
    }

    pub fn get_employer(&self, raw_id: &str) -> Result<Employer, ServiceError> {
        let id = Self::parse_id(Resource::Employer, raw_id)?;
        self.employers
            .fetch(&id)?
            .ok_or(ServiceError::not_found(Resource::Employer))
    }

    /// Rejects a company name already taken (ignoring case) or an owner that already has an
    /// employer.
    pub fn create_employer(&self, draft: EmployerDraft) -> Result<Employer, ServiceError> {
        let employer = draft.validate(Stamp::fresh(Utc::now()))?;

        let company_name = employer.company_name.to_lowercase();
        let user_id = employer.user_id.clone();
        let existing = self.employers.find_one(&|candidate: &Employer| {
            candidate.company_name.to_lowercase() == company_name || candidate.user_id == user_id
        })?;
        if existing.is_some() {
            warn!(company_name = %employer.company_name, "duplicate employer rejected");
            return Err(ServiceError::Duplicate(DUPLICATE_EMPLOYER.to_string()));
        }

        let stored = self.employers.insert(employer)?;
        info!(employer_id = %stored.id, user_id = %stored.user_id, "employer created");
        Ok(stored)
    }

    pub fn update_employer(
        &self,
        raw_id: &str,
        patch: EmployerPatch,
    ) -> Result<Employer, ServiceError> {
        let existing = self.get_employer(raw_id)?;

        let mut draft = EmployerDraft::from(&existing);
        draft.merge(patch);
        let stamp = Stamp::touched(existing.id.clone(), existing.created_at, Utc::now());
        let updated = draft.validate(stamp)?;

        if !updated
            .company_name
            .eq_ignore_ascii_case(&existing.company_name)
        {
            self.ensure_company_name_free(&updated.company_name, &existing.id)?;
        }

        self.employers.replace(updated.clone())?;
        info!(employer_id = %updated.id, "employer updated");
        Ok(updated)
    }

    /// Refuses while any job still names this employer's owner as its `employerId`.
    pub fn delete_employer(&self, raw_id: &str) -> Result<Employer, ServiceError> {
        let employer = self.get_employer(raw_id)?;

        let referencing = self.jobs.count(&JobFilter::for_employer(&employer.user_id))?;
        if referencing > 0 {
            warn!(employer_id = %employer.id, referencing, "employer delete blocked by jobs");
            return Err(ServiceError::Integrity(EMPLOYER_HAS_JOBS.to_string()));
        }

        let removed = self
            .employers
            .remove(&employer.id)?
            .ok_or(ServiceError::not_found(Resource::Employer))?;
        info!(employer_id = %removed.id, "employer deleted");
        Ok(removed)
    }

    pub fn employer_jobs(
        &self,
        raw_id: &str,
        params: &HashMap<String, String>,
    ) -> Result<EmployerJobs, ServiceError> {
        let request = PageRequest::from_params(params)?;
        let employer = self.get_employer(raw_id)?;
        let jobs = self.page_of_jobs(&JobFilter::for_employer(&employer.user_id), request)?;

        Ok(EmployerJobs {
            employer: EmployerSummary {
                company_name: employer.company_name,
                description: employer.description,
            },
            jobs,
        })
    }

    pub fn employer_stats(&self) -> Result<EmployerStats, ServiceError> {
        Ok(EmployerStats::collect(&self.employers.scan()?))
    }

    fn ensure_company_name_free(
        &self,
        company_name: &str,
        owner: &RecordId,
    ) -> Result<(), ServiceError> {
        let wanted = company_name.to_lowercase();
        let clash = self.employers.find_one(&|candidate: &Employer| {
            &candidate.id != owner && candidate.company_name.to_lowercase() == wanted
        })?;
        match clash {
            Some(_) => Err(ServiceError::Duplicate(DUPLICATE_EMPLOYER.to_string())),
            None => Ok(()),
        }
    }
}
