use std::collections::HashMap;

use chrono::Utc;
use tracing::info;

use super::{BoardService, Resource, ServiceError};
use crate::board::domain::{Employer, Job, User};
use crate::board::query::{
    category_summaries, newest_first, CategorySummary, JobFilter, JobStats, Page, PageRequest,
    ScoredJob, TextQuery, Totals,
};
use crate::board::schema::{JobDraft, JobPatch, Stamp};
use crate::board::store::Collection;

impl<J, E, U> BoardService<J, E, U>
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    /// Filtered, newest-first page of jobs.
    pub fn list_jobs(&self, params: &HashMap<String, String>) -> Result<Page<Job>, ServiceError> {
        let request = PageRequest::from_params(params)?;
        let filter = JobFilter::from_params(params);
        self.page_of_jobs(&filter, request)
    }

    pub(crate) fn page_of_jobs(
        &self,
        filter: &JobFilter,
        request: PageRequest,
    ) -> Result<Page<Job>, ServiceError> {
        let items = self.jobs.find(filter, newest_first, request.window())?;
        let total = self.jobs.count(filter)?;
        let pagination = request.describe(items.len(), total, Totals::Jobs);
        Ok(Page { items, pagination })
    }

    /// Relevance-ranked page of jobs matching the `q` parameter.
    pub fn search_jobs(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Page<ScoredJob>, ServiceError> {
        let query = TextQuery::parse(params.get("q").map(String::as_str))?;
        let request = PageRequest::from_params(params)?;

        let ranked = query.rank(self.jobs.scan()?);
        let total = ranked.len() as u64;
        let items = request.window().slice(ranked);
        let pagination = request.describe(items.len(), total, Totals::Jobs);
        Ok(Page { items, pagination })
    }

    pub fn get_job(&self, raw_id: &str) -> Result<Job, ServiceError> {
        let id = Self::parse_id(Resource::Job, raw_id)?;
        self.jobs
            .fetch(&id)?
            .ok_or(ServiceError::not_found(Resource::Job))
    }

    pub fn create_job(&self, draft: JobDraft) -> Result<Job, ServiceError> {
        let job = draft.validate(Stamp::fresh(Utc::now()))?;
        let stored = self.jobs.insert(job)?;
        info!(job_id = %stored.id, employer_id = %stored.employer_id, "job created");
        Ok(stored)
    }

    /// Overlay `patch` on the stored job and validate the merged record before writing.
    pub fn update_job(&self, raw_id: &str, patch: JobPatch) -> Result<Job, ServiceError> {
        let existing = self.get_job(raw_id)?;

        let mut draft = JobDraft::from(&existing);
        draft.merge(patch);
        let stamp = Stamp::touched(existing.id.clone(), existing.created_at, Utc::now());
        let updated = draft.validate(stamp)?;

        self.jobs.replace(updated.clone())?;
        info!(job_id = %updated.id, "job updated");
        Ok(updated)
    }

    /// Removes the job outright; applications referencing it are left in place.
    pub fn delete_job(&self, raw_id: &str) -> Result<Job, ServiceError> {
        let id = Self::parse_id(Resource::Job, raw_id)?;
        let removed = self
            .jobs
            .remove(&id)?
            .ok_or(ServiceError::not_found(Resource::Job))?;
        info!(job_id = %removed.id, "job deleted");
        Ok(removed)
    }

    pub fn job_stats(&self) -> Result<JobStats, ServiceError> {
        Ok(JobStats::collect(&self.jobs.scan()?))
    }

    pub fn categories(&self) -> Result<Vec<CategorySummary>, ServiceError> {
        Ok(category_summaries(&self.jobs.scan()?))
    }

    /// Newest-first page of jobs in the category named by `name`, matched exactly.
    pub fn category_jobs(
        &self,
        name: &str,
        params: &HashMap<String, String>,
    ) -> Result<Page<Job>, ServiceError> {
        let request = PageRequest::from_params(params)?;
        self.page_of_jobs(&JobFilter::for_category(name), request)
    }
}
