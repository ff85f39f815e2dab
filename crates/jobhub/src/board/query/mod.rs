//! Filter building, pagination, text search and grouped statistics.

mod filter;
mod pager;
mod search;
mod stats;

pub use filter::{EmployerFilter, JobFilter};
pub use pager::{PageDescriptor, PageRequest, Totals, Window, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use search::{ScoredJob, TextQuery};
pub use stats::{
    category_summaries, group_counts, CategorySummary, EmployerStats, GroupCount, JobStats,
};

use std::cmp::Ordering;

use super::domain::{Employer, Job};

/// Default job listing order.
pub fn newest_first(left: &Job, right: &Job) -> Ordering {
    right.created_at.cmp(&left.created_at)
}

/// Default employer listing order.
pub fn by_company_name(left: &Employer, right: &Employer) -> Ordering {
    left.company_name.cmp(&right.company_name)
}

/// One page of results plus its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageDescriptor,
}
