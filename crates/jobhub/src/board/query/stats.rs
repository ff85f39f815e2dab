use std::collections::HashMap;

use serde::Serialize;

use crate::board::domain::{Employer, Job};

/// Number of documents sharing one field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    #[serde(rename = "_id")]
    pub key: String,
    pub count: u64,
}

/// Per-category job counts with featured and remote sub-counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub name: String,
    pub count: u64,
    pub featured_jobs: u64,
    pub remote_jobs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub total_jobs: u64,
    pub featured_jobs: u64,
    pub remote_jobs: u64,
    pub categories: Vec<GroupCount>,
    pub types: Vec<GroupCount>,
}

impl JobStats {
    pub fn collect(jobs: &[Job]) -> Self {
        Self {
            total_jobs: jobs.len() as u64,
            featured_jobs: jobs.iter().filter(|job| job.is_featured).count() as u64,
            remote_jobs: jobs.iter().filter(|job| job.is_remote).count() as u64,
            categories: group_counts(jobs, |job| job.category.label()),
            types: group_counts(jobs, |job| job.job_type.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerStats {
    pub total_employers: u64,
    pub verified_employers: u64,
    pub industries: Vec<GroupCount>,
    pub sizes: Vec<GroupCount>,
}

impl EmployerStats {
    pub fn collect(employers: &[Employer]) -> Self {
        Self {
            total_employers: employers.len() as u64,
            verified_employers: employers
                .iter()
                .filter(|employer| employer.is_verified)
                .count() as u64,
            industries: group_counts(employers, |employer| employer.industry.as_str()),
            sizes: group_counts(employers, |employer| employer.size.label()),
        }
    }
}

pub fn group_counts<D>(documents: &[D], key: impl Fn(&D) -> &str) -> Vec<GroupCount> {
    grouped(documents, key, |count: &mut u64, _| *count += 1, |count| *count)
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}

pub fn category_summaries(jobs: &[Job]) -> Vec<CategorySummary> {
    grouped(
        jobs,
        |job| job.category.label(),
        |summary: &mut (u64, u64, u64), job| {
            summary.0 += 1;
            summary.1 += u64::from(job.is_featured);
            summary.2 += u64::from(job.is_remote);
        },
        |summary| summary.0,
    )
    .into_iter()
    .map(|(name, (count, featured_jobs, remote_jobs))| CategorySummary {
        name,
        count,
        featured_jobs,
        remote_jobs,
    })
    .collect()
}

/// Folds documents into groups keyed by `key`, sorted by descending `count`.
///
/// Groups with equal counts keep the order in which their key first appeared.
fn grouped<D, S: Default>(
    documents: &[D],
    key: impl Fn(&D) -> &str,
    fold: impl Fn(&mut S, &D),
    count: impl Fn(&S) -> u64,
) -> Vec<(String, S)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, S)> = Vec::new();

    for document in documents {
        let group_key = key(document);
        let index = match positions.get(group_key) {
            Some(index) => *index,
            None => {
                positions.insert(group_key.to_string(), groups.len());
                groups.push((group_key.to_string(), S::default()));
                groups.len() - 1
            }
        };
        fold(&mut groups[index].1, document);
    }

    groups.sort_by(|left, right| count(&right.1).cmp(&count(&left.1)));
    groups
}
