use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::board::domain::Job;
use crate::board::schema::ValidationErrors;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of", "on",
    "or", "that", "the", "to", "with",
];

/// Parsed free-text job query.
///
/// Terms are lowercase alphanumeric runs with stop words dropped. A job matches when any
/// included term occurs in its title, description or company, unless it contains a term
/// negated with a leading `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl TextQuery {
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationErrors> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(ValidationErrors::single("q", "Search query is required"));
        }

        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for word in raw.split_whitespace() {
            let (negated, word) = match word.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, word),
            };
            let target = if negated { &mut exclude } else { &mut include };
            for term in tokenize(word) {
                if !target.contains(&term) {
                    target.push(term);
                }
            }
        }

        Ok(Self { include, exclude })
    }

    pub fn terms(&self) -> &[String] {
        &self.include
    }

    /// Relevance of `job`, or `None` when it does not match.
    pub fn score(&self, job: &Job) -> Option<f64> {
        let fields = [
            tokenize(&job.title),
            tokenize(&job.description),
            tokenize(&job.company),
        ];

        let excluded: HashSet<&str> = self.exclude.iter().map(String::as_str).collect();
        if fields
            .iter()
            .flatten()
            .any(|token| excluded.contains(token.as_str()))
        {
            return None;
        }

        let score: f64 = fields
            .iter()
            .map(|tokens| field_score(tokens, &self.include))
            .sum();
        (score > 0.0).then_some(score)
    }

    /// Matching jobs ordered by descending score, newest first among equal scores.
    pub fn rank(&self, jobs: Vec<Job>) -> Vec<ScoredJob> {
        let mut scored: Vec<ScoredJob> = jobs
            .into_iter()
            .filter_map(|job| self.score(&job).map(|score| ScoredJob { job, score }))
            .collect();
        scored.sort_by(|left, right| {
            right
                .score
                .partial_cmp(&left.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| right.job.created_at.cmp(&left.job.created_at))
        });
        scored
    }
}

/// A search hit with its relevance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: Job,
    pub score: f64,
}

/// Term-frequency contribution of one field, damped so short fields weigh more per hit.
fn field_score(tokens: &[String], terms: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let hits = tokens
        .iter()
        .filter(|token| terms.iter().any(|term| term == *token))
        .count();
    if hits == 0 {
        return 0.0;
    }

    let frequency = hits as f64 / tokens.len() as f64;
    hits as f64 * (0.5 + 0.5 * frequency)
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|character: char| !character.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::domain::{JobCategory, JobType, RecordId};
    use chrono::{Duration, Utc};

    fn job(title: &str, description: &str, age_hours: i64) -> Job {
        let created_at = Utc::now() - Duration::hours(age_hours);
        Job {
            id: RecordId::generate(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::Contract,
            category: JobCategory::Engineering,
            salary: "DOE".to_string(),
            description: description.to_string(),
            requirements: vec!["Grit".to_string()],
            is_remote: true,
            is_featured: false,
            is_urgent: false,
            employer_id: "user_acme".to_string(),
            application_count: 0,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn missing_or_blank_query_is_rejected() {
        assert!(TextQuery::parse(None).unwrap_err().has_field("q"));
        assert!(TextQuery::parse(Some("   ")).is_err());
    }

    #[test]
    fn parse_drops_stop_words_and_splits_negations() {
        let query = TextQuery::parse(Some("The Rust engineer -java")).expect("valid");
        assert_eq!(query.terms(), ["rust", "engineer"]);
        assert_eq!(query.exclude, vec!["java".to_string()]);
    }

    #[test]
    fn ranks_by_term_frequency() {
        let strong = job("Rust Engineer", "Write Rust all day, Rust everywhere", 5);
        let weak = job("Engineer", "Some Rust exposure", 1);
        let miss = job("Designer", "Figma", 0);

        let query = TextQuery::parse(Some("rust")).expect("valid");
        let ranked = query.rank(vec![weak.clone(), miss, strong.clone()]);

        let ids: Vec<_> = ranked.iter().map(|hit| hit.job.id.clone()).collect();
        assert_eq!(ids, vec![strong.id, weak.id]);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn negated_terms_exclude_matches() {
        let query = TextQuery::parse(Some("engineer -java")).expect("valid");
        assert!(query
            .score(&job("Java Engineer", "Spring", 0))
            .is_none());
        assert!(query.score(&job("Rust Engineer", "Tokio", 0)).is_some());
    }
}
