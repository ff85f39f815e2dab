use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::board::schema::ValidationErrors;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Requested page of a listing, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Reads `page` and `limit`, falling back to the defaults when absent or blank.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let page = integer_param(&mut errors, params, "page", DEFAULT_PAGE);
        let limit = integer_param(&mut errors, params, "limit", DEFAULT_LIMIT);
        errors.finish(|| Self { page, limit })
    }

    /// Offset window for this page. Pages below 1 and limits below 1 select nothing.
    pub fn window(&self) -> Window {
        if self.page < 1 || self.limit < 1 {
            return Window::empty();
        }

        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let offset = usize::try_from(self.page - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(limit);
        Window::new(offset, limit)
    }

    pub fn total_pages(&self, total_matching: u64) -> u64 {
        if self.limit < 1 {
            return 0;
        }
        total_matching.div_ceil(self.limit as u64)
    }

    pub fn describe(&self, count: usize, total_matching: u64, totals: Totals) -> PageDescriptor {
        PageDescriptor {
            current: self.page,
            total: self.total_pages(total_matching),
            count,
            total_matching,
            totals,
        }
    }
}

fn integer_param(
    errors: &mut ValidationErrors,
    params: &HashMap<String, String>,
    name: &'static str,
    default: i64,
) -> i64 {
    match params.get(name).map(|raw| raw.trim()) {
        None | Some("") => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            errors.push(name, format!("{name} must be an integer"));
            default
        }),
    }
}

/// Offset/limit slice of a sorted result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    pub const fn empty() -> Self {
        Self::new(0, 0)
    }

    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

/// Which collection a descriptor counts, naming its total field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Totals {
    Jobs,
    Employers,
}

impl Totals {
    pub const fn key(self) -> &'static str {
        match self {
            Totals::Jobs => "totalJobs",
            Totals::Employers => "totalEmployers",
        }
    }
}

/// Pagination block returned alongside every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub current: i64,
    pub total: u64,
    pub count: usize,
    pub total_matching: u64,
    pub totals: Totals,
}

impl Serialize for PageDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("current", &self.current)?;
        map.serialize_entry("total", &self.total)?;
        map.serialize_entry("count", &self.count)?;
        map.serialize_entry(self.totals.key(), &self.total_matching)?;
        map.end()
    }
}
