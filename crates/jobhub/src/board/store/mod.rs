//! Document collection abstraction the services read and write through.

mod memory;

pub use memory::MemoryCollection;

pub use super::domain::{MalformedId, RecordId};

use std::cmp::Ordering;

use super::domain::{Employer, Job, User};
use super::query::Window;

/// A record stored in a [`Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> &RecordId;
}

impl Document for Job {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Document for Employer {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Document for User {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Boolean filter over one document type.
pub trait Predicate<D>: Send + Sync {
    fn matches(&self, document: &D) -> bool;
}

impl<D, F> Predicate<D> for F
where
    F: Fn(&D) -> bool + Send + Sync,
{
    fn matches(&self, document: &D) -> bool {
        self(document)
    }
}

/// Predicate matching every document.
pub fn everything<D>(_document: &D) -> bool {
    true
}

/// Total order used to sort a result set before windowing.
pub type SortOrder<D> = fn(&D, &D) -> Ordering;

/// Storage contract for one entity collection.
///
/// Implementations provide per-document atomicity only: `modify_one` is the single
/// read-modify-write primitive, and nothing spans more than one document.
pub trait Collection<D: Document>: Send + Sync {
    fn insert(&self, document: D) -> Result<D, StoreError>;

    fn fetch(&self, id: &RecordId) -> Result<Option<D>, StoreError>;

    fn find_one(&self, predicate: &dyn Predicate<D>) -> Result<Option<D>, StoreError>;

    /// Matching documents sorted by `order`, then cut to `window`.
    fn find(
        &self,
        predicate: &dyn Predicate<D>,
        order: SortOrder<D>,
        window: Window,
    ) -> Result<Vec<D>, StoreError>;

    fn count(&self, predicate: &dyn Predicate<D>) -> Result<u64, StoreError>;

    fn replace(&self, document: D) -> Result<(), StoreError>;

    fn remove(&self, id: &RecordId) -> Result<Option<D>, StoreError>;

    /// Atomically apply `apply` to the first matching document and persist the result.
    ///
    /// Returns `None` when nothing matched. Whatever state `apply` leaves the document in is
    /// committed, so callers abandon a change by leaving the document untouched.
    fn modify_one<T, F>(
        &self,
        predicate: &dyn Predicate<D>,
        apply: F,
    ) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut D) -> T;

    /// Snapshot of every document in insertion order.
    fn scan(&self) -> Result<Vec<D>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document already exists")]
    Conflict,
    #[error("document not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
