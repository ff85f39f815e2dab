//! Job, employer, and user resources.
//!
//! Requests flow through the filter builder and pager in [`query`], into the resource services
//! in [`service`], which read and write through the [`store::Collection`] abstraction.

pub mod domain;
pub mod query;
pub mod router;
pub mod schema;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationStatus, CompanySize, Employer, Job, JobCategory, JobType, SavedJob,
    User, UserType,
};
pub use router::{board_router, RouterOptions};
pub use service::{BoardService, ServiceError};
pub use store::{Collection, MemoryCollection, RecordId, StoreError};
