//! Job board core: entity schemas, query building, pagination, text search, statistics and the
//! resource services that compose them behind an axum router.

pub mod board;
pub mod config;
pub mod error;
pub mod telemetry;
