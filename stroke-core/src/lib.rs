//! stroke-core: Shared HTTP infrastructure for the stroke risk web application.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

