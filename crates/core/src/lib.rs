//! Domain model for the Kukkuta Kendra poultry-farming platform.
//!
//! Typed views of the backend-owned records (farmers, routine logs, mills,
//! feed orders, production reports) plus the static production-report
//! table used by the report viewer. This crate does no I/O.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod farmer;
pub mod mill;
pub mod production;
pub mod report;
pub mod roles;
pub mod routine;
pub mod types;
