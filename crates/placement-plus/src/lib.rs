//! Placement Plus domain core.
//!
//! The placement workflow (statistics aggregation, eligibility evaluation, and
//! the transactional recording service) lives under [`workflows::placements`];
//! `config`, `telemetry`, and `error` carry the service-wide plumbing.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
