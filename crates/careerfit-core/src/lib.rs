//! careerfit-core — Question banks, answer collectors, and scoring.
//!
//! This crate defines the assessment data model, the per-section collectors
//! that gather responses, and the scoring and recommendation logic that the
//! report and CLI crates build on.

pub mod assessment;
pub mod collector;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
