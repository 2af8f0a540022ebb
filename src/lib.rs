//! Main library crate for the sanctions refiner
//!
//! Ingests a flat sanctions-list export, normalizes inconsistent fields,
//! consolidates alias rows into one record per sanctioned entity, and
//! assesses the data quality of the input.

pub mod common;
pub mod domain;
pub mod infra;
pub mod observability;
pub mod pipeline;

// Re-export commonly used types
pub use domain::{Entity, EnrichedRecord, Grouped, QualitySummary, RawRecord};
