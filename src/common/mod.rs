// Shared error types used across the application

pub mod error;

pub use error::{RefineryError, Result};
