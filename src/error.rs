//! Error types for the pay calculator.
//!
//! The calculators themselves never fail; the only fallible paths are
//! looking up a pay level by index and reading configuration from the
//! environment.

use thiserror::Error;

/// Errors raised by the library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SalaryError {
    /// The requested index does not exist in the pay matrix table.
    #[error("unknown pay level index {index} (table has {count} levels)")]
    UnknownLevel { index: usize, count: usize },
    /// A configuration value could not be used.
    #[error("invalid configuration for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SalaryError>;
