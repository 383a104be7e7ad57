//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (pool sizes > 0, non-empty paths and filters)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BrowscapConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::BrowscapConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration, collecting every problem.
pub fn validate_config(config: &BrowscapConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.data.ini_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("data.ini_path", "must not be empty"));
    }
    if config.lookup.pool_capacity == 0 {
        errors.push(ValidationError::new("lookup.pool_capacity", "must be greater than 0"));
    }
    if config.lookup.buffer_capacity == 0 {
        errors.push(ValidationError::new("lookup.buffer_capacity", "must be greater than 0"));
    }
    if config.observability.log_filter.trim().is_empty() {
        errors.push(ValidationError::new("observability.log_filter", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
