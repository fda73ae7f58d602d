use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("No pricing policy effective at {0}")]
    NoPricingAvailable(DateTime<Utc>),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
