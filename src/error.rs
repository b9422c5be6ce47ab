//! Error types and input validation for the Civic Lens service

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Longest search query accepted from callers
pub const MAX_QUERY_LEN: usize = 500;

/// Failure to load the politician dataset at startup.
///
/// Always fatal: the service must not serve traffic without its data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed politician data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate politician id: {0}")]
    DuplicateId(u32),
    #[error("Invalid politician record (id {id}): {reason}")]
    Invalid { id: u32, reason: String },
}

/// Application error types surfaced to callers
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Message without the category prefix, used for `detail` bodies
    pub fn detail(&self) -> &str {
        match self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => msg,
        }
    }

    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 1,
            AppError::NotFound(_) => 3,
            AppError::Internal(_) => 5,
        }
    }

    pub fn politician_not_found(id: u32) -> Self {
        AppError::NotFound(format!("Politician with id {} not found", id))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(AppError::InvalidInput(format!(
            "Query too long, maximum {} characters",
            MAX_QUERY_LEN
        )));
    }

    Ok(())
}

/// Parse a comma-separated id list such as `"1, 2,3"`
pub fn parse_id_list(raw: &str) -> Result<Vec<u32>, AppError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| AppError::InvalidInput(format!("Invalid politician id: {:?}", part)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(AppError::InvalidInput("At least one id is required".to_string()));
    }

    Ok(ids)
}
