//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the dashboard API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while loading a local dataset export
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid date '{value}' in accident {id}")]
    InvalidDate { id: i64, value: String },
}

/// Errors in a region grouping table
#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Failed to read region table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid region table JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Region table is empty")]
    Empty,

    #[error("Region id must not be empty")]
    EmptyId,

    #[error("Duplicate region id: {0}")]
    DuplicateId(String),
}

/// Errors that can occur during heatmap rendering
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No regions to render")]
    EmptyRegions,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
