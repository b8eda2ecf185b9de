use thiserror::Error;
use sqlx::Error as SqlxError;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Storage error: {0}")]
    Storage(#[from] SqlxError),

    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] JsonError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Calculation failed: {0}")]
    CalculationFailed(String),

    #[error("No breakdown available: calculate the estimate first")]
    BreakdownMissing,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for EstimatorError {
    fn from(err: anyhow::Error) -> Self {
        EstimatorError::Unknown(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
