//! FILENAME: core/drill-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("Invalid node id: {0:?}")]
    InvalidNodeId(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DrillError>;
