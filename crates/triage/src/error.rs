//! Error types shared across the library

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Dataset not found at {}", path.display())]
  DatasetNotFound { path: PathBuf },

  #[error("Dataset {} has no '{column}' column", path.display())]
  MissingColumn { path: PathBuf, column: String },

  #[error("Recommendations file already exists at {}", path.display())]
  RecommendationsExist { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, TriageError>;
