//! Triage - symptom questionnaire browsing and co-occurrence analysis
//!
//! Loads patient questionnaire records, exposes the free-text answers logged
//! per symptom, and derives which symptoms tend to be reported together.

pub mod analysis;
pub mod commands;
pub mod config;
pub mod cooccurrence;
pub mod dataset;
pub mod display;
pub mod error;
pub mod extract;
pub mod graph;
pub mod recommendations;
pub mod record;
pub mod relations;
pub mod report;
pub mod similarity;

pub use analysis::{analyze, AnalysisOptions, AnalysisReport};
pub use config::TriageConfig;
pub use cooccurrence::CooccurrenceMatrix;
pub use error::{Result, TriageError};
pub use graph::SymptomGraph;
pub use record::{Record, SymptomEntry};
pub use similarity::SimilarityMatrix;
