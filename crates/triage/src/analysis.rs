//! Full symptom relationship analysis
//!
//! Runs every stage over one immutable set of records. Co-occurrence,
//! relations and the graph form one chain; similarity is computed over the
//! co-occurring symptoms independently of the counts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::cooccurrence::{symptom_combinations, CooccurrenceMatrix};
use crate::graph::{SymptomGraph, DEFAULT_MIN_WEIGHT};
use crate::record::Record;
use crate::relations::{find_related, SymptomRelations, DEFAULT_TOP_N};
use crate::similarity::SimilarityMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
  pub top_n: usize,
  pub min_weight: u32,
}

impl Default for AnalysisOptions {
  fn default() -> Self {
    Self { top_n: DEFAULT_TOP_N, min_weight: DEFAULT_MIN_WEIGHT }
  }
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
  pub records: usize,
  pub malformed_records: usize,
  pub multi_symptom_records: usize,
  pub cooccurrence: CooccurrenceMatrix,
  pub relations: Vec<SymptomRelations>,
  pub graph: SymptomGraph,
  pub similarity: SimilarityMatrix,
}

/// Counts describing one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
  pub generated_at: DateTime<Utc>,
  pub records: usize,
  pub malformed_records: usize,
  pub multi_symptom_records: usize,
  pub symptoms: usize,
  pub graph_edges: usize,
  pub similarity_symptoms: usize,
}

pub fn analyze(records: &[Record], options: AnalysisOptions) -> AnalysisReport {
  info!("Extracting symptom combinations");
  let combinations = symptom_combinations(records);
  info!("Found {} patient records with multiple symptoms", combinations.len());

  info!("Calculating symptom co-occurrences");
  let cooccurrence = CooccurrenceMatrix::from_combinations(&combinations);

  info!("Finding related symptoms");
  let relations = find_related(&cooccurrence, options.top_n);

  info!("Building symptom network");
  let graph = SymptomGraph::from_matrix(&cooccurrence, options.min_weight);

  info!("Calculating symptom similarity based on answers");
  let similarity = SimilarityMatrix::compute(records, cooccurrence.symptoms());

  AnalysisReport {
    records: records.len(),
    malformed_records: records.iter().filter(|record| record.is_malformed()).count(),
    multi_symptom_records: combinations.len(),
    cooccurrence,
    relations,
    graph,
    similarity,
  }
}

impl AnalysisReport {
  pub fn summary(&self) -> AnalysisSummary {
    AnalysisSummary {
      generated_at: Utc::now(),
      records: self.records,
      malformed_records: self.malformed_records,
      multi_symptom_records: self.multi_symptom_records,
      symptoms: self.cooccurrence.len(),
      graph_edges: self.graph.edge_count(),
      similarity_symptoms: self.similarity.len(),
    }
  }
}
