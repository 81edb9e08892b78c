//! Ranking of related symptoms

use serde::Serialize;

use crate::cooccurrence::CooccurrenceMatrix;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Related {
  pub symptom: String,
  pub count: u32,
}

/// Top related symptoms for one symptom, strongest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomRelations {
  pub symptom: String,
  pub related: Vec<Related>,
}

impl SymptomRelations {
  /// `"B (2); C (1)"`
  pub fn related_summary(&self) -> String {
    self
      .related
      .iter()
      .map(|related| format!("{} ({})", related.symptom, related.count))
      .collect::<Vec<_>>()
      .join("; ")
  }
}

/// Rank each matrix row's partners by count and keep the first `top_n`.
///
/// The sort is stable, so equal counts keep the matrix column order. This
/// tie-break is part of the output contract.
pub fn find_related(matrix: &CooccurrenceMatrix, top_n: usize) -> Vec<SymptomRelations> {
  (0..matrix.len())
    .map(|i| {
      let symptom = &matrix.symptoms()[i];
      let mut related: Vec<Related> = matrix
        .row(i)
        .filter(|&(other, count)| count > 0 && other != symptom.as_str())
        .map(|(other, count)| Related { symptom: other.to_string(), count })
        .collect();

      related.sort_by(|a, b| b.count.cmp(&a.count));
      related.truncate(top_n);

      SymptomRelations { symptom: symptom.clone(), related }
    })
    .collect()
}
