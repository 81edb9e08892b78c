//! Symptom co-occurrence counting

use std::collections::{BTreeSet, HashMap};

use crate::record::Record;

/// Distinct symptoms of every record that reports more than one
pub fn symptom_combinations(records: &[Record]) -> Vec<BTreeSet<String>> {
  records
    .iter()
    .map(|record| {
      record
        .entries()
        .iter()
        .filter(|entry| !entry.text.is_empty() && !entry.is_treatment())
        .map(|entry| entry.text.clone())
        .collect::<BTreeSet<String>>()
    })
    .filter(|symptoms| symptoms.len() > 1)
    .collect()
}

/// Symmetric symptom-by-symptom count matrix.
///
/// Rows and columns share one index, ordered by code point. The diagonal is
/// always zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooccurrenceMatrix {
  symptoms: Vec<String>,
  index: HashMap<String, usize>,
  counts: Vec<Vec<u32>>,
}

impl CooccurrenceMatrix {
  pub fn from_records(records: &[Record]) -> Self {
    Self::from_combinations(&symptom_combinations(records))
  }

  pub fn from_combinations(combinations: &[BTreeSet<String>]) -> Self {
    let symptoms: Vec<String> = combinations
      .iter()
      .flatten()
      .cloned()
      .collect::<BTreeSet<String>>()
      .into_iter()
      .collect();
    let index: HashMap<String, usize> =
      symptoms.iter().enumerate().map(|(i, symptom)| (symptom.clone(), i)).collect();
    let mut counts = vec![vec![0u32; symptoms.len()]; symptoms.len()];

    for combination in combinations {
      let members: Vec<usize> = combination.iter().map(|symptom| index[symptom]).collect();
      for &a in &members {
        for &b in &members {
          if a != b {
            counts[a][b] += 1;
          }
        }
      }
    }

    Self { symptoms, index, counts }
  }

  pub fn symptoms(&self) -> &[String] {
    &self.symptoms
  }

  pub fn len(&self) -> usize {
    self.symptoms.len()
  }

  pub fn is_empty(&self) -> bool {
    self.symptoms.is_empty()
  }

  pub fn index_of(&self, symptom: &str) -> Option<usize> {
    self.index.get(symptom).copied()
  }

  /// Count for a pair of symptoms, zero when either is unknown
  pub fn get(&self, a: &str, b: &str) -> u32 {
    match (self.index_of(a), self.index_of(b)) {
      (Some(i), Some(j)) => self.counts[i][j],
      _ => 0,
    }
  }

  /// Counts for row `i` paired with their column symptoms, in column order
  pub fn row(&self, i: usize) -> impl Iterator<Item = (&str, u32)> + '_ {
    self.symptoms.iter().map(String::as_str).zip(self.counts[i].iter().copied())
  }

  pub fn rows(&self) -> impl Iterator<Item = (&str, &[u32])> + '_ {
    self.symptoms.iter().map(String::as_str).zip(self.counts.iter().map(Vec::as_slice))
  }

  /// Sum of all cells
  pub fn total(&self) -> u64 {
    self.counts.iter().flatten().map(|&count| u64::from(count)).sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn combo(symptoms: &[&str]) -> BTreeSet<String> {
    symptoms.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_pair_counts() {
    let matrix =
      CooccurrenceMatrix::from_combinations(&[combo(&["A", "B"]), combo(&["A", "B"]), combo(&["A", "C"])]);

    assert_eq!(matrix.symptoms(), ["A", "B", "C"]);
    assert_eq!(matrix.get("A", "B"), 2);
    assert_eq!(matrix.get("B", "A"), 2);
    assert_eq!(matrix.get("A", "C"), 1);
    assert_eq!(matrix.get("C", "A"), 1);
    assert_eq!(matrix.get("B", "C"), 0);
    assert_eq!(matrix.get("A", "Z"), 0);
  }

  #[test]
  fn test_symmetric_with_zero_diagonal() {
    let matrix = CooccurrenceMatrix::from_combinations(&[
      combo(&["A", "B", "C"]),
      combo(&["B", "D"]),
      combo(&["A", "C", "D", "E"]),
    ]);

    for a in matrix.symptoms() {
      assert_eq!(matrix.get(a, a), 0);
      for b in matrix.symptoms() {
        assert_eq!(matrix.get(a, b), matrix.get(b, a));
      }
    }
  }

  #[test]
  fn test_each_record_adds_ordered_pairs() {
    // k*(k-1) per record: 3*2 + 2*1 + 4*3
    let matrix = CooccurrenceMatrix::from_combinations(&[
      combo(&["A", "B", "C"]),
      combo(&["B", "D"]),
      combo(&["A", "C", "D", "E"]),
    ]);
    assert_eq!(matrix.total(), 20);
  }

  #[test]
  fn test_combinations_from_records() {
    let records = vec![
      Record::from_summary("{'yes_symptoms': [{'text': 'A'}, {'text': 'B'}, {'text': 'A'}]}"),
      Record::from_summary("{'yes_symptoms': [{'text': 'A'}, {'text': 'การรักษาก่อนหน้า'}]}"),
      Record::from_summary("{'yes_symptoms': [{'text': 'C'}, {'text': ' '}, {'text': 'D'}]}"),
      Record::from_summary("{not json"),
    ];

    let combinations = symptom_combinations(&records);
    assert_eq!(combinations, vec![combo(&["A", "B"]), combo(&["C", "D"])]);

    let matrix = CooccurrenceMatrix::from_records(&records);
    assert_eq!(matrix.len(), 4);
    assert_eq!(matrix.get("A", "B"), 1);
    assert_eq!(matrix.get("A", "C"), 0);
  }

  #[test]
  fn test_empty_input() {
    let matrix = CooccurrenceMatrix::from_combinations(&[]);
    assert!(matrix.is_empty());
    assert_eq!(matrix.total(), 0);
  }
}
