//! Answer-vocabulary similarity between symptoms
//!
//! Each symptom's answers are joined into one document, lowercased and split
//! into Unicode word runs. Documents become term-frequency vectors over a
//! shared vocabulary and are compared pairwise by cosine similarity.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::record::Record;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Lowercased word tokens of `text`
pub fn tokenize(text: &str) -> Vec<String> {
  let lowered = text.to_lowercase();
  WORD.find_iter(&lowered).map(|token| token.as_str().to_string()).collect()
}

/// Cosine similarity of two equal-length vectors, zero if either is all zeros
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
  if a.len() != b.len() {
    return 0.0;
  }

  let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
  let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
  let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

  if magnitude_a == 0.0 || magnitude_b == 0.0 {
    0.0
  } else {
    (dot_product / (magnitude_a * magnitude_b)).clamp(0.0, 1.0)
  }
}

/// Pairwise similarity of the symptoms that have answer text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
  symptoms: Vec<String>,
  values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
  /// Compare `candidates` by the answers logged for them in `records`.
  ///
  /// Candidates without any answer are left out. Fewer than two remaining
  /// candidates give an empty matrix.
  pub fn compute<S: AsRef<str>>(records: &[Record], candidates: &[S]) -> Self {
    let mut answers: HashMap<&str, Vec<&str>> =
      candidates.iter().map(|symptom| (symptom.as_ref(), Vec::new())).collect();

    for entry in records.iter().flat_map(|record| record.entries()) {
      if let Some(log) = answers.get_mut(entry.text.as_str()) {
        log.extend(entry.answers.iter().map(String::as_str));
      }
    }

    let documents: Vec<(String, String)> = candidates
      .iter()
      .map(AsRef::as_ref)
      .filter_map(|symptom| {
        let text = answers.get(symptom)?.join(" ");
        (!text.is_empty()).then(|| (symptom.to_string(), text))
      })
      .collect();

    Self::from_documents(&documents)
  }

  /// Build from `(symptom, document)` pairs in output order
  pub fn from_documents(documents: &[(String, String)]) -> Self {
    if documents.len() < 2 {
      return Self::default();
    }

    let tokenized: Vec<Vec<String>> = documents.iter().map(|(_, text)| tokenize(text)).collect();
    let vocabulary: BTreeMap<&str, usize> = tokenized
      .iter()
      .flatten()
      .map(String::as_str)
      .collect::<std::collections::BTreeSet<&str>>()
      .into_iter()
      .enumerate()
      .map(|(i, term)| (term, i))
      .collect();

    if vocabulary.is_empty() {
      return Self::default();
    }

    let vectors: Vec<Vec<f64>> = tokenized
      .iter()
      .map(|tokens| {
        let mut vector = vec![0.0; vocabulary.len()];
        for token in tokens {
          vector[vocabulary[token.as_str()]] += 1.0;
        }
        vector
      })
      .collect();

    let values = vectors
      .iter()
      .enumerate()
      .map(|(i, a)| {
        vectors
          .iter()
          .enumerate()
          .map(|(j, b)| {
            if i == j && a.iter().any(|&x| x > 0.0) {
              1.0
            } else {
              cosine_similarity(a, b)
            }
          })
          .collect()
      })
      .collect();

    Self { symptoms: documents.iter().map(|(symptom, _)| symptom.clone()).collect(), values }
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

  pub fn get(&self, a: &str, b: &str) -> Option<f64> {
    let i = self.symptoms.iter().position(|symptom| symptom == a)?;
    let j = self.symptoms.iter().position(|symptom| symptom == b)?;
    Some(self.values[i][j])
  }

  pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
    self.symptoms.iter().map(String::as_str).zip(self.values.iter().map(Vec::as_slice))
  }
}
