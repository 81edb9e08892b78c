//! Symptom extraction and answer grouping
//!
//! All symptom lists returned from here are ordered by Unicode code point,
//! which is the byte order of their UTF-8 encoding.

use std::collections::{BTreeMap, BTreeSet};

use crate::record::{Record, SymptomEntry, TREATMENT_LABEL};

/// Group label for answers that have no leading word
pub const OTHER_GROUP: &str = "อื่นๆ";

fn entries<'a>(records: &'a [Record]) -> impl Iterator<Item = &'a SymptomEntry> {
  records.iter().flat_map(|record| record.entries())
}

/// Every distinct symptom that has at least one non-empty answer
pub fn extract_all_symptoms(records: &[Record]) -> Vec<String> {
  let symptoms: BTreeSet<&str> = entries(records)
    .filter(|entry| !entry.text.is_empty() && !entry.is_treatment() && entry.has_answers())
    .map(|entry| entry.text.as_str())
    .collect();

  symptoms.into_iter().map(str::to_string).collect()
}

/// Union of the answers logged under `symptom` across all records
pub fn answers_by_symptom(symptom: &str, records: &[Record]) -> BTreeSet<String> {
  entries(records)
    .filter(|entry| entry.text == symptom)
    .flat_map(|entry| entry.answers.iter().cloned())
    .collect()
}

/// Distinct treatment-history answers, sorted
pub fn treatment_answers(records: &[Record]) -> Vec<String> {
  answers_by_symptom(TREATMENT_LABEL, records).into_iter().collect()
}

fn split_head(answer: &str) -> Option<(&str, &str)> {
  answer.split_once(char::is_whitespace)
}

/// Group answers by their first word
pub fn group_answers<S: AsRef<str>>(answers: &[S]) -> BTreeMap<String, Vec<String>> {
  let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

  for answer in answers {
    let answer = answer.as_ref();
    let key = match split_head(answer) {
      Some((head, _)) => head,
      None => OTHER_GROUP,
    };
    groups.entry(key.to_string()).or_default().push(answer.to_string());
  }

  groups
}

/// `(label, value)` pairs for selection menus, sorted by value.
///
/// The label drops the leading word and all whitespace from the rest of the
/// answer; a single-word answer is its own label.
pub fn dropdown_options<S: AsRef<str>>(answers: &[S]) -> Vec<(String, String)> {
  let mut values: Vec<&str> = answers.iter().map(AsRef::as_ref).collect();
  values.sort_unstable();

  values
    .into_iter()
    .map(|value| {
      let label = match split_head(value) {
        Some((_, rest)) => rest.chars().filter(|c| !c.is_whitespace()).collect(),
        None => value.to_string(),
      };
      (label, value.to_string())
    })
    .collect()
}
