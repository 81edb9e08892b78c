//! Record parsing
//!
//! Each dataset row carries a `summary` field holding a JSON-like object of
//! the form `{'yes_symptoms': [{'text': ..., 'answers': [...]}, ...]}`. The
//! field is usually written with Python-literal quoting, so it is normalized
//! into strict JSON before deserialization. Rows that still fail to parse
//! contribute no entries.

use serde::Deserialize;

/// Label under which prior treatments are logged. Not a symptom.
pub const TREATMENT_LABEL: &str = "การรักษาก่อนหน้า";

const ATK_TYPO: &str = "ประวัติ ATK";
const ATK_CANONICAL: &str = "ประวัติATK";

/// A symptom entry extracted from one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomEntry {
  pub text: String,
  pub answers: Vec<String>,
}

impl SymptomEntry {
  pub fn is_treatment(&self) -> bool {
    self.text == TREATMENT_LABEL
  }

  pub fn has_answers(&self) -> bool {
    !self.answers.is_empty()
  }
}

/// One patient encounter
#[derive(Debug, Clone, Default)]
pub struct Record {
  summary: String,
  search_term: String,
  entries: Vec<SymptomEntry>,
  malformed: bool,
}

impl Record {
  pub fn new(summary: impl Into<String>, search_term: impl Into<String>) -> Self {
    let summary = summary.into();
    let (entries, malformed) = match try_parse_summary(&summary) {
      Some(entries) => (entries, false),
      None => (Vec::new(), !summary.trim().is_empty()),
    };

    Self { summary, search_term: search_term.into(), entries, malformed }
  }

  /// Shorthand for a record with only a summary field
  pub fn from_summary(summary: impl Into<String>) -> Self {
    Self::new(summary, String::new())
  }

  /// Raw summary cell as read from the dataset
  pub fn summary(&self) -> &str {
    &self.summary
  }

  pub fn search_term(&self) -> &str {
    &self.search_term
  }

  pub fn entries(&self) -> &[SymptomEntry] {
    &self.entries
  }

  /// True when the summary held content that could not be parsed
  pub fn is_malformed(&self) -> bool {
    self.malformed
  }
}

#[derive(Deserialize)]
struct RawSummary {
  #[serde(default)]
  yes_symptoms: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
  #[serde(default)]
  text: String,
  #[serde(default)]
  answers: Vec<String>,
}

/// Parse a raw summary field. Malformed input yields no entries.
pub fn parse_summary(raw: &str) -> Vec<SymptomEntry> {
  try_parse_summary(raw).unwrap_or_default()
}

fn try_parse_summary(raw: &str) -> Option<Vec<SymptomEntry>> {
  let fixed = raw.replace(ATK_TYPO, ATK_CANONICAL);
  let value: serde_json::Value = serde_json::from_str(&to_json(&fixed)).ok()?;
  if !value.is_object() {
    return None;
  }

  let summary: RawSummary = serde_json::from_value(value).ok()?;
  let entries = summary
    .yes_symptoms
    .into_iter()
    .map(|entry| SymptomEntry {
      text: entry.text.trim().to_string(),
      answers: entry
        .answers
        .iter()
        .map(|answer| answer.trim())
        .filter(|answer| !answer.is_empty())
        .map(str::to_string)
        .collect(),
    })
    .collect();

  Some(entries)
}

/// Rewrite Python-literal notation as JSON.
///
/// Strings may be delimited by either quote style and are re-emitted with
/// double quotes, so an apostrophe inside a double-quoted value survives.
/// Bare `True`, `False` and `None` become their JSON spellings.
pub fn to_json(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut bare = String::new();
  let mut quote: Option<char> = None;
  let mut chars = raw.chars();

  while let Some(ch) = chars.next() {
    match quote {
      Some(delimiter) => match ch {
        '\\' => match chars.next() {
          Some('\'') => out.push('\''),
          Some(next) => {
            out.push('\\');
            out.push(next);
          }
          None => out.push('\\'),
        },
        c if c == delimiter => {
          out.push('"');
          quote = None;
        }
        '"' => out.push_str("\\\""),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c => out.push(c),
      },
      None => match ch {
        '\'' | '"' => {
          flush_bare(&mut out, &mut bare);
          out.push('"');
          quote = Some(ch);
        }
        c if c.is_alphanumeric() || c == '_' => bare.push(c),
        c => {
          flush_bare(&mut out, &mut bare);
          out.push(c);
        }
      },
    }
  }

  flush_bare(&mut out, &mut bare);
  out
}

fn flush_bare(out: &mut String, bare: &mut String) {
  match bare.as_str() {
    "" => return,
    "True" => out.push_str("true"),
    "False" => out.push_str("false"),
    "None" => out.push_str("null"),
    word => out.push_str(word),
  }
  bare.clear();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_single_quoted_summary() {
    let raw = "{'yes_symptoms': [{'text': 'ไอ', 'answers': [' มีเสมหะ ', '', 'ไอแห้ง']}]}";
    let entries = parse_summary(raw);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "ไอ");
    assert_eq!(entries[0].answers, vec!["มีเสมหะ", "ไอแห้ง"]);
  }

  #[test]
  fn test_parse_strict_json_summary() {
    let raw = r#"{"yes_symptoms": [{"text": " fever ", "answers": ["high"]}, {"text": "cough"}]}"#;
    let entries = parse_summary(raw);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "fever");
    assert!(entries[1].answers.is_empty());
    assert!(!entries[1].has_answers());
  }

  #[test]
  fn test_malformed_summary_is_skipped() {
    assert!(parse_summary("{not json").is_empty());
    assert!(parse_summary("").is_empty());
    assert!(parse_summary("[1, 2]").is_empty());
    assert!(parse_summary("{'yes_symptoms': [{'text': 'a', 'answers': [1]}]}").is_empty());
    assert!(parse_summary("{'yes_symptoms': None}").is_empty());
  }

  #[test]
  fn test_missing_yes_symptoms_means_no_entries() {
    let record = Record::from_summary("{'no_symptoms': [{'text': 'x'}]}");
    assert!(record.entries().is_empty());
    assert!(!record.is_malformed());
  }

  #[test]
  fn test_record_flags_malformed_content() {
    assert!(Record::from_summary("{not json").is_malformed());
    assert!(!Record::from_summary("   ").is_malformed());
  }

  #[test]
  fn test_record_keeps_raw_cells_alongside_entries() {
    let raw = "{'yes_symptoms': [{'text': 'ไอ', 'answers': ['แห้ง']}]}";
    let record = Record::new(raw, "ไอ");

    assert_eq!(record.summary(), raw);
    assert_eq!(record.search_term(), "ไอ");
    assert_eq!(record.entries().len(), 1);
    assert!(!record.is_malformed());
  }

  #[test]
  fn test_apostrophe_inside_double_quotes_survives() {
    let raw = r#"{'yes_symptoms': [{'text': 'headache', 'answers': ["it's bad"]}]}"#;
    let entries = parse_summary(raw);

    assert_eq!(entries[0].answers, vec!["it's bad"]);
  }

  #[test]
  fn test_atk_typo_is_normalized() {
    let raw = "{'yes_symptoms': [{'text': 'ประวัติ ATK', 'answers': ['ประวัติ ATK บวก']}]}";
    let entries = parse_summary(raw);

    assert_eq!(entries[0].text, "ประวัติATK");
    assert_eq!(entries[0].answers, vec!["ประวัติATK บวก"]);
  }

  #[test]
  fn test_treatment_entry_detection() {
    let raw = "{'yes_symptoms': [{'text': 'การรักษาก่อนหน้า', 'answers': ['ยาแก้ปวด']}]}";
    let entries = parse_summary(raw);
    assert!(entries[0].is_treatment());
  }

  #[test]
  fn test_to_json_literals_and_escapes() {
    assert_eq!(to_json("{'a': True, 'b': None, 'c': False}"), r#"{"a": true, "b": null, "c": false}"#);
    assert_eq!(to_json(r#"{'q': 'say "hi"'}"#), r#"{"q": "say \"hi\""}"#);
    assert_eq!(to_json(r"{'q': 'it\'s'}"), r#"{"q": "it's"}"#);
    assert_eq!(to_json("{'n': 1.5}"), r#"{"n": 1.5}"#);
    assert_eq!(to_json("{'Trueish': 'True'}"), r#"{"Trueish": "True"}"#);
  }
}
