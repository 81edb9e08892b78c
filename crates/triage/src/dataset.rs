//! Questionnaire dataset loading

use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::record::Record;
use crate::{Result, TriageError};

pub const SUMMARY_COLUMN: &str = "summary";
pub const SEARCH_TERM_COLUMN: &str = "search_term";

/// Load every row of a dataset CSV as a [`Record`].
///
/// The `summary` column is required. Blank cells read as empty strings.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
  let path = path.as_ref();
  if !path.is_file() {
    return Err(TriageError::DatasetNotFound { path: path.to_path_buf() });
  }

  let file = std::fs::File::open(path)?;
  let records = read_records(file).map_err(|e| match e {
    TriageError::MissingColumn { column, .. } => {
      TriageError::MissingColumn { path: path.to_path_buf(), column }
    }
    other => other,
  })?;

  info!("Loaded {} records from {}", records.len(), path.display());
  Ok(records)
}

/// Read records from any CSV source
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<Record>> {
  let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
  let headers = reader.headers()?.clone();

  let position = |column: &str| headers.iter().position(|header| header.trim() == column);
  let summary = position(SUMMARY_COLUMN).ok_or_else(|| TriageError::MissingColumn {
    path: Default::default(),
    column: SUMMARY_COLUMN.to_string(),
  })?;
  let search_term = position(SEARCH_TERM_COLUMN);
  if search_term.is_none() {
    warn!("Dataset has no '{SEARCH_TERM_COLUMN}' column");
  }

  let mut records = Vec::new();
  for row in reader.records() {
    let row = row?;
    let cell = |index: Option<usize>| index.and_then(|i| row.get(i)).unwrap_or_default();
    records.push(Record::new(cell(Some(summary)), cell(search_term)));
  }

  let malformed = records.iter().filter(|record| record.is_malformed()).count();
  if malformed > 0 {
    debug!("Skipped {malformed} rows with unparseable summaries");
  }

  Ok(records)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  const DATASET: &str = r#"search_term,summary
ไอ,"{'yes_symptoms': [{'text': 'ไอ', 'answers': ['มีเสมหะ']}]}"
,
ไข้,{not json
"#;

  #[test]
  fn test_read_records() {
    let records = read_records(DATASET.as_bytes()).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].search_term(), "ไอ");
    assert_eq!(records[0].entries()[0].text, "ไอ");
    assert!(records[1].summary().is_empty());
    assert!(records[1].entries().is_empty());
    assert!(records[2].is_malformed());
  }

  #[test]
  fn test_missing_search_term_column_is_tolerated() {
    let records = read_records("summary\n\"{'yes_symptoms': []}\"\n".as_bytes()).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].search_term().is_empty());
  }

  #[test]
  fn test_missing_summary_column_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dataset.csv");
    std::fs::write(&path, "search_term,notes\nx,y\n").unwrap();

    match load_dataset(&path) {
      Err(TriageError::MissingColumn { path: reported, column }) => {
        assert_eq!(column, SUMMARY_COLUMN);
        assert_eq!(reported, path);
      }
      other => panic!("expected missing column error, got {other:?}"),
    }
  }

  #[test]
  fn test_missing_dataset_is_an_error() {
    let result = load_dataset("/nonexistent/dataset.csv");
    assert!(matches!(result, Err(TriageError::DatasetNotFound { .. })));
  }

  #[test]
  fn test_load_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dataset.csv");
    std::fs::write(&path, DATASET).unwrap();

    let records = load_dataset(&path).unwrap();
    assert_eq!(records.len(), 3);
  }
}
