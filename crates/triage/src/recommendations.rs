//! Per-symptom advice table
//!
//! The table is a CSV keyed by symptom name with up to three recommendation
//! columns. Symptoms missing from the table fall back to general advice.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::{Result, TriageError};

pub const SYMPTOM_COLUMN: &str = "อาการ";

/// General advice for symptoms without specific recommendations
pub const DEFAULT_RECOMMENDATIONS: [&str; 3] =
  ["พักผ่อนให้เพียงพอ", "ดื่มน้ำมากๆ", "หากอาการไม่ดีขึ้นหรือรุนแรงขึ้น ควรปรึกษาแพทย์"];

pub fn default_recommendations() -> Vec<String> {
  DEFAULT_RECOMMENDATIONS.iter().map(|rec| rec.to_string()).collect()
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecommendationRow {
  #[serde(rename = "อาการ", default)]
  symptom: Option<String>,
  #[serde(rename = "คำแนะนำเฉพาะทาง 1", default)]
  first: Option<String>,
  #[serde(rename = "คำแนะนำเฉพาะทาง 2", default)]
  second: Option<String>,
  #[serde(rename = "คำแนะนำเฉพาะทาง 3", default)]
  third: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Recommendations {
  by_symptom: HashMap<String, Vec<String>>,
}

impl Recommendations {
  /// Read a recommendations table, failing on any I/O or format error
  pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
    let file = std::fs::File::open(path)?;
    Self::from_reader(file)
  }

  /// Read a recommendations table, degrading to an empty table on failure
  pub fn load<P: AsRef<Path>>(path: P) -> Self {
    let path = path.as_ref();
    match Self::read(path) {
      Ok(recommendations) => {
        debug!("Loaded recommendations for {} symptoms from {}", recommendations.len(), path.display());
        recommendations
      }
      Err(e) => {
        warn!("Could not load recommendations from {}: {e}", path.display());
        Self::default()
      }
    }
  }

  pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
    let mut recommendations = Self::default();

    for row in csv::Reader::from_reader(reader).deserialize::<RecommendationRow>() {
      let row = row?;
      let Some(symptom) = row.symptom.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        continue;
      };

      let recs = [row.first.as_deref(), row.second.as_deref(), row.third.as_deref()]
        .into_iter()
        .flatten()
        .filter(|rec| !rec.trim().is_empty())
        .map(str::to_string)
        .collect();

      recommendations.insert(symptom, recs);
    }

    Ok(recommendations)
  }

  pub fn insert(&mut self, symptom: impl Into<String>, recommendations: Vec<String>) {
    self.by_symptom.insert(symptom.into(), recommendations);
  }

  /// Advice for `symptom`; `defaults` when the table has no row for it.
  ///
  /// A row whose recommendation cells are all blank yields no advice.
  pub fn for_symptom<'a>(&'a self, symptom: &str, defaults: &'a [String]) -> &'a [String] {
    self.by_symptom.get(symptom).map(Vec::as_slice).unwrap_or(defaults)
  }

  pub fn len(&self) -> usize {
    self.by_symptom.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_symptom.is_empty()
  }
}

/// Write a recommendations table with one row per symptom, prefilled with
/// `defaults`. An existing file is only replaced when `force` is set.
pub fn write_template<P: AsRef<Path>>(
  symptoms: &[String],
  path: P,
  defaults: &[String],
  force: bool,
) -> Result<()> {
  let path = path.as_ref();
  if path.exists() && !force {
    return Err(TriageError::RecommendationsExist { path: path.to_path_buf() });
  }

  if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)?;
  }

  let default_at = |i: usize| defaults.get(i).cloned();
  let mut writer = csv::Writer::from_path(path)?;
  for symptom in symptoms {
    writer.serialize(RecommendationRow {
      symptom: Some(symptom.clone()),
      first: default_at(0),
      second: default_at(1),
      third: default_at(2),
    })?;
  }
  writer.flush()?;

  Ok(())
}
