//! Configuration management for triage
//!
//! Handles loading input locations, output location and analysis
//! parameters. Every field has a default, so a partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::graph::DEFAULT_MIN_WEIGHT;
use crate::recommendations::default_recommendations;
use crate::relations::DEFAULT_TOP_N;
use crate::Result;

const CONFIG_PATHS: [&str; 3] = [".triage.json", "triage.json", ".triage/config.json"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
  /// Questionnaire dataset (CSV)
  #[serde(default = "default_dataset")]
  pub dataset: PathBuf,
  /// Per-symptom recommendations table (CSV)
  #[serde(default = "default_recommendations_path")]
  pub recommendations: PathBuf,
  /// Directory that receives analysis artifacts
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,
  /// Related symptoms kept per symptom
  #[serde(default = "default_top_n")]
  pub top_n: usize,
  /// Minimum co-occurrence count for a network edge
  #[serde(default = "default_min_weight")]
  pub min_weight: u32,
  /// Advice shown for symptoms missing from the recommendations table
  #[serde(default = "default_recommendations")]
  pub default_recommendations: Vec<String>,
}

// Default value functions
fn default_dataset() -> PathBuf {
  PathBuf::from("assets/dataset.csv")
}
fn default_recommendations_path() -> PathBuf {
  PathBuf::from("assets/symptoms.csv")
}
fn default_output_dir() -> PathBuf {
  PathBuf::from("analysis_output")
}
fn default_top_n() -> usize {
  DEFAULT_TOP_N
}
fn default_min_weight() -> u32 {
  DEFAULT_MIN_WEIGHT
}

impl Default for TriageConfig {
  fn default() -> Self {
    Self {
      dataset: default_dataset(),
      recommendations: default_recommendations_path(),
      output_dir: default_output_dir(),
      top_n: default_top_n(),
      min_weight: default_min_weight(),
      default_recommendations: default_recommendations(),
    }
  }
}

impl TriageConfig {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: TriageConfig = serde_json::from_str(&content)?;
    Ok(config)
  }

  /// Load configuration from the current directory, the user config
  /// directory, or defaults
  pub fn load() -> Result<Self> {
    Self::load_from(Path::new("."), dirs::config_dir().as_deref())
  }

  /// Search `base` and then `user_dir` for a configuration file
  pub fn load_from(base: &Path, user_dir: Option<&Path>) -> Result<Self> {
    for path in CONFIG_PATHS {
      let candidate = base.join(path);
      if candidate.is_file() {
        return Self::load_from_file(candidate);
      }
    }

    if let Some(user_dir) = user_dir {
      let candidate = user_dir.join("triage").join("config.json");
      if candidate.is_file() {
        return Self::load_from_file(candidate);
      }
    }

    // No config file found, use defaults
    Ok(Self::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn test_config_default() {
    let config = TriageConfig::default();
    assert_eq!(config.dataset, PathBuf::from("assets/dataset.csv"));
    assert_eq!(config.recommendations, PathBuf::from("assets/symptoms.csv"));
    assert_eq!(config.output_dir, PathBuf::from("analysis_output"));
    assert_eq!(config.top_n, 5);
    assert_eq!(config.min_weight, 2);
    assert_eq!(config.default_recommendations.len(), 3);
  }

  #[test]
  fn test_config_load_nonexistent_file() {
    let result = TriageConfig::load_from_file(Path::new("nonexistent.json"));
    assert!(result.is_err());
  }

  #[test]
  fn test_config_load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid.json");
    fs::write(&config_path, "{ invalid json }").unwrap();

    assert!(TriageConfig::load_from_file(&config_path).is_err());
  }

  #[test]
  fn test_config_load_partial_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("partial.json");
    fs::write(&config_path, r#"{ "top_n": 3, "dataset": "data/records.csv" }"#).unwrap();

    let config = TriageConfig::load_from_file(&config_path).unwrap();
    assert_eq!(config.top_n, 3);
    assert_eq!(config.dataset, PathBuf::from("data/records.csv"));
    // Other fields should have defaults
    assert_eq!(config.min_weight, 2);
    assert_eq!(config.output_dir, PathBuf::from("analysis_output"));
  }

  #[test]
  fn test_load_from_search_order() {
    let base = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();

    // Nothing anywhere: defaults
    let config = TriageConfig::load_from(base.path(), Some(user.path())).unwrap();
    assert_eq!(config, TriageConfig::default());

    // User config directory
    fs::create_dir_all(user.path().join("triage")).unwrap();
    fs::write(user.path().join("triage/config.json"), r#"{ "min_weight": 4 }"#).unwrap();
    let config = TriageConfig::load_from(base.path(), Some(user.path())).unwrap();
    assert_eq!(config.min_weight, 4);

    // Working directory wins
    fs::write(base.path().join("triage.json"), r#"{ "min_weight": 7 }"#).unwrap();
    let config = TriageConfig::load_from(base.path(), Some(user.path())).unwrap();
    assert_eq!(config.min_weight, 7);
  }

  #[test]
  fn test_config_load_and_save() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("test_config.json");

    let original = TriageConfig {
      top_n: 10,
      min_weight: 3,
      default_recommendations: vec!["rest".to_string()],
      ..TriageConfig::default()
    };

    original.save_to_file(&config_path).unwrap();
    let loaded = TriageConfig::load_from_file(&config_path).unwrap();

    assert_eq!(original, loaded);
  }
}
