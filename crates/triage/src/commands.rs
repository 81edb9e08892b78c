//! Command implementations behind the CLI

use anyhow::{Context, Result};
use std::path::Path;

use crate::analysis::{self, AnalysisOptions};
use crate::config::TriageConfig;
use crate::dataset::load_dataset;
use crate::display::{self, SymptomView};
use crate::extract::{answers_by_symptom, extract_all_symptoms, group_answers, treatment_answers};
use crate::recommendations::{self, Recommendations};
use crate::record::Record;
use crate::report::write_report;

fn load_records(config: &TriageConfig) -> Result<Vec<Record>> {
  load_dataset(&config.dataset)
    .with_context(|| format!("Failed to load dataset from {}", config.dataset.display()))
}

/// List every symptom that has answers
pub fn list_symptoms(config: &TriageConfig) -> Result<()> {
  let records = load_records(config)?;
  display::display_symptom_list(&extract_all_symptoms(&records));
  Ok(())
}

/// Assemble the browsing view for one symptom, or `None` when it has no answers
pub fn symptom_view(
  records: &[Record],
  recommendations: &Recommendations,
  defaults: &[String],
  symptom: &str,
) -> Option<SymptomView> {
  let answers: Vec<String> = answers_by_symptom(symptom, records).into_iter().collect();
  if answers.is_empty() {
    return None;
  }

  Some(SymptomView {
    symptom: symptom.to_string(),
    groups: group_answers(&answers),
    treatments: treatment_answers(records),
    recommendations: recommendations.for_symptom(symptom, defaults).to_vec(),
  })
}

/// Show grouped answers, treatment history and advice for a symptom
pub fn browse(config: &TriageConfig, symptom: &str) -> Result<()> {
  let records = load_records(config)?;
  let recommendations = Recommendations::load(&config.recommendations);

  match symptom_view(&records, &recommendations, &config.default_recommendations, symptom.trim()) {
    Some(view) => display::display_symptom(&view),
    None => display::display_no_answers(symptom),
  }

  Ok(())
}

/// Run the relationship analysis and write its artifacts
pub fn analyze(config: &TriageConfig, json: bool) -> Result<()> {
  let records = load_records(config)?;
  let options = AnalysisOptions { top_n: config.top_n, min_weight: config.min_weight };

  let report = analysis::analyze(&records, options);
  let artifacts = write_report(&report, &config.output_dir)
    .with_context(|| format!("Failed to write analysis output to {}", config.output_dir.display()))?;
  let summary = report.summary();

  if json {
    let output = serde_json::json!({ "summary": summary, "artifacts": artifacts });
    println!("{}", serde_json::to_string_pretty(&output)?);
  } else {
    display::display_summary(&summary, &artifacts);
  }

  Ok(())
}

/// Generate a recommendations table prefilled with the default advice
pub fn template(config: &TriageConfig, output: Option<&Path>, force: bool) -> Result<()> {
  let records = load_records(config)?;
  let symptoms = extract_all_symptoms(&records);
  let path = output.unwrap_or(config.recommendations.as_path());

  recommendations::write_template(&symptoms, path, &config.default_recommendations, force)
    .with_context(|| format!("Failed to write recommendations template to {}", path.display()))?;

  println!("Created recommendations template for {} symptoms at {}", symptoms.len(), path.display());
  Ok(())
}
