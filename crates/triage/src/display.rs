//! Display formatting utilities for CLI output

use colored::*;
use std::collections::BTreeMap;

use crate::analysis::AnalysisSummary;
use crate::extract::dropdown_options;
use crate::report::Artifacts;

/// Printed after every set of recommendations
pub const SEE_A_DOCTOR: &str = "หากอาการไม่ดีขึ้นหรือรุนแรงขึ้น ควรรีบพบแพทย์";

/// Everything shown for one symptom
#[derive(Debug, Clone, Default)]
pub struct SymptomView {
  pub symptom: String,
  pub groups: BTreeMap<String, Vec<String>>,
  pub treatments: Vec<String>,
  pub recommendations: Vec<String>,
}

/// Indented `label  (value)` lines for a group of answers
pub fn option_lines(answers: &[String]) -> Vec<String> {
  dropdown_options(answers)
    .into_iter()
    .map(|(label, value)| if label == value { format!("  - {value}") } else { format!("  - {label}  ({value})") })
    .collect()
}

pub fn display_symptom(view: &SymptomView) {
  println!("=== {} ===", view.symptom.blue().bold());
  println!();

  for (group, answers) in &view.groups {
    println!("{}", group.yellow().bold());
    for line in option_lines(answers) {
      println!("{line}");
    }
    println!();
  }

  if !view.treatments.is_empty() {
    println!("{}", crate::record::TREATMENT_LABEL.cyan().bold());
    for line in option_lines(&view.treatments) {
      println!("{line}");
    }
    println!();
  }

  println!("{}", "Recommendations".green().bold());
  for recommendation in &view.recommendations {
    println!("  - {recommendation}");
  }
  println!();
  println!("{} {}", "⚠".yellow(), SEE_A_DOCTOR.yellow().bold());
}

pub fn display_no_answers(symptom: &str) {
  println!("{} No additional information found for symptom '{}'", "⚠".yellow(), symptom.yellow());
}

pub fn display_symptom_list(symptoms: &[String]) {
  if symptoms.is_empty() {
    println!("No symptoms found.");
    return;
  }

  for symptom in symptoms {
    println!("{symptom}");
  }
  println!();
  println!("{} symptoms", symptoms.len().to_string().cyan());
}

pub fn display_summary(summary: &AnalysisSummary, artifacts: &Artifacts) {
  println!("{}", "Symptom analysis complete".green().bold());
  println!("  records:                {}", summary.records);
  println!("  unparseable records:    {}", summary.malformed_records);
  println!("  multi-symptom records:  {}", summary.multi_symptom_records);
  println!("  co-occurring symptoms:  {}", summary.symptoms);
  println!("  network edges:          {}", summary.graph_edges);
  println!("  compared by answers:    {}", summary.similarity_symptoms);
  println!();
  println!("  {}", artifacts.cooccurrence.display().to_string().dimmed());
  println!("  {}", artifacts.relations.display().to_string().dimmed());
  println!("  {}", artifacts.network.display().to_string().dimmed());
  match &artifacts.similarity {
    Some(path) => println!("  {}", path.display().to_string().dimmed()),
    None => println!("  {}", "similarity skipped: fewer than two symptoms with answers".dimmed()),
  }
}
