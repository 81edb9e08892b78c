//! Analysis artifact writers
//!
//! Every run replaces the artifacts of the previous one. A failed write
//! leaves whatever was already written in place.

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analysis::AnalysisReport;
use crate::cooccurrence::CooccurrenceMatrix;
use crate::recommendations::SYMPTOM_COLUMN;
use crate::relations::SymptomRelations;
use crate::similarity::SimilarityMatrix;
use crate::Result;

pub const COOCCURRENCE_FILE: &str = "symptom_cooccurrence.csv";
pub const RELATIONS_FILE: &str = "symptom_relations.csv";
pub const SIMILARITY_FILE: &str = "symptom_similarity.csv";
pub const NETWORK_FILE: &str = "symptom_network.dot";

const RELATED_COLUMN: &str = "อาการที่เกี่ยวข้อง";

/// Files produced by [`write_report`]
#[derive(Debug, Clone, Serialize)]
pub struct Artifacts {
  pub cooccurrence: PathBuf,
  pub relations: PathBuf,
  pub network: PathBuf,
  /// Absent when too few symptoms had answers to compare
  pub similarity: Option<PathBuf>,
}

pub fn write_report<P: AsRef<Path>>(report: &AnalysisReport, output_dir: P) -> Result<Artifacts> {
  let output_dir = output_dir.as_ref();
  std::fs::create_dir_all(output_dir)?;

  let cooccurrence = output_dir.join(COOCCURRENCE_FILE);
  write_cooccurrence(&report.cooccurrence, std::fs::File::create(&cooccurrence)?)?;
  info!("Exported co-occurrence matrix to {}", cooccurrence.display());

  let relations = output_dir.join(RELATIONS_FILE);
  write_relations(&report.relations, std::fs::File::create(&relations)?)?;
  info!("Exported symptom relations to {}", relations.display());

  let network = output_dir.join(NETWORK_FILE);
  std::fs::write(&network, report.graph.to_dot())?;
  info!("Exported symptom network to {}", network.display());

  let path = output_dir.join(SIMILARITY_FILE);
  let similarity = if report.similarity.is_empty() {
    remove_stale(&path)?;
    None
  } else {
    write_similarity(&report.similarity, std::fs::File::create(&path)?)?;
    info!("Exported symptom similarity to {}", path.display());
    Some(path)
  };

  Ok(Artifacts { cooccurrence, relations, network, similarity })
}

fn remove_stale(path: &Path) -> Result<()> {
  match std::fs::remove_file(path) {
    Ok(()) => {
      info!("Removed stale {}", path.display());
      Ok(())
    }
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e.into()),
  }
}

/// Square table: an empty corner cell, then one column per symptom
pub fn write_cooccurrence<W: io::Write>(matrix: &CooccurrenceMatrix, writer: W) -> Result<()> {
  write_square(
    matrix.symptoms(),
    matrix.rows().map(|(symptom, counts)| (symptom, counts.iter().map(u32::to_string).collect())),
    writer,
  )
}

pub fn write_similarity<W: io::Write>(matrix: &SimilarityMatrix, writer: W) -> Result<()> {
  write_square(
    matrix.symptoms(),
    matrix.rows().map(|(symptom, values)| (symptom, values.iter().map(|value| format!("{value:?}")).collect())),
    writer,
  )
}

fn write_square<'a, W: io::Write>(
  symptoms: &[String],
  rows: impl Iterator<Item = (&'a str, Vec<String>)>,
  writer: W,
) -> Result<()> {
  let mut writer = csv::Writer::from_writer(writer);
  writer.write_record(std::iter::once("").chain(symptoms.iter().map(String::as_str)))?;

  for (symptom, cells) in rows {
    writer.write_record(std::iter::once(symptom.to_string()).chain(cells))?;
  }

  writer.flush()?;
  Ok(())
}

/// One row per symptom with its related symptoms as `"B (2); C (1)"`
pub fn write_relations<W: io::Write>(relations: &[SymptomRelations], writer: W) -> Result<()> {
  let mut writer = csv::Writer::from_writer(writer);
  writer.write_record([SYMPTOM_COLUMN, RELATED_COLUMN])?;

  for relation in relations {
    writer.write_record([relation.symptom.as_str(), relation.related_summary().as_str()])?;
  }

  writer.flush()?;
  Ok(())
}
