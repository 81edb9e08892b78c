//! Weighted symptom network

use std::fmt::Write;

use serde::Serialize;

use crate::cooccurrence::CooccurrenceMatrix;

pub const DEFAULT_MIN_WEIGHT: u32 = 2;

/// Node size per unit of degree, in points
const NODE_SIZE_FACTOR: f64 = 100.0;
/// Edge pen width per unit of weight
const EDGE_WIDTH_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
  pub source: usize,
  pub target: usize,
  pub weight: u32,
}

/// Undirected graph over the co-occurrence matrix symptoms.
///
/// Every matrix symptom is a node, isolated or not. Edges join pairs whose
/// count reaches the minimum weight and are stored once with
/// `source < target`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymptomGraph {
  nodes: Vec<String>,
  edges: Vec<Edge>,
}

impl SymptomGraph {
  pub fn from_matrix(matrix: &CooccurrenceMatrix, min_weight: u32) -> Self {
    let mut edges = Vec::new();

    for (i, (_, row)) in matrix.rows().enumerate() {
      for (j, &weight) in row.iter().enumerate().skip(i + 1) {
        if weight >= min_weight {
          edges.push(Edge { source: i, target: j, weight });
        }
      }
    }

    Self { nodes: matrix.symptoms().to_vec(), edges }
  }

  pub fn nodes(&self) -> &[String] {
    &self.nodes
  }

  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn edge_count(&self) -> usize {
    self.edges.len()
  }

  fn node_index(&self, symptom: &str) -> Option<usize> {
    self.nodes.iter().position(|node| node == symptom)
  }

  /// Weight of the edge between two symptoms, if there is one
  pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
    let (i, j) = (self.node_index(a)?, self.node_index(b)?);
    let (source, target) = if i < j { (i, j) } else { (j, i) };
    self.edges.iter().find(|edge| edge.source == source && edge.target == target).map(|edge| edge.weight)
  }

  pub fn degree(&self, symptom: &str) -> usize {
    match self.node_index(symptom) {
      Some(i) => self.edges.iter().filter(|edge| edge.source == i || edge.target == i).count(),
      None => 0,
    }
  }

  /// Adjacent symptoms with edge weights, in node order
  pub fn neighbors(&self, symptom: &str) -> Vec<(&str, u32)> {
    let Some(i) = self.node_index(symptom) else {
      return Vec::new();
    };

    let mut neighbors: Vec<(usize, u32)> = self
      .edges
      .iter()
      .filter_map(|edge| match (edge.source == i, edge.target == i) {
        (true, _) => Some((edge.target, edge.weight)),
        (_, true) => Some((edge.source, edge.weight)),
        _ => None,
      })
      .collect();
    neighbors.sort_by_key(|&(node, _)| node);

    neighbors.into_iter().map(|(node, weight)| (self.nodes[node].as_str(), weight)).collect()
  }

  /// Graphviz description of the network.
  ///
  /// Node width grows with degree and edge pen width with weight, so a
  /// `neato` or `fdp` render resembles a force-directed plot.
  pub fn to_dot(&self) -> String {
    let mut dot = String::from("graph symptoms {\n");
    dot.push_str("  graph [overlap=false, splines=true];\n");
    dot.push_str(
      "  node [shape=circle, style=filled, fillcolor=skyblue, color=gray, fontname=\"sans-serif\", fontsize=8];\n",
    );
    dot.push_str("  edge [color=gray];\n");

    for (i, node) in self.nodes.iter().enumerate() {
      let degree = self.edges.iter().filter(|edge| edge.source == i || edge.target == i).count();
      // Graphviz widths are in inches: 72 points each
      let width = (degree as f64 * NODE_SIZE_FACTOR).sqrt() / 72.0;
      let _ = writeln!(dot, "  n{i} [label=\"{}\", width={width:.3}];", escape(node));
    }

    for edge in &self.edges {
      let penwidth = f64::from(edge.weight) * EDGE_WIDTH_FACTOR;
      let _ = writeln!(
        dot,
        "  n{} -- n{} [weight={}, penwidth={penwidth:.1}];",
        edge.source, edge.target, edge.weight
      );
    }

    dot.push_str("}\n");
    dot
  }
}

fn escape(label: &str) -> String {
  label.replace('\\', "\\\\").replace('"', "\\\"")
}
