//! Citation graph derived from stored records
//!
//! Built from `PaperRecord.citations` on demand and never persisted, so the
//! `papers` table stays the only source of truth. Cited DOIs without a stored
//! record are still nodes; `dangling` lists them.

use crate::models::PaperRecord;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// In-memory citation graph keyed by DOI
#[derive(Debug, Default)]
pub struct CitationGraph {
    /// doi -> DOIs it cites
    outgoing: HashMap<String, Vec<String>>,

    /// doi -> DOIs citing it
    incoming: HashMap<String, Vec<String>>,

    /// Every DOI seen, stored or cited
    nodes: HashSet<String>,

    /// Titles of stored records
    titles: HashMap<String, String>,
}

/// One row of `most_cited`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitedPaper {
    pub doi: String,
    pub title: Option<String>,
    pub citation_count: usize,
}

impl CitationGraph {
    pub fn from_records(records: &[PaperRecord]) -> Self {
        let mut graph = Self::default();

        for record in records {
            graph.nodes.insert(record.doi.clone());
            graph.titles.insert(record.doi.clone(), record.title.clone());
        }

        for record in records {
            for cited in record.citations.iter().map(|c| c.trim()) {
                if !cited.is_empty() {
                    graph.add_edge(&record.doi, cited);
                }
            }
        }

        graph
    }

    fn add_edge(&mut self, citing: &str, cited: &str) {
        let refs = self.outgoing.entry(citing.to_string()).or_default();
        if refs.iter().any(|r| r == cited) {
            return;
        }
        refs.push(cited.to_string());

        self.incoming
            .entry(cited.to_string())
            .or_default()
            .push(citing.to_string());
        self.nodes.insert(cited.to_string());
    }

    /// DOIs cited by `doi`, in citation order
    pub fn references(&self, doi: &str) -> &[String] {
        self.outgoing.get(doi).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// DOIs of stored papers citing `doi`
    pub fn cited_by(&self, doi: &str) -> &[String] {
        self.incoming.get(doi).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn citation_count(&self, doi: &str) -> usize {
        self.cited_by(doi).len()
    }

    pub fn reference_count(&self, doi: &str) -> usize {
        self.references(doi).len()
    }

    pub fn title(&self, doi: &str) -> Option<&str> {
        self.titles.get(doi).map(String::as_str)
    }

    pub fn contains(&self, doi: &str) -> bool {
        self.nodes.contains(doi)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    /// Cited DOIs with no stored record, sorted
    pub fn dangling(&self) -> Vec<String> {
        let mut dangling: Vec<String> = self
            .incoming
            .keys()
            .filter(|doi| !self.titles.contains_key(*doi))
            .cloned()
            .collect();
        dangling.sort();
        dangling
    }

    /// Up to `limit` most-cited DOIs; ties break on DOI
    pub fn most_cited(&self, limit: usize) -> Vec<CitedPaper> {
        let mut ranked: Vec<CitedPaper> = self
            .incoming
            .iter()
            .map(|(doi, citing)| CitedPaper {
                doi: doi.clone(),
                title: self.titles.get(doi).cloned(),
                citation_count: citing.len(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.citation_count
                .cmp(&a.citation_count)
                .then_with(|| a.doi.cmp(&b.doi))
        });
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(doi: &str, citations: &[&str]) -> PaperRecord {
        PaperRecord {
            doi: doi.into(),
            title: format!("Paper {}", doi),
            authors: Vec::new(),
            content: String::new(),
            citations: citations.iter().map(|c| c.to_string()).collect(),
            source: "test".into(),
            ingestion_date: None,
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = CitationGraph::from_records(&[]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.references("x").is_empty());
        assert!(graph.most_cited(5).is_empty());
    }

    #[test]
    fn test_adjacency_both_directions() {
        let graph = CitationGraph::from_records(&[
            record("A", &["B", "C"]),
            record("B", &["C"]),
            record("C", &[]),
        ]);

        assert_eq!(graph.references("A"), ["B", "C"]);
        assert_eq!(graph.cited_by("C"), ["A", "B"]);
        assert_eq!(graph.citation_count("C"), 2);
        assert_eq!(graph.reference_count("A"), 2);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.title("B"), Some("Paper B"));
    }

    #[test]
    fn test_dangling_targets_are_nodes() {
        let graph = CitationGraph::from_records(&[record("A", &["Z", "B"]), record("B", &[])]);

        assert!(graph.contains("Z"));
        assert_eq!(graph.dangling(), vec!["Z"]);
        assert_eq!(graph.title("Z"), None);
    }

    #[test]
    fn test_duplicate_and_blank_citations_ignored() {
        let graph = CitationGraph::from_records(&[record("A", &["B", " B", "", "B"])]);
        assert_eq!(graph.references("A"), ["B"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_most_cited_ranking() {
        let graph = CitationGraph::from_records(&[
            record("A", &["C", "D"]),
            record("B", &["C", "D"]),
            record("E", &["C"]),
        ]);

        let top = graph.most_cited(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].doi, "C");
        assert_eq!(top[0].citation_count, 3);
        assert_eq!(top[1].doi, "D");
        assert_eq!(top[1].title, None);
    }
}
