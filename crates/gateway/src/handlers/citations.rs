//! Citation graph endpoints
//!
//! The graph is rebuilt from the store on every request.

use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use litexplorer_common::{
    citations::{CitationGraph, CitedPaper},
    errors::{AppError, Result},
};
use serde::{Deserialize, Serialize};

const TOP_CITED: usize = 10;

#[derive(Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub dangling: Vec<String>,
    pub most_cited: Vec<CitedPaper>,
}

#[derive(Debug, Deserialize)]
pub struct PaperCitationQuery {
    pub doi: String,
}

#[derive(Serialize)]
pub struct CitationLink {
    pub doi: String,
    /// None when the DOI has no stored record
    pub title: Option<String>,
}

#[derive(Serialize)]
pub struct PaperCitationsResponse {
    pub doi: String,
    pub title: Option<String>,
    pub references: Vec<CitationLink>,
    pub cited_by: Vec<CitationLink>,
    pub stats: CitationStats,
}

#[derive(Serialize)]
pub struct CitationStats {
    pub reference_count: usize,
    pub citation_count: usize,
}

/// Whole-graph summary
pub async fn summary(State(state): State<AppState>) -> Result<Json<GraphSummary>> {
    let graph = state.explorer.citation_graph().await?;
    Ok(Json(GraphSummary {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        dangling: graph.dangling(),
        most_cited: graph.most_cited(TOP_CITED),
    }))
}

/// References and citing papers for one DOI
pub async fn paper_citations(
    State(state): State<AppState>,
    Query(query): Query<PaperCitationQuery>,
) -> Result<Json<PaperCitationsResponse>> {
    let graph = state.explorer.citation_graph().await?;

    if !graph.contains(&query.doi) {
        return Err(AppError::NotFound {
            resource_type: "Paper".to_string(),
            id: query.doi,
        });
    }

    let links = |dois: &[String]| -> Vec<CitationLink> {
        dois.iter().map(|doi| link(&graph, doi)).collect()
    };

    Ok(Json(PaperCitationsResponse {
        title: graph.title(&query.doi).map(str::to_string),
        references: links(graph.references(&query.doi)),
        cited_by: links(graph.cited_by(&query.doi)),
        stats: CitationStats {
            reference_count: graph.reference_count(&query.doi),
            citation_count: graph.citation_count(&query.doi),
        },
        doi: query.doi,
    }))
}

fn link(graph: &CitationGraph, doi: &str) -> CitationLink {
    CitationLink {
        doi: doi.to_string(),
        title: graph.title(doi).map(str::to_string),
    }
}
