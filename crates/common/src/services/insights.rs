//! Recommendation and trend queriers

use super::truncate_chars;
use crate::db::PaperRepository;
use crate::errors::{AppError, Result};
use crate::llm::ResearchModel;
use crate::models::{Recommendation, TrendReport};
use chrono::{Months, NaiveDateTime, Timelike, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Suggests related papers for a stored record
pub struct RecommendationQuerier {
    repository: PaperRepository,
    model: Arc<dyn ResearchModel>,
    max_chars: usize,
}

impl RecommendationQuerier {
    pub fn new(repository: PaperRepository, model: Arc<dyn ResearchModel>, max_chars: usize) -> Self {
        Self {
            repository,
            model,
            max_chars,
        }
    }

    /// Up to `n` suggestions for the paper stored under `doi`.
    ///
    /// An unknown DOI is `PaperNotFound`; a model failure is an empty list.
    #[instrument(skip(self))]
    pub async fn recommend(&self, doi: &str, n: usize) -> Result<Vec<Recommendation>> {
        let paper = self
            .repository
            .find_by_doi(doi)
            .await?
            .ok_or_else(|| AppError::PaperNotFound {
                doi: doi.to_string(),
            })?;

        let excerpt = truncate_chars(&paper.content, self.max_chars);
        match self.model.recommend(&paper.title, excerpt, n).await {
            Ok(recommendations) => {
                debug!(count = recommendations.len(), "Recommendations received");
                Ok(recommendations)
            }
            Err(e) => {
                warn!(error = %e, "Recommendations unavailable");
                Ok(Vec::new())
            }
        }
    }
}

/// Summarizes recently ingested content
pub struct TrendQuerier {
    repository: PaperRepository,
    model: Arc<dyn ResearchModel>,
    max_chars: usize,
}

impl TrendQuerier {
    pub fn new(repository: PaperRepository, model: Arc<dyn ResearchModel>, max_chars: usize) -> Self {
        Self {
            repository,
            model,
            max_chars,
        }
    }

    /// Trend analysis over records ingested in the last `window_years`.
    ///
    /// Never fails: an empty window and any store or model failure come back
    /// as status sentinels.
    #[instrument(skip(self))]
    pub async fn analyze_trends(&self, window_years: u32) -> TrendReport {
        let cutoff = window_start(Utc::now().naive_utc(), window_years);

        let papers = match self.repository.find_since(cutoff).await {
            Ok(papers) => papers,
            Err(e) => {
                warn!(error = %e, "Trend window could not be read");
                return TrendReport::error(e.to_string());
            }
        };

        if papers.is_empty() {
            info!(%cutoff, "No papers in trend window");
            return TrendReport::insufficient_data();
        }

        let joined = papers
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let corpus = truncate_chars(&joined, self.max_chars);

        match self.model.analyze_trends(corpus, window_years).await {
            Ok(analysis) => {
                info!(papers = papers.len(), keys = analysis.len(), "Trend analysis completed");
                TrendReport::Analysis(analysis)
            }
            Err(e) => {
                warn!(error = %e, "Trend analysis unavailable");
                TrendReport::error(e.to_string())
            }
        }
    }
}

/// Start of a window reaching back `window_years` calendar years from `now`
fn window_start(now: NaiveDateTime, window_years: u32) -> NaiveDateTime {
    let now = now.with_nanosecond(0).unwrap_or(now);
    now.checked_sub_months(Months::new(window_years.saturating_mul(12)))
        .unwrap_or(NaiveDateTime::MIN)
}
