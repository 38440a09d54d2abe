use crate::advice;
use crate::error::Result;
use crate::normalize::normalize;
use crate::similarity::sequence_ratio;
use remedy_catalog::{CatalogId, CatalogRow, CatalogStore};

/// Best-scoring catalog row for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub row: CatalogRow,
    pub score: f64,
}

/// Scans both catalogs for the entry most similar to a free-text error
/// message and renders remediation advice for it.
pub struct RecommendationEngine {
    store: CatalogStore,
}

impl RecommendationEngine {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Remediation advice for `query`. Total: every outcome, including a
    /// catalog failure, comes back as display-ready text.
    pub async fn lookup(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return advice::no_input();
        }
        match self.best_match(query).await {
            Ok(Some(best)) => advice::render_match(&best),
            Ok(None) => advice::no_match(),
            Err(err) => advice::catalogs_unavailable(&err),
        }
    }

    /// Highest-scoring catalog row, or `None` when the query normalizes to
    /// empty (catalogs are not touched) or when no row scores above zero.
    ///
    /// CVR rows are scanned before common rows, and a candidate replaces the
    /// running best only on a strictly greater score, so the earliest-seen
    /// row wins ties.
    pub async fn best_match(&self, query: &str) -> Result<Option<Match>> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Ok(None);
        }

        let cvr = self.store.rows(CatalogId::Cvr).await?;
        let common = self.store.rows(CatalogId::Common).await?;

        let mut best: Option<Match> = None;
        let mut best_score = 0.0f64;
        for row in cvr.iter().chain(common.iter()) {
            let pattern = normalize(&row.pattern);
            if pattern.is_empty() {
                continue;
            }
            let score = sequence_ratio(&needle, &pattern);
            if score > best_score {
                best_score = score;
                best = Some(Match {
                    row: row.clone(),
                    score,
                });
            }
        }

        if let Some(best) = &best {
            log::debug!(
                "best match catalog={} score={:.2} pattern={:?}",
                best.row.catalog,
                best.score,
                best.row.pattern
            );
        }
        Ok(best)
    }
}
