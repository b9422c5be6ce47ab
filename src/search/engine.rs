//! Search Engine Integration
//!
//! Scores every politician name against a query, keeps the candidates that
//! clear the threshold and memoizes the ranked ids in the result cache.

use super::fuzzy::normalize;
use super::ranking::{MatchScore, ScoringWeights};
use crate::cache::{CacheKey, ResultCache};
use crate::store::{PoliticianRecord, PoliticianStore};
use std::sync::Arc;
use tracing::debug;

/// Search result with the matched record and its score
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    pub record: &'a PoliticianRecord,
    pub score: MatchScore,
}

/// Fuzzy name search over the politician store
pub struct SearchEngine {
    store: Arc<PoliticianStore>,
    cache: ResultCache,
    scoring_weights: ScoringWeights,
    // normalized names, aligned with `store.all()`
    names: Vec<String>,
}

impl SearchEngine {
    pub fn new(store: Arc<PoliticianStore>, cache: ResultCache) -> Self {
        Self::with_weights(store, cache, ScoringWeights::default())
    }

    pub fn with_weights(
        store: Arc<PoliticianStore>,
        cache: ResultCache,
        scoring_weights: ScoringWeights,
    ) -> Self {
        let names = store.all().iter().map(|r| normalize(&r.name)).collect();
        Self {
            store,
            cache,
            scoring_weights,
            names,
        }
    }

    pub fn store(&self) -> &PoliticianStore {
        &self.store
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Search politicians by name.
    ///
    /// Returns at most `limit` records (a limit of 0 is treated as 1), best
    /// match first. `zip_filter` is accepted and becomes part of the cache
    /// key but does not narrow the results.
    pub fn search(
        &self,
        query: &str,
        zip_filter: Option<&str>,
        limit: usize,
    ) -> Vec<&PoliticianRecord> {
        let limit = limit.max(1);
        let normalized = normalize(query);
        let key = CacheKey::new(&normalized, zip_filter, limit);

        if let Some(ids) = self.cache.get(&key) {
            debug!("Search cache hit for {:?} (limit {})", normalized, limit);
            return ids.iter().filter_map(|&id| self.store.get(id)).collect();
        }

        debug!("Search cache miss for {:?} (limit {})", normalized, limit);
        let ranked = self.rank(&normalized, limit);
        let ids = ranked.iter().map(|result| result.record.id).collect();
        self.cache.insert(key, ids);

        ranked.into_iter().map(|result| result.record).collect()
    }

    /// Uncached search that keeps the score breakdown of every result
    pub fn search_scored(&self, query: &str, limit: usize) -> Vec<SearchResult<'_>> {
        self.rank(&normalize(query), limit.max(1))
    }

    fn rank(&self, normalized_query: &str, limit: usize) -> Vec<SearchResult<'_>> {
        let mut results: Vec<SearchResult<'_>> = self
            .store
            .all()
            .iter()
            .zip(&self.names)
            .filter_map(|(record, name)| {
                let score = MatchScore::calculate(normalized_query, name, &self.scoring_weights);
                score
                    .passes(&self.scoring_weights)
                    .then_some(SearchResult { record, score })
            })
            .collect();

        // Highest score first, ties by ascending id
        results.sort_by(|a, b| {
            a.score
                .rank_cmp(&b.score)
                .then_with(|| a.record.id.cmp(&b.record.id))
        });
        results.truncate(limit);
        results
    }
}
