//! Uniqueness filter — exact fingerprint lookup, then a fuzzy scan of recent history.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::store::{Store, StoreError};
use crate::uniqueness::fingerprint::{fingerprint, similarity};

/// Posts compared in the fuzzy scan.
pub const RECENT_WINDOW: i64 = 100;

/// A candidate at or above this similarity to any recent post is a near-duplicate.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum UniquenessVerdict {
    Unique,
    ExactDuplicate { fingerprint: String },
    NearDuplicate { similarity: f64, existing_quote: String },
}

impl UniquenessVerdict {
    pub fn is_unique(&self) -> bool {
        matches!(self, UniquenessVerdict::Unique)
    }
}

pub struct UniquenessFilter {
    store: Arc<dyn Store>,
    recent_window: i64,
    threshold: f64,
}

impl UniquenessFilter {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            recent_window: RECENT_WINDOW,
            threshold: SIMILARITY_THRESHOLD,
        }
    }

    /// Checks a candidate quote against stored history. Short-circuits on the
    /// exact match before loading the recent window.
    pub async fn check(&self, quote: &str) -> Result<UniquenessVerdict, StoreError> {
        let hash = fingerprint(quote);

        if self.store.find_post_by_fingerprint(&hash).await?.is_some() {
            warn!("Quote already exists (exact match)");
            return Ok(UniquenessVerdict::ExactDuplicate { fingerprint: hash });
        }

        let recent = self.store.find_recent_posts(self.recent_window).await?;
        for post in &recent {
            let score = similarity(quote, &post.quote);
            if score >= self.threshold {
                warn!(
                    "Quote too similar to existing post ({:.1}% similar)",
                    score * 100.0
                );
                return Ok(UniquenessVerdict::NearDuplicate {
                    similarity: score,
                    existing_quote: post.quote.clone(),
                });
            }
        }

        Ok(UniquenessVerdict::Unique)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn is_unique(&self, quote: &str) -> Result<bool, StoreError> {
        Ok(self.check(quote).await?.is_unique())
    }
}
