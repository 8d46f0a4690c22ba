//! Ranking Store — sole owner of the most recent ranking result.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{RankingEntry, RankingResponse, ResumeDetail};

#[derive(Debug, Default)]
pub struct RankingStore {
    ranked: Vec<RankingEntry>,
    details: Vec<ResumeDetail>,
    /// filename → position in `details`
    index: HashMap<String, usize>,
    received_at: Option<DateTime<Utc>>,
    generation: u64,
}

impl RankingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a new result wholesale. Nothing from the previous result survives.
    ///
    /// The selection is not touched here; `RankingView` resets it in the same call.
    pub fn replace(&mut self, response: RankingResponse) {
        let RankingResponse { ranked, details } = response;

        let index = details
            .iter()
            .enumerate()
            .map(|(i, d)| (d.filename.clone(), i))
            .collect();

        self.ranked = ranked;
        self.details = details;
        self.index = index;
        self.received_at = Some(Utc::now());
        self.generation += 1;

        debug!(
            generation = self.generation,
            ranked = self.ranked.len(),
            details = self.details.len(),
            "ranking store replaced"
        );
    }

    /// Constant-time lookup. Serves detail records that are not in the ranked list too.
    pub fn lookup(&self, filename: &str) -> Option<&ResumeDetail> {
        self.index.get(filename).map(|&i| &self.details[i])
    }

    pub fn ranked(&self) -> &[RankingEntry] {
        &self.ranked
    }

    pub fn contains_ranked(&self, filename: &str) -> bool {
        self.ranked.iter().any(|e| e.filename == filename)
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// When the current result arrived; `None` before the first result.
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.received_at
    }

    /// Number of results applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
