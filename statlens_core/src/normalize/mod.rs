//! Per-platform normalizers turning raw upstream shapes into an [`AnalysisResult`].
//!
//! [`AnalysisResult`]: crate::model::AnalysisResult

pub mod bilibili;
pub mod resolution;
pub mod youtube;

pub use bilibili::BilibiliNormalizer;
pub use youtube::YouTubeNormalizer;

use std::collections::HashSet;

use crate::model::{Competitor, MAX_COMPETITORS};

/// Ordered, deduplicated competitor list capped at [`MAX_COMPETITORS`].
///
/// Candidates are accepted in the order they are offered, so the first
/// occurrence of an id in upstream order is the one kept.
#[derive(Debug, Default)]
pub struct CompetitorSet {
    target_mid: Option<u64>,
    seen: HashSet<u64>,
    items: Vec<Competitor>,
}

impl CompetitorSet {
    pub fn new(target_mid: Option<u64>) -> Self {
        Self {
            target_mid,
            seen: HashSet::new(),
            items: Vec::with_capacity(MAX_COMPETITORS),
        }
    }

    /// Returns whether the candidate was kept.
    pub fn offer(&mut self, candidate: Competitor) -> bool {
        if self.is_full() || self.target_mid == Some(candidate.mid) {
            return false;
        }
        if !self.seen.insert(candidate.mid) {
            return false;
        }
        self.items.push(candidate);
        true
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_COMPETITORS
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Competitor> {
        self.items
    }
}

impl FromIterator<Competitor> for CompetitorSet {
    fn from_iter<I: IntoIterator<Item = Competitor>>(iter: I) -> Self {
        let mut set = CompetitorSet::new(None);
        for candidate in iter {
            set.offer(candidate);
        }
        set
    }
}
