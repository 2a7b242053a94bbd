//! Run summary over a computed candidate set.

use serde::Serialize;

use crate::config::SearchMode;
use crate::models::MatchResult;

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub search_mode: SearchMode,
    /// Candidates emitted (all satisfy the gating criterion).
    pub total: usize,
    pub amount_matched: usize,
    pub identity_matched: usize,
    /// Identity matches achieved via a fallback heuristic.
    pub partial_identity: usize,
}

impl MatchSummary {
    pub fn from_results(results: &[MatchResult<'_>], search_mode: SearchMode) -> Self {
        let mut amount_matched = 0;
        let mut identity_matched = 0;
        let mut partial_identity = 0;
        for r in results {
            if r.amount_matched {
                amount_matched += 1;
            }
            if r.identity_matched {
                identity_matched += 1;
            }
            if r.match_detail.is_some() {
                partial_identity += 1;
            }
        }
        Self {
            search_mode,
            total: results.len(),
            amount_matched,
            identity_matched,
            partial_identity,
        }
    }

    /// How many candidates also satisfy the criterion that did not gate the
    /// run ("N also match on amount" when searching identity-first, and vice
    /// versa).
    pub fn secondary_matches(&self) -> usize {
        match self.search_mode {
            SearchMode::AmountFirst => self.identity_matched,
            SearchMode::IdentityFirst => self.amount_matched,
        }
    }

    pub fn gating_label(&self) -> &'static str {
        match self.search_mode {
            SearchMode::AmountFirst => "amount",
            SearchMode::IdentityFirst => "identity",
        }
    }

    pub fn secondary_label(&self) -> &'static str {
        match self.search_mode {
            SearchMode::AmountFirst => "identity",
            SearchMode::IdentityFirst => "amount",
        }
    }
}

impl std::fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} candidates matched on {}; {} also match on {} ({} partial identity)",
            self.total,
            self.gating_label(),
            self.secondary_matches(),
            self.secondary_label(),
            self.partial_identity
        )
    }
}
