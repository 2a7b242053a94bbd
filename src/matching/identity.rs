//! Identity-matching policy: an ordered cascade of comparison strategies.
//!
//! The cascade tries the most specific check first and falls back to looser
//! heuristics only when partial matching is enabled, bounding false-positive
//! risk. First success wins.

use regex::Regex;

use crate::config::MatchConfig;
use crate::models::Value;
use crate::normalize::{normalize_identity, trailing_digits};

/// Outcome of one identity comparison.
///
/// Evidence is carried only for partial matches; an exact hit (including a
/// case- or whitespace-only variant) has none, so callers can tell a true
/// exact hit from a heuristic one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityVerdict {
    NoMatch,
    Exact,
    Partial { evidence: String },
}

impl IdentityVerdict {
    pub fn matched(&self) -> bool {
        !matches!(self, IdentityVerdict::NoMatch)
    }

    pub fn evidence(&self) -> Option<&str> {
        match self {
            IdentityVerdict::Partial { evidence } => Some(evidence),
            _ => None,
        }
    }

    pub fn into_evidence(self) -> Option<String> {
        match self {
            IdentityVerdict::Partial { evidence } => Some(evidence),
            _ => None,
        }
    }
}

/// Stateless policy deciding whether two identity strings denote the same
/// identity. Built once per run so the configured pattern is compiled once
/// and reused across the whole cross join.
#[derive(Debug, Clone)]
pub struct IdentityMatcher {
    partial: bool,
    pattern: Option<Regex>,
}

impl IdentityMatcher {
    pub fn from_config(cfg: &MatchConfig) -> Self {
        let pattern = if cfg.partial_identity {
            match Regex::new(&cfg.identity_pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!(
                        "invalid identity pattern {:?}; pattern strategy disabled for this run: {}",
                        cfg.identity_pattern,
                        e
                    );
                    None
                }
            }
        } else {
            None
        };
        Self {
            partial: cfg.partial_identity,
            pattern,
        }
    }

    /// Compare two record cells. Absent cells never match.
    pub fn matches_values(&self, a: Option<&Value>, b: Option<&Value>) -> IdentityVerdict {
        match (a.and_then(Value::as_text), b.and_then(Value::as_text)) {
            (Some(a), Some(b)) => self.matches(&a, &b),
            _ => IdentityVerdict::NoMatch,
        }
    }

    /// Compare two identity strings.
    ///
    /// Strategy order: exact on normalized strings, then (when partial
    /// matching is enabled) pattern, containment, trailing numeric suffix.
    pub fn matches(&self, a: &str, b: &str) -> IdentityVerdict {
        let na = normalize_identity(a);
        let nb = normalize_identity(b);
        if na.is_empty() || nb.is_empty() {
            return IdentityVerdict::NoMatch;
        }

        if na == nb {
            return IdentityVerdict::Exact;
        }

        if !self.partial {
            return IdentityVerdict::NoMatch;
        }

        // Pattern: both sides must match and the first matched substring
        // must be identical on both.
        if let Some(re) = &self.pattern {
            if let (Some(ma), Some(mb)) = (re.find(&na), re.find(&nb)) {
                if ma.as_str() == mb.as_str() {
                    return IdentityVerdict::Partial {
                        evidence: format!(
                            "pattern '{}' matched '{}' in both",
                            re.as_str(),
                            ma.as_str()
                        ),
                    };
                }
            }
        }

        // Containment, either direction. Both sides are non-empty here.
        if na.contains(nb.as_str()) {
            return IdentityVerdict::Partial {
                evidence: format!("'{}' contains '{}'", na, nb),
            };
        }
        if nb.contains(na.as_str()) {
            return IdentityVerdict::Partial {
                evidence: format!("'{}' contains '{}'", nb, na),
            };
        }

        // Trailing numeric suffix, textual equality.
        if let (Some(da), Some(db)) = (trailing_digits(&na), trailing_digits(&nb)) {
            if da == db {
                return IdentityVerdict::Partial {
                    evidence: format!("shared numeric suffix '{}'", da),
                };
            }
        }

        IdentityVerdict::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(partial: bool, pattern: &str) -> IdentityMatcher {
        IdentityMatcher::from_config(&MatchConfig {
            partial_identity: partial,
            identity_pattern: pattern.into(),
            ..MatchConfig::default()
        })
    }

    #[test]
    fn exact_reflexive_any_config() {
        for partial in [false, true] {
            let m = matcher(partial, r"_\d+$");
            assert_eq!(m.matches("carla.diaz", "carla.diaz"), IdentityVerdict::Exact);
        }
    }

    #[test]
    fn case_and_whitespace_variants_count_as_exact() {
        let m = matcher(true, r"_\d+$");
        let v = m.matches("  JOHN_1 ", "john_1");
        assert_eq!(v, IdentityVerdict::Exact);
        assert!(v.evidence().is_none());
    }

    #[test]
    fn absent_or_empty_side_never_matches() {
        let m = matcher(true, r"_\d+$");
        assert_eq!(m.matches("", "ana"), IdentityVerdict::NoMatch);
        assert_eq!(m.matches("ana", "   "), IdentityVerdict::NoMatch);
        assert_eq!(
            m.matches_values(None, Some(&Value::Text("ana".into()))),
            IdentityVerdict::NoMatch
        );
        assert_eq!(
            m.matches_values(Some(&Value::Null), Some(&Value::Text("ana".into()))),
            IdentityVerdict::NoMatch
        );
    }

    #[test]
    fn numeric_cells_compare_as_text() {
        let m = matcher(true, r"\d+$");
        assert_eq!(
            m.matches_values(Some(&Value::Number(42.0)), Some(&Value::Text("42".into()))),
            IdentityVerdict::Exact
        );
    }

    #[test]
    fn partial_disabled_suppresses_heuristics() {
        let m = matcher(false, r"_\d+$");
        // Containment and shared suffix would both succeed with partial on.
        assert_eq!(m.matches("john.smith", "smith"), IdentityVerdict::NoMatch);
        assert_eq!(m.matches("alice_7", "bob_7"), IdentityVerdict::NoMatch);
    }

    #[test]
    fn pattern_wins_over_containment_and_suffix() {
        let m = matcher(true, r"\d+");
        // "user12" vs "12": pattern, containment, and suffix would all hit.
        let v = m.matches("user12", "12");
        assert_eq!(
            v.evidence(),
            Some("pattern '\\d+' matched '12' in both")
        );
    }

    #[test]
    fn pattern_requires_same_fragment() {
        let m = matcher(true, r"_\d+$");
        // Fragments differ (_1 vs _2); later strategies fail too.
        assert_eq!(m.matches("user_1", "user_2"), IdentityVerdict::NoMatch);
    }

    #[test]
    fn containment_either_direction() {
        let m = matcher(true, r"xyz");
        let v = m.matches("smith", "john.smith");
        assert_eq!(v.evidence(), Some("'john.smith' contains 'smith'"));
        let v = m.matches("john.smith", "smith");
        assert_eq!(v.evidence(), Some("'john.smith' contains 'smith'"));
    }

    #[test]
    fn trailing_suffix_is_last_resort() {
        // Pattern never matches, containment fails, suffix agrees.
        let m = matcher(true, r"xyz");
        let v = m.matches("alice_7", "bob_7");
        assert_eq!(v.evidence(), Some("shared numeric suffix '7'"));
    }

    #[test]
    fn invalid_pattern_skips_strategy_only() {
        let m = matcher(true, "(unclosed");
        // Exact still works.
        assert_eq!(m.matches("ana", "ana"), IdentityVerdict::Exact);
        // Later strategies still apply.
        let v = m.matches("ana.lopez", "lopez");
        assert_eq!(v.evidence(), Some("'ana.lopez' contains 'lopez'"));
    }

    #[test]
    fn no_trailing_digits_no_suffix_match() {
        let m = matcher(true, r"_\d+$");
        // Spec scenario: john_smith has no pattern hit and no trailing digits.
        assert_eq!(m.matches("john_smith", "jsmith_1"), IdentityVerdict::NoMatch);
    }

    #[test]
    fn evidence_is_deterministic() {
        let m = matcher(true, r"_\d+$");
        let v1 = m.matches("acct_90", "other_90");
        let v2 = m.matches("acct_90", "other_90");
        assert_eq!(v1, v2);
        assert_eq!(
            v1.evidence(),
            Some("pattern '_\\d+$' matched '_90' in both")
        );
    }
}
