//! Matching engine: exhaustive ordered cross join of two record sets.
//!
//! O(|A|x|B|) by design: reconciliation batches are thousands of rows, and
//! exhaustive recall matters more than scale here. A record may appear in
//! many result rows; the engine surfaces candidates, final disambiguation is
//! a reporting concern.

use rayon::prelude::*;

use crate::config::{MatchConfig, SearchMode};
use crate::error::ConfigError;
use crate::models::{MatchResult, Record, Value};

pub mod identity;

use identity::IdentityMatcher;

/// Run the pairwise comparison between two record sets.
///
/// Pure function of its inputs: same records and config always yield the
/// same results in the same order (outer loop over A, inner over B, both in
/// input order). The outer loop is partitioned across rayon workers; the
/// order-preserving collect keeps the ordering invariant.
///
/// Config is validated eagerly; per-record malformation (missing fields,
/// non-numeric amounts) degrades the affected comparison and never fails
/// the run. Empty inputs produce an empty result.
pub fn match_records<'a>(
    records_a: &'a [Record],
    records_b: &'a [Record],
    config: &MatchConfig,
) -> Result<Vec<MatchResult<'a>>, ConfigError> {
    config.validate()?;

    // Compile the identity pattern once for the whole cross join.
    let matcher = IdentityMatcher::from_config(config);
    let matcher = &matcher;

    let results: Vec<MatchResult<'a>> = records_a
        .par_iter()
        .flat_map_iter(|record_a| {
            records_b
                .iter()
                .filter_map(move |record_b| compare_pair(record_a, record_b, config, matcher))
        })
        .collect();

    Ok(results)
}

/// Compare one pair; `Some` iff the gating criterion for the configured
/// search mode is satisfied.
fn compare_pair<'a>(
    record_a: &'a Record,
    record_b: &'a Record,
    config: &MatchConfig,
    matcher: &IdentityMatcher,
) -> Option<MatchResult<'a>> {
    let amount_a = record_a
        .get(&config.amount_field_a)
        .and_then(Value::as_number);
    let amount_b = record_b
        .get(&config.amount_field_b)
        .and_then(Value::as_number);

    // Missing or non-numeric amounts propagate as "not numeric" and the
    // amount comparison fails. Exact floating comparison, no hidden epsilon.
    let amount_difference = amount_a
        .zip(amount_b)
        .map(|(a, b)| (a - b).abs())
        .filter(|d| !d.is_nan());
    let amount_matched =
        amount_difference.is_some_and(|d| d <= config.amount_tolerance);

    let verdict = matcher.matches_values(
        record_a.get(&config.identity_field_a),
        record_b.get(&config.identity_field_b),
    );
    let identity_matched = verdict.matched();

    let include = match config.search_mode {
        SearchMode::AmountFirst => amount_matched,
        SearchMode::IdentityFirst => identity_matched,
    };
    if !include {
        return None;
    }

    Some(MatchResult {
        record_a,
        record_b,
        amount_difference,
        amount_matched,
        identity_matched,
        match_detail: verdict.into_evidence(),
    })
}
