//! High-level workflow: ingest both datasets, run the matching engine,
//! report, and optionally export.

pub mod summary;

use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::export::export_to_csv;
use crate::ingest::load_inputs;
use crate::matching::match_records;
use summary::MatchSummary;

/// Run one full reconciliation pass for a validated configuration.
pub fn run(cfg: &AppConfig) -> Result<MatchSummary> {
    let (dataset_a, dataset_b) = load_inputs(&cfg.ingest)?;

    let started = Instant::now();
    let results = match_records(&dataset_a.records, &dataset_b.records, &cfg.matching)?;
    info!(
        "cross join of {}x{} produced {} candidates in {:.2?}",
        dataset_a.len(),
        dataset_b.len(),
        results.len(),
        started.elapsed()
    );

    let summary = MatchSummary::from_results(&results, cfg.matching.search_mode);

    if let Some(out_path) = cfg.export.out_path.as_deref() {
        export_to_csv(&results, &cfg.matching, &cfg.export, out_path)
            .with_context(|| format!("exporting results to {}", out_path))?;
        info!("exported {} rows to {}", results.len(), out_path);
    }

    Ok(summary)
}
