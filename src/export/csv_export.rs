use anyhow::Result;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::BufWriter;

use crate::config::{ExportConfig, MatchConfig};
use crate::models::{MatchResult, Record, Value};

/// Serialize the candidate set to CSV: both sides' identifier, amount and
/// identity fields, the amount difference, both match flags, and the partial
/// evidence. Id columns are blank when the id field is unset or missing.
pub fn export_to_csv(
    results: &[MatchResult<'_>],
    match_cfg: &MatchConfig,
    export_cfg: &ExportConfig,
    path: &str,
) -> Result<()> {
    let file = File::create(path)?;
    let buf_writer = BufWriter::with_capacity(512 * 1024, file);
    let mut w = WriterBuilder::new().from_writer(buf_writer);
    write_results(&mut w, results, match_cfg, export_cfg)?;
    w.flush()?;
    Ok(())
}

fn write_results<W: std::io::Write>(
    w: &mut Writer<W>,
    results: &[MatchResult<'_>],
    match_cfg: &MatchConfig,
    export_cfg: &ExportConfig,
) -> Result<()> {
    let headers = vec![
        "A_Id".to_string(),
        format!("A_{}", match_cfg.amount_field_a),
        format!("A_{}", match_cfg.identity_field_a),
        "B_Id".to_string(),
        format!("B_{}", match_cfg.amount_field_b),
        format!("B_{}", match_cfg.identity_field_b),
        "AmountDifference".to_string(),
        "IdentityMatched".to_string(),
        "AmountMatched".to_string(),
        "MatchDetail".to_string(),
    ];
    w.write_record(&headers)?;

    for result in results {
        // Pre-format computed cells so the record can borrow them uniformly.
        let id_a = cell(result.record_a, export_cfg.id_field_a.as_deref());
        let amount_a = cell(result.record_a, Some(&match_cfg.amount_field_a));
        let identity_a = cell(result.record_a, Some(&match_cfg.identity_field_a));
        let id_b = cell(result.record_b, export_cfg.id_field_b.as_deref());
        let amount_b = cell(result.record_b, Some(&match_cfg.amount_field_b));
        let identity_b = cell(result.record_b, Some(&match_cfg.identity_field_b));
        let difference = result
            .amount_difference
            .map(|d| format!("{:.2}", d))
            .unwrap_or_default();
        let identity_flag = flag(result.identity_matched);
        let amount_flag = flag(result.amount_matched);
        let detail = result.match_detail.as_deref().unwrap_or("");

        w.write_record([
            id_a.as_str(),
            amount_a.as_str(),
            identity_a.as_str(),
            id_b.as_str(),
            amount_b.as_str(),
            identity_b.as_str(),
            difference.as_str(),
            identity_flag,
            amount_flag,
            detail,
        ])?;
    }
    Ok(())
}

fn cell(record: &Record, field: Option<&str>) -> String {
    field
        .and_then(|f| record.get(f))
        .and_then(Value::as_text)
        .map(|c| c.into_owned())
        .unwrap_or_default()
}

fn flag(matched: bool) -> &'static str {
    if matched {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchMode;

    fn record(id: Option<&str>, amount: f64, who: &str) -> Record {
        let mut r = Record::new();
        if let Some(id) = id {
            r.set("Id", Value::Text(id.into()));
        }
        r.set("Total", Value::Number(amount));
        r.set("Email", Value::Text(who.into()));
        r
    }

    fn config() -> (MatchConfig, ExportConfig) {
        let match_cfg = MatchConfig {
            amount_field_a: "Total".into(),
            amount_field_b: "Total".into(),
            identity_field_a: "Email".into(),
            identity_field_b: "Email".into(),
            search_mode: SearchMode::AmountFirst,
            ..MatchConfig::default()
        };
        let export_cfg = ExportConfig {
            out_path: None,
            id_field_a: Some("Id".into()),
            id_field_b: Some("Id".into()),
        };
        (match_cfg, export_cfg)
    }

    fn rendered(results: &[MatchResult<'_>]) -> String {
        let (match_cfg, export_cfg) = config();
        let mut w = WriterBuilder::new().from_writer(vec![]);
        write_results(&mut w, results, &match_cfg, &export_cfg).unwrap();
        String::from_utf8(w.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn exports_configured_columns_and_flags() {
        let a = record(Some("D-1"), 100.0, "ana_9");
        let b = record(Some("X-7"), 101.5, "ana lopez_9");
        let results = vec![MatchResult {
            record_a: &a,
            record_b: &b,
            amount_difference: Some(1.5),
            amount_matched: true,
            identity_matched: true,
            match_detail: Some("shared numeric suffix '9'".into()),
        }];
        let text = rendered(&results);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "A_Id,A_Total,A_Email,B_Id,B_Total,B_Email,AmountDifference,IdentityMatched,AmountMatched,MatchDetail"
        );
        assert_eq!(
            lines.next().unwrap(),
            "D-1,100,ana_9,X-7,101.5,ana lopez_9,1.50,yes,yes,shared numeric suffix '9'"
        );
    }

    #[test]
    fn missing_ids_and_difference_render_empty() {
        let a = record(None, 100.0, "ana");
        let b = record(None, 101.0, "ana");
        let results = vec![MatchResult {
            record_a: &a,
            record_b: &b,
            amount_difference: None,
            amount_matched: false,
            identity_matched: true,
            match_detail: None,
        }];
        let text = rendered(&results);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, ",100,ana,,101,ana,,yes,no,");
    }
}
