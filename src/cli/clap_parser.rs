use crate::config::{AppConfig, ExportConfig, IngestConfig, MatchConfig, SearchMode};
use crate::error::ConfigError;
use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum, Debug)]
pub enum SearchModeOpt {
    AmountFirst,
    IdentityFirst,
}

impl SearchModeOpt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmountFirst => "amount-first",
            Self::IdentityFirst => "identity-first",
        }
    }

    pub fn to_mode(self) -> SearchMode {
        match self {
            Self::AmountFirst => SearchMode::AmountFirst,
            Self::IdentityFirst => SearchMode::IdentityFirst,
        }
    }
}

impl std::fmt::Display for SearchModeOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "txn_matcher",
    version,
    about = "Cross-dataset transaction reconciliation (CLI)",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Dataset A file (env: TXN_MATCHER_FILE_A)
    #[arg(value_name = "FILE_A", env = "TXN_MATCHER_FILE_A")]
    pub file_a: String,
    /// Dataset B file (env: TXN_MATCHER_FILE_B)
    #[arg(value_name = "FILE_B", env = "TXN_MATCHER_FILE_B")]
    pub file_b: String,
    /// Amount field name in dataset A
    #[arg(long = "amount-field-a", value_name = "FIELD")]
    pub amount_field_a: String,
    /// Amount field name in dataset B
    #[arg(long = "amount-field-b", value_name = "FIELD")]
    pub amount_field_b: String,
    /// Identity field name in dataset A
    #[arg(long = "identity-field-a", value_name = "FIELD")]
    pub identity_field_a: String,
    /// Identity field name in dataset B
    #[arg(long = "identity-field-b", value_name = "FIELD")]
    pub identity_field_b: String,
    /// Maximum allowed absolute amount difference
    #[arg(long = "tolerance", value_name = "AMOUNT", default_value_t = 2.0)]
    pub tolerance: f64,
    /// Which criterion gates inclusion in the result set
    #[arg(long = "mode", value_name = "MODE", default_value_t = SearchModeOpt::IdentityFirst)]
    pub mode: SearchModeOpt,
    /// Disable partial identity strategies (exact matching only)
    #[arg(long = "exact-identity-only")]
    pub exact_identity_only: bool,
    /// Regex for the partial pattern strategy
    #[arg(long = "pattern", value_name = "REGEX", default_value = r"_\d+$")]
    pub pattern: String,
    /// Write the result set to this CSV path
    #[arg(long = "out", value_name = "OUT_PATH")]
    pub out_path: Option<String>,
    /// Stable identifier column in dataset A (export only)
    #[arg(long = "id-field-a", value_name = "FIELD")]
    pub id_field_a: Option<String>,
    /// Stable identifier column in dataset B (export only)
    #[arg(long = "id-field-b", value_name = "FIELD")]
    pub id_field_b: Option<String>,
    /// Label for dataset A in logs and summaries
    #[arg(long = "label-a", value_name = "LABEL")]
    pub label_a: Option<String>,
    /// Label for dataset B in logs and summaries
    #[arg(long = "label-b", value_name = "LABEL")]
    pub label_b: Option<String>,
}

impl Cli {
    pub fn to_app_config(&self) -> Result<AppConfig, ConfigError> {
        let cfg = AppConfig {
            ingest: IngestConfig {
                file_a: self.file_a.clone(),
                file_b: self.file_b.clone(),
                label_a: self.label_a.clone(),
                label_b: self.label_b.clone(),
            },
            matching: MatchConfig {
                amount_field_a: self.amount_field_a.clone(),
                amount_field_b: self.amount_field_b.clone(),
                amount_tolerance: self.tolerance,
                identity_field_a: self.identity_field_a.clone(),
                identity_field_b: self.identity_field_b.clone(),
                search_mode: self.mode.to_mode(),
                partial_identity: !self.exact_identity_only,
                identity_pattern: self.pattern.clone(),
            },
            export: ExportConfig {
                out_path: self.out_path.clone(),
                id_field_a: self.id_field_a.clone(),
                id_field_b: self.id_field_b.clone(),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

pub fn parse_cli_to_app_config() -> Result<AppConfig, ConfigError> {
    let cli = Cli::parse();
    cli.to_app_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "txn_matcher",
            "a.csv",
            "b.csv",
            "--amount-field-a",
            "Total Cost",
            "--amount-field-b",
            "Total",
            "--identity-field-a",
            "Creator Email",
            "--identity-field-b",
            "Vendor Email",
        ]
    }

    #[test]
    fn defaults_mirror_interactive_tool() {
        let cli = Cli::try_parse_from(base_args()).unwrap();
        let cfg = cli.to_app_config().unwrap();
        assert_eq!(cfg.matching.amount_tolerance, 2.0);
        assert_eq!(cfg.matching.search_mode, SearchMode::IdentityFirst);
        assert!(cfg.matching.partial_identity);
        assert_eq!(cfg.matching.identity_pattern, r"_\d+$");
        assert!(cfg.export.out_path.is_none());
    }

    #[test]
    fn exact_identity_only_disables_partial() {
        let mut args = base_args();
        args.push("--exact-identity-only");
        let cli = Cli::try_parse_from(args).unwrap();
        let cfg = cli.to_app_config().unwrap();
        assert!(!cfg.matching.partial_identity);
    }

    #[test]
    fn negative_tolerance_rejected_by_validation() {
        let mut args = base_args();
        args.push("--tolerance=-1");
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.to_app_config().is_err());
    }

    #[test]
    fn mode_option_maps_to_search_mode() {
        let mut args = base_args();
        args.extend(["--mode", "amount-first"]);
        let cli = Cli::try_parse_from(args).unwrap();
        let cfg = cli.to_app_config().unwrap();
        assert_eq!(cfg.matching.search_mode, SearchMode::AmountFirst);
    }
}
