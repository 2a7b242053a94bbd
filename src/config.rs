use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which criterion gates inclusion of a candidate pair in the result set.
/// The non-gating criterion is still computed and attached for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    AmountFirst,
    IdentityFirst,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmountFirst => "amount_first",
            Self::IdentityFirst => "identity_first",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter set governing one matching run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Monetary field name in dataset A / dataset B.
    pub amount_field_a: String,
    pub amount_field_b: String,
    /// Maximum allowed absolute amount difference. 0 requires exact amounts.
    pub amount_tolerance: f64,
    /// Identity field name in dataset A / dataset B.
    pub identity_field_a: String,
    pub identity_field_b: String,
    pub search_mode: SearchMode,
    /// Whether approximate identity strategies beyond exact match apply.
    pub partial_identity: bool,
    /// Regex used by the pattern strategy. An invalid pattern disables that
    /// strategy for the run; it is not a configuration error.
    pub identity_pattern: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            amount_field_a: String::new(),
            amount_field_b: String::new(),
            amount_tolerance: 2.0,
            identity_field_a: String::new(),
            identity_field_b: String::new(),
            search_mode: SearchMode::IdentityFirst,
            partial_identity: true,
            identity_pattern: r"_\d+$".into(),
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.amount_field_a.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "matching.amount_field_a",
            });
        }
        if self.amount_field_b.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "matching.amount_field_b",
            });
        }
        if self.identity_field_a.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "matching.identity_field_a",
            });
        }
        if self.identity_field_b.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "matching.identity_field_b",
            });
        }
        if !self.amount_tolerance.is_finite() || self.amount_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "matching.amount_tolerance",
                reason: format!("{} is not a non-negative number", self.amount_tolerance),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IngestConfig {
    pub file_a: String,
    pub file_b: String,
    /// Labels used in logs and the run summary.
    pub label_a: Option<String>,
    pub label_b: Option<String>,
}

impl IngestConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_a.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "ingest.file_a",
            });
        }
        if self.file_b.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "ingest.file_b",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    pub out_path: Option<String>,
    /// Stable per-record identifier columns; row index is used when unset.
    pub id_field_a: Option<String>,
    pub id_field_b: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ingest.validate()?;
        self.matching.validate()?;
        Ok(())
    }
}
