//! Command-line parsing: maps args and environment variables onto
//! [`crate::config::AppConfig`] and validates eagerly.

mod clap_parser;

pub use clap_parser::{parse_cli_to_app_config, Cli, SearchModeOpt};
