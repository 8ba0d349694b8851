//! Command-line argument definitions for the pricing validator
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::constants::REPORT_FILE_NAME;
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// CLI arguments for the pricing validator
///
/// Validates batches of exchange-traded price submissions against the
/// configured business rules and reports every violation per row.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pricing-validator",
    version,
    about = "Validate exchange-traded price submission batches",
    long_about = "Validates batches of price submissions (instrument, trade date, price, exchange, \
                  product type). Every record is checked against the configured business rules, \
                  exact duplicate rows are flagged, and a summary plus optional downloadable \
                  report is produced."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the pricing validator
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a batch file of price records
    Validate(ValidateArgs),
    /// Validate a single record given on the command line
    CheckRecord(CheckRecordArgs),
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Input file holding the batch
    ///
    /// Delimited text with a header row, or a JSON array of records.
    #[arg(value_name = "INPUT", help = "Input batch file (CSV or JSON)")]
    pub input: PathBuf,

    /// Format of the input file
    ///
    /// If not specified, `.json` files are read as JSON and everything else as CSV.
    #[arg(
        long = "input-format",
        value_enum,
        help = "Input format (defaults to the file extension)"
    )]
    pub input_format: Option<InputFormat>,

    /// Output format for the validation outcome
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Write the downloadable validation report to this file
    ///
    /// If FILE is an existing directory, the report is written inside it as
    /// pricing-validation-report.csv.
    #[arg(
        short = 'r',
        long = "report",
        value_name = "FILE",
        help = "Write the validation report to FILE"
    )]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides the progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the check-record command
#[derive(Debug, Clone, Parser)]
pub struct CheckRecordArgs {
    /// Instrument identifier
    #[arg(long = "instrument-guid", value_name = "ID", default_value = "")]
    pub instrument_guid: String,

    /// Trade date
    #[arg(long = "trade-date", value_name = "DATE", default_value = "")]
    pub trade_date: String,

    /// Price
    #[arg(long = "price", value_name = "PRICE", default_value = "", allow_hyphen_values = true)]
    pub price: String,

    /// Exchange code
    #[arg(long = "exchange", value_name = "CODE", default_value = "")]
    pub exchange: String,

    /// Product type code
    #[arg(long = "product-type", value_name = "CODE", default_value = "")]
    pub product_type: String,

    /// Output format for the validation outcome
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Rule and configuration overrides shared by every command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RuleArgs {
    /// Path to configuration file
    ///
    /// JSON configuration file with rule overrides. If not specified, looks
    /// for config.json in the user configuration directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Reference date for the future trade date check
    ///
    /// Defaults to the current local date.
    #[arg(
        long = "as-of",
        value_name = "YYYY-MM-DD",
        help = "Reference date for the future trade date check"
    )]
    pub as_of: Option<String>,

    /// Replace the exchange allow-list (comma-separated)
    #[arg(long = "exchanges", value_name = "LIST", help = "Comma-separated exchange allow-list")]
    pub exchanges: Option<AllowList>,

    /// Replace the product type allow-list (comma-separated)
    #[arg(
        long = "product-types",
        value_name = "LIST",
        help = "Comma-separated product type allow-list"
    )]
    pub product_types: Option<AllowList>,
}

/// Input format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Delimited text with a header row
    Csv,
    /// JSON array of record objects
    Json,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated allow-lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    pub entries: Vec<String>,
}

impl FromStr for AllowList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let entries: Vec<String> = s
            .split(',')
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect();

        if entries.is_empty() {
            return Err(Error::configuration("Allow-list cannot be empty"));
        }

        Ok(AllowList { entries })
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

impl RuleArgs {
    /// Resolve the reference date, defaulting to today's local date
    pub fn reference_date(&self) -> Result<NaiveDate> {
        match &self.as_of {
            Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| Error::configuration(format!("Invalid --as-of date: {}", value))),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }

    /// Validate the shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        self.reference_date()?;
        Ok(())
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }
        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.input.display()
            )));
        }

        // Validate report directory exists if specified
        if let Some(report) = &self.report {
            if let Some(parent) = report.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Report directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        self.rules.validate()
    }

    /// Resolved report file path, if a report was requested
    pub fn report_path(&self) -> Option<PathBuf> {
        self.report.as_ref().map(|path| {
            if path.is_dir() {
                path.join(REPORT_FILE_NAME)
            } else {
                path.clone()
            }
        })
    }

    /// Input format to use, inferred from the extension when not given
    pub fn resolved_input_format(&self) -> InputFormat {
        self.input_format
            .unwrap_or_else(|| infer_input_format(&self.input))
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode or JSON output)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl CheckRecordArgs {
    /// Validate the check-record command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

/// Infer the input format from a file extension
pub fn infer_input_format(path: &Path) -> InputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
        _ => InputFormat::Csv,
    }
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    fn validate_args(args: &[&str]) -> ValidateArgs {
        match parse(args).get_command() {
            Some(Commands::Validate(validate_args)) => validate_args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        assert!(parse(&["pricing-validator"]).get_command().is_none());
    }

    #[test]
    fn test_validate_defaults() {
        let args = validate_args(&["pricing-validator", "validate", "prices.csv"]);

        assert_eq!(args.input, PathBuf::from("prices.csv"));
        assert_eq!(args.output_format, OutputFormat::Human);
        assert_eq!(args.resolved_input_format(), InputFormat::Csv);
        assert!(args.report.is_none());
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.show_progress());
    }

    #[test]
    fn test_validate_full_flags() {
        let args = validate_args(&[
            "pricing-validator",
            "validate",
            "batch.txt",
            "--input-format",
            "json",
            "--output-format",
            "json",
            "--report",
            "out.csv",
            "--as-of",
            "2025-06-01",
            "--exchanges",
            "CME, LME",
            "-vv",
        ]);

        assert_eq!(args.resolved_input_format(), InputFormat::Json);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.report, Some(PathBuf::from("out.csv")));
        assert_eq!(
            args.rules.reference_date().unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert_eq!(
            args.rules.exchanges.as_ref().unwrap().entries,
            vec!["CME".to_string(), "LME".to_string()]
        );
        assert_eq!(args.get_log_level(), "debug");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(
            Args::try_parse_from(["pricing-validator", "validate", "a.csv", "-q", "-v"]).is_err()
        );

        let args = validate_args(&["pricing-validator", "validate", "a.csv", "-q"]);
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_infer_input_format() {
        assert_eq!(infer_input_format(Path::new("batch.JSON")), InputFormat::Json);
        assert_eq!(infer_input_format(Path::new("batch.csv")), InputFormat::Csv);
        assert_eq!(infer_input_format(Path::new("batch")), InputFormat::Csv);
    }

    #[test]
    fn test_allow_list_parsing() {
        let list = AllowList::from_str(" FUT , OPT ,").unwrap();
        assert_eq!(list.entries, vec!["FUT", "OPT"]);

        assert!(AllowList::from_str(" , ").is_err());
    }

    #[test]
    fn test_invalid_as_of_date() {
        let rules = RuleArgs {
            as_of: Some("2025-13-01".to_string()),
            ..RuleArgs::default()
        };

        assert!(rules.reference_date().is_err());
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_args_checks_input_exists() {
        let args = validate_args(&["pricing-validator", "validate", "/nonexistent/prices.csv"]);
        assert!(args.validate().is_err());

        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let args = validate_args(&["pricing-validator", "validate", path]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_report_path_into_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let dir_arg = dir.path().to_str().unwrap();

        let args = validate_args(&["pricing-validator", "validate", "a.csv", "--report", dir_arg]);
        assert_eq!(args.report_path(), Some(dir.path().join(REPORT_FILE_NAME)));

        let args = validate_args(&["pricing-validator", "validate", "a.csv", "-r", "out.csv"]);
        assert_eq!(args.report_path(), Some(PathBuf::from("out.csv")));

        let args = validate_args(&["pricing-validator", "validate", "a.csv"]);
        assert!(args.report_path().is_none());
    }

    #[test]
    fn test_check_record_args() {
        let args = parse(&[
            "pricing-validator",
            "check-record",
            "--instrument-guid",
            "1001",
            "--price",
            "-5.00",
            "--exchange",
            "CME",
        ]);

        match args.get_command() {
            Some(Commands::CheckRecord(check)) => {
                assert_eq!(check.instrument_guid, "1001");
                assert_eq!(check.price, "-5.00");
                assert_eq!(check.trade_date, "");
                assert_eq!(check.product_type, "");
                assert!(check.validate().is_ok());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
