//! Shared components for CLI commands
//!
//! This module contains logging setup, layered configuration loading and the
//! human-readable rendering used by every command.

use crate::app::models::ValidationResult;
use crate::app::services::summarizer::Summary;
use crate::cli::args::RuleArgs;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use tracing::{debug, info};

/// Maximum number of invalid rows listed in human output
pub const MAX_LISTED_ROWS: usize = 20;

/// Set up structured logging
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pricing_validator={}", log_level)));

    let result = if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &RuleArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file given, using default location and environment variables"),
    }

    let mut config = Config::load_layered(args.config_file.as_deref())?;

    // Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &RuleArgs) {
    if let Some(exchanges) = &args.exchanges {
        config.rules.exchanges = exchanges.entries.clone();
    }
    if let Some(product_types) = &args.product_types {
        config.rules.product_types = product_types.entries.clone();
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::configuration(format!("Failed to serialize output: {}", e)))?;

    println!("{}", json);
    Ok(())
}

/// Print the batch summary in human-readable form
pub fn print_summary(summary: &Summary) {
    println!("\n{}", "Validation Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Total records:".bright_cyan(),
        summary.total.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Valid records:".bright_cyan(),
        summary.valid.to_string().bright_green()
    );
    if summary.invalid > 0 {
        println!(
            "  {} {}",
            "Invalid records:".bright_red(),
            summary.invalid.to_string().bright_red().bold()
        );
    } else {
        println!(
            "  {} {}",
            "Invalid records:".bright_cyan(),
            summary.invalid.to_string().bright_white()
        );
    }
    println!(
        "  {} {}%",
        "Valid percentage:".bright_cyan(),
        summary.valid_percentage_text().bright_white()
    );
}

/// Print invalid results with their messages, up to `limit` rows
pub fn print_invalid_results<'a, I>(results: I, limit: usize)
where
    I: IntoIterator<Item = &'a ValidationResult>,
{
    let invalid: Vec<&ValidationResult> = results.into_iter().filter(|r| !r.valid).collect();
    if invalid.is_empty() {
        println!("\n{}", "All records passed validation".bright_green());
        return;
    }

    println!("\n{}", "Invalid Records".bright_red().bold());
    for result in invalid.iter().take(limit) {
        println!(
            "  {} {}",
            "Row".bright_cyan(),
            result.row_number.to_string().bright_white().bold()
        );
        for message in &result.errors {
            println!("    - {}", message);
        }
    }
    if invalid.len() > limit {
        println!("  ... and {} more invalid rows", invalid.len() - limit);
    }
}
