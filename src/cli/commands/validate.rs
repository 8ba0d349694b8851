//! Validate command implementation
//!
//! Runs the full pipeline over one batch file, prints the outcome and
//! optionally writes the downloadable report.

use super::shared::{
    MAX_LISTED_ROWS, load_configuration, print_invalid_results, print_json, print_summary,
    setup_logging,
};
use crate::app::services::record_validator::{BatchOutcome, ValidationPipeline};
use crate::app::services::summarizer::{Summary, ValidationReport};
use crate::cli::args::{InputFormat, OutputFormat, ValidateArgs};
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> Result<Summary> {
    let start_time = Instant::now();

    // Set up logging
    setup_logging(args.get_log_level(), args.quiet)?;
    debug!("Validate arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    let config = load_configuration(&args.rules)?;
    let today = args.rules.reference_date()?;
    let pipeline = ValidationPipeline::new(&config)?;

    let input_format = args.resolved_input_format();
    info!(
        "Validating {} as {:?} (reference date {})",
        args.input.display(),
        input_format,
        today
    );

    let outcome = match input_format {
        InputFormat::Csv => {
            pipeline
                .validate_path(&args.input, today, args.show_progress())
                .await?
        }
        InputFormat::Json => {
            let content = tokio::fs::read_to_string(&args.input).await.map_err(|e| {
                Error::io(format!("Failed to read {}", args.input.display()), e)
            })?;
            pipeline.validate_json(&content, today, args.show_progress())?
        }
    };

    if let Some(report_path) = args.report_path() {
        ValidationReport::from_results(&outcome.results)
            .write_to(&report_path)
            .await?;
    }

    report_outcome(&args, &outcome)?;

    info!(
        "Validation completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(outcome.summary)
}

/// Print the outcome in the requested format
fn report_outcome(args: &ValidateArgs, outcome: &BatchOutcome) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(outcome),
        OutputFormat::Human => {
            if args.quiet {
                return Ok(());
            }
            print_summary(&outcome.summary);
            print_invalid_results(&outcome.results, MAX_LISTED_ROWS);
            if let Some(report_path) = args.report_path() {
                println!("\nReport written to {}", report_path.display());
            }
            println!();
            Ok(())
        }
    }
}
