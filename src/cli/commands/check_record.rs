//! Check-record command implementation
//!
//! Validates one record given as flags, as a batch of one.

use super::shared::{load_configuration, print_invalid_results, print_json, setup_logging};
use crate::Result;
use crate::app::models::PriceRecord;
use crate::app::services::record_validator::ValidationPipeline;
use crate::app::services::summarizer::{Summary, summarize};
use crate::cli::args::{CheckRecordArgs, OutputFormat};
use colored::*;
use tracing::debug;

/// Build the record described by the flags
pub fn record_from_args(args: &CheckRecordArgs) -> PriceRecord {
    PriceRecord::new(
        args.instrument_guid.as_str(),
        args.trade_date.as_str(),
        args.price.as_str(),
        args.exchange.as_str(),
        args.product_type.as_str(),
    )
}

/// Check-record command runner
pub async fn run_check_record(args: CheckRecordArgs) -> Result<Summary> {
    setup_logging(args.get_log_level(), args.quiet)?;
    debug!("Check-record arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args.rules)?;
    let today = args.rules.reference_date()?;
    let pipeline = ValidationPipeline::new(&config)?;

    let result = pipeline.validate_single(record_from_args(&args), today);

    match args.output_format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Human if !args.quiet => {
            if result.valid {
                println!("{}", "Record is valid".bright_green().bold());
            } else {
                print_invalid_results([&result], result.errors.len().max(1));
            }
        }
        OutputFormat::Human => {}
    }

    Ok(summarize(std::slice::from_ref(&result)))
}
