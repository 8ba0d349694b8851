//! Command implementations for the pricing validator CLI
//!
//! Each command is implemented in its own module:
//! - `validate`: Batch file validation with optional report output
//! - `check_record`: Single-record validation from command-line flags

pub mod check_record;
pub mod shared;
pub mod validate;

use crate::app::services::summarizer::Summary;
use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler and returns the summary of the
/// validated batch.
pub async fn run(args: Args) -> Result<Summary> {
    match args.get_command() {
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        Some(Commands::CheckRecord(check_args)) => {
            check_record::run_check_record(check_args).await
        }
        None => Err(Error::configuration("No command given")),
    }
}
