//! Summarizer for finalized validation batches
//!
//! Produces the `{total, valid, invalid, errors}` summary returned with every
//! batch and the downloadable text report.
//!
//! ## Architecture
//!
//! - [`summary`] - Counts, flattened messages, valid percentage
//! - [`report`] - Report rendering and file output

pub mod report;
pub mod summary;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use report::{ValidationReport, quote_field};
pub use summary::{Summary, summarize};
