//! Record validator for price submission batches
//!
//! Validation runs in two strictly ordered stages over one batch:
//!
//! 1. **Per-record pass** - [`FieldValidator`] judges every record alone and
//!    collects every rule violation.
//! 2. **Duplicate pass** - [`detect_duplicates`] sees the complete stage one
//!    output and demotes every later copy of an identical record.
//!
//! [`ValidationPipeline`] runs both stages (parsing first when given text) and
//! summarizes the finalized batch.
//!
//! ## Architecture
//!
//! - [`field_rules`] - Narrow parsing helpers for single values
//! - [`field_validator`] - Per-record rule checks and message wording
//! - [`duplicate_detector`] - Exact-duplicate grouping and demotion
//! - [`pipeline`] - Stage orchestration and batch outcome
//! - [`edit`] - Re-validation of edited stored records

pub mod duplicate_detector;
pub mod edit;
pub mod field_rules;
pub mod field_validator;
pub mod pipeline;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use duplicate_detector::{
    DuplicateGroup, are_duplicates, composite_key, detect_duplicates, find_duplicate_groups,
};
pub use edit::{DuplicateLookup, revalidate_edit, revalidate_edit_checked};
pub use field_validator::FieldValidator;
pub use pipeline::{BatchOutcome, ValidationPipeline};
