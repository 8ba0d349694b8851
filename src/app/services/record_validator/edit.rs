//! Re-validation of an edited stored record
//!
//! An edit overwrites some fields of a record that was validated earlier and
//! runs the field checks again. Only [`FieldValidator`] takes part; whether the
//! edited record now collides with another stored record is answered by the
//! caller's store through [`DuplicateLookup`].

use crate::app::models::{PriceRecord, RecordPatch, ValidationResult};
use crate::{Error, Result};
use chrono::NaiveDate;
use tracing::debug;

use super::field_validator::FieldValidator;

/// Query-by-equality over previously stored records
pub trait DuplicateLookup {
    /// True when a stored record other than `exclude_row` has the same five raw fields
    fn has_equal_record(&self, record: &PriceRecord, exclude_row: usize) -> bool;
}

impl<F> DuplicateLookup for F
where
    F: Fn(&PriceRecord, usize) -> bool,
{
    fn has_equal_record(&self, record: &PriceRecord, exclude_row: usize) -> bool {
        self(record, exclude_row)
    }
}

/// Apply a patch to a stored record and re-run the field checks
///
/// # Arguments
///
/// * `validator` - Validator holding the active rule set
/// * `stored` - The record as it was stored
/// * `row_number` - Row number the stored record was validated under
/// * `patch` - Fields to overwrite
/// * `today` - Reference date for the future trade date check
pub fn revalidate_edit(
    validator: &FieldValidator,
    stored: &PriceRecord,
    row_number: usize,
    patch: &RecordPatch,
    today: NaiveDate,
) -> ValidationResult {
    let edited = stored.with_patch(patch);
    let result = validator.validate_record(edited, row_number, today);

    debug!(
        "Re-validated edit of row {}: valid={}, {} errors",
        row_number,
        result.valid,
        result.errors.len()
    );

    result
}

/// Re-validate an edit and refuse it when it would duplicate another stored record
///
/// The duplicate query runs for every edit, whatever its field errors; a hit
/// refuses the edit before any field messages are returned.
pub fn revalidate_edit_checked<L>(
    validator: &FieldValidator,
    stored: &PriceRecord,
    row_number: usize,
    patch: &RecordPatch,
    today: NaiveDate,
    lookup: &L,
) -> Result<ValidationResult>
where
    L: DuplicateLookup + ?Sized,
{
    let result = revalidate_edit(validator, stored, row_number, patch, today);

    if lookup.has_equal_record(&result.record, row_number) {
        return Err(Error::duplicate_edit(row_number));
    }

    Ok(result)
}
