//! Exact-duplicate detection across a validated batch
//!
//! This is the second stage of the pipeline. It needs the complete per-record
//! outcome of a batch and cannot be applied to a partial one.
//!
//! Records are grouped by their raw five-field tuple. Within each group the
//! earliest row is canonical and untouched; every later row gets one
//! `Duplicate Record of Row <canonical> at <row>` message and is forced invalid,
//! whatever its field checks said.
//!
//! Comparison is byte-exact and case-sensitive. `CME` and `cme` rows are
//! distinct here even though both pass the case-insensitive exchange rule.

use crate::app::models::{PriceRecord, ValidationResult};
use crate::constants::{DUPLICATE_KEY_SEPARATOR, DUPLICATE_MESSAGE_PREFIX};
use std::collections::HashMap;
use tracing::{debug, info};

/// Rows sharing one raw five-field tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Row number of the earliest member
    pub canonical_row: usize,
    /// Row numbers of the later members, ascending by batch position
    pub duplicate_rows: Vec<usize>,
    canonical_position: usize,
    duplicate_positions: Vec<usize>,
}

impl DuplicateGroup {
    /// Number of records in the group, canonical included
    pub fn size(&self) -> usize {
        self.duplicate_rows.len() + 1
    }
}

/// Composite grouping key: the five raw values joined with `|`
pub fn composite_key(record: &PriceRecord) -> String {
    let mut key = String::new();
    for (index, value) in record.fields().iter().enumerate() {
        if index > 0 {
            key.push(DUPLICATE_KEY_SEPARATOR);
        }
        key.push_str(value);
    }
    key
}

/// Check if two records fall into the same duplicate group
pub fn are_duplicates(first: &PriceRecord, second: &PriceRecord) -> bool {
    composite_key(first) == composite_key(second)
}

/// Find every group of two or more identical records
///
/// Groups are returned ordered by the position of their canonical member.
pub fn find_duplicate_groups(results: &[ValidationResult]) -> Vec<DuplicateGroup> {
    let mut positions_by_key: HashMap<String, Vec<usize>> = HashMap::new();

    // Positions are pushed in batch order, so each list is already ascending
    for (position, result) in results.iter().enumerate() {
        positions_by_key
            .entry(composite_key(&result.record))
            .or_default()
            .push(position);
    }

    let mut groups: Vec<DuplicateGroup> = positions_by_key
        .into_values()
        .filter(|positions| positions.len() > 1)
        .map(|positions| {
            let canonical_position = positions[0];
            let duplicate_positions = positions[1..].to_vec();
            DuplicateGroup {
                canonical_row: results[canonical_position].row_number,
                duplicate_rows: duplicate_positions
                    .iter()
                    .map(|&position| results[position].row_number)
                    .collect(),
                canonical_position,
                duplicate_positions,
            }
        })
        .collect();

    groups.sort_by_key(|group| group.canonical_position);
    groups
}

/// Demote every non-canonical duplicate in a batch
///
/// Consumes the per-record outcomes and returns the finalized batch in the same
/// order. Existing messages are kept; the duplicate message is appended last.
///
/// # Arguments
///
/// * `results` - Complete per-record outcomes of one batch
///
/// # Returns
///
/// The finalized batch
pub fn detect_duplicates(mut results: Vec<ValidationResult>) -> Vec<ValidationResult> {
    let groups = find_duplicate_groups(&results);
    let mut flagged = 0;

    for group in &groups {
        for &position in &group.duplicate_positions {
            let duplicate = &mut results[position];
            duplicate.errors.push(format!(
                "{} {} at {}",
                DUPLICATE_MESSAGE_PREFIX, group.canonical_row, duplicate.row_number
            ));
            duplicate.valid = false;
            flagged += 1;
        }

        debug!(
            "Duplicate group canonical row {}: rows {:?} demoted",
            group.canonical_row, group.duplicate_rows
        );
    }

    info!(
        "Duplicate detection complete: {} groups, {} records flagged",
        groups.len(),
        flagged
    );

    results
}
