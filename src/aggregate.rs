//! Categorical aggregation for pie charts.
//!
//! Any dataset should produce a readable pie: only the top N categories by
//! value become individual slices, the remainder is grouped into a single
//! "Other" slice.

use crate::data::{cell_text, coerce_number};
use crate::error::RenderError;
use crate::spec::Record;

/// Default slice cap, matching what fits in a legend.
pub const DEFAULT_MAX_SLICES: usize = 10;

/// Label shown for the overflow bucket.
pub const OVERFLOW_LABEL: &str = "Other";

/// One wedge of the pie.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// The bounded slice list derived from raw rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSet {
    /// At most `max_slices` category slices, plus possibly one "Other".
    pub slices: Vec<Slice>,
    /// True iff an "Other" bucket was created.
    pub overflowed: bool,
    /// Sum of all displayed slice values, including "Other". This is the
    /// percentage denominator, so tooltips always total 100%.
    pub total_shown: f64,
}

/// Aggregate rows into a bounded slice list.
///
/// Rows whose value cell is not coercible to a number are silently dropped;
/// only when no row survives is that an error. Ties keep original row order
/// so the output is deterministic.
pub fn aggregate(
    rows: &[Record],
    label_key: &str,
    value_key: &str,
    max_slices: usize,
) -> Result<SliceSet, RenderError> {
    let mut slices: Vec<Slice> = rows
        .iter()
        .filter_map(|row| {
            let value = coerce_number(row.get(value_key)?)?;
            Some(Slice {
                label: cell_text(row.get(label_key)),
                value,
            })
        })
        .collect();

    if slices.is_empty() {
        return Err(RenderError::non_numeric(value_key));
    }

    // Stable sort: descending by value, ties by original row order.
    slices.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));

    let mut overflowed = false;
    if slices.len() > max_slices {
        let overflow_sum: f64 = slices[max_slices..].iter().map(|s| s.value).sum();
        slices.truncate(max_slices);
        // A zero or negative remainder would show up as a misleading extra
        // slice; drop it instead.
        if overflow_sum > 0.0 {
            slices.push(Slice {
                label: OVERFLOW_LABEL.to_string(),
                value: overflow_sum,
            });
            overflowed = true;
        }
    }

    let total_shown = slices.iter().map(|s| s.value).sum();

    Ok(SliceSet {
        slices,
        overflowed,
        total_shown,
    })
}
