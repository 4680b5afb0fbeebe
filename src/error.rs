use thiserror::Error;

use crate::spec::VizKind;

/// A derivation failure for a single spec.
///
/// These are values, not propagated exceptions: the render dispatcher
/// returns them inside the view model and the caller shows the message as a
/// placeholder where the chart would be. The collection is never touched by
/// a failed derivation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Required encoding role(s) missing for the given chart kind.
    #[error("{kind} encoding is incomplete: missing {missing}")]
    EncodingIncomplete { kind: VizKind, missing: String },

    /// The value column could not be coerced to a number for any row.
    #[error("column '{column}' has no numeric values")]
    NonNumericValueColumn { column: String },

    /// Zero rows after upstream transforms; nothing to derive.
    #[error("no rows to display")]
    EmptyDataset,
}

impl RenderError {
    pub fn incomplete(kind: VizKind, missing: impl Into<String>) -> Self {
        RenderError::EncodingIncomplete {
            kind,
            missing: missing.into(),
        }
    }

    pub fn non_numeric(column: impl Into<String>) -> Self {
        RenderError::NonNumericValueColumn {
            column: column.into(),
        }
    }
}
