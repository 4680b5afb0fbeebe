//! Encoding resolution: map a spec's partial role assignments onto its
//! actual data schema, per chart kind.
//!
//! Bar charts tolerate partial encodings because axis choice is usually
//! unambiguous from the data shape. Pie and scatter require explicit roles:
//! silently guessing which column is categorical would be misleading.

use crate::error::RenderError;
use crate::spec::{Encoding, VizKind};

/// A fully-resolved encoding: every role the chart kind needs, bound to a
/// concrete column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEncoding {
    Pie { label: String, value: String },
    Bar { x: String, y: String },
    Scatter { x: String, y: String },
    Table { columns: Vec<String> },
}

/// Resolve `encoding` for `kind` against the first record's column list.
pub fn resolve(
    kind: VizKind,
    encoding: &Encoding,
    columns: &[String],
) -> Result<ResolvedEncoding, RenderError> {
    match kind {
        VizKind::Scatter => {
            // Strict: no inference for positional roles.
            match (&encoding.x, &encoding.y) {
                (Some(x), Some(y)) => Ok(ResolvedEncoding::Scatter {
                    x: x.clone(),
                    y: y.clone(),
                }),
                (None, Some(_)) => Err(RenderError::incomplete(kind, "x")),
                (Some(_), None) => Err(RenderError::incomplete(kind, "y")),
                (None, None) => Err(RenderError::incomplete(kind, "x, y")),
            }
        }
        VizKind::Pie => match (&encoding.label, &encoding.value) {
            (Some(label), Some(value)) => Ok(ResolvedEncoding::Pie {
                label: label.clone(),
                value: value.clone(),
            }),
            (None, Some(_)) => Err(RenderError::incomplete(kind, "label")),
            (Some(_), None) => Err(RenderError::incomplete(kind, "value")),
            (None, None) => Err(RenderError::incomplete(kind, "label, value")),
        },
        VizKind::Bar => {
            // Prioritized defaults: x ?? label ?? first column,
            // y ?? value ?? second column.
            let x = encoding
                .x
                .clone()
                .or_else(|| encoding.label.clone())
                .or_else(|| columns.first().cloned());
            let y = encoding
                .y
                .clone()
                .or_else(|| encoding.value.clone())
                .or_else(|| columns.get(1).cloned());
            match (x, y) {
                (Some(x), Some(y)) => Ok(ResolvedEncoding::Bar { x, y }),
                (None, Some(_)) => Err(RenderError::incomplete(kind, "x")),
                (Some(_), None) => Err(RenderError::incomplete(kind, "y")),
                (None, None) => Err(RenderError::incomplete(kind, "x, y")),
            }
        }
        // Tables need no encoding; they take the full column set.
        VizKind::Table => Ok(ResolvedEncoding::Table {
            columns: columns.to_vec(),
        }),
    }
}
