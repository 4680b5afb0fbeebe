//! Declarative visualization specs as produced by the planning service.
//!
//! A spec describes one chart or table: its kind, which data columns fill
//! which semantic roles, style hints, the transforms the service already
//! applied, and the resulting rows. The core consumes specs as-is; it never
//! executes transforms itself.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chart kinds the render dispatcher knows how to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VizKind {
    Pie,
    Bar,
    Scatter,
    Table,
}

impl fmt::Display for VizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VizKind::Pie => "pie",
            VizKind::Bar => "bar",
            VizKind::Scatter => "scatter",
            VizKind::Table => "table",
        };
        f.write_str(name)
    }
}

/// Mapping from semantic roles to concrete column names.
///
/// Which roles matter depends on the chart kind; any role may be absent and
/// the resolver fills defaults where the kind allows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Semantic color dimension, rarely used by the planner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Vec<String>>,
}

/// Style hints attached by the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw color hint; may be a natural-language name ("light blue"),
    /// a concrete CSS color, or absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bold: Option<bool>,
}

/// One record of a spec's result data: column name to scalar.
pub type Record = Map<String, Value>;

/// The declarative description of one chart/table plus its rendered data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSpec {
    /// Opaque unique identifier, assigned upstream, immutable once created.
    pub id: String,
    pub kind: VizKind,
    #[serde(default)]
    pub encoding: Encoding,
    #[serde(default)]
    pub style: Style,
    /// Already-applied transform descriptors, carried through unmodified.
    #[serde(default)]
    pub transforms: Vec<Value>,
    /// Result rows. All records are assumed to share the first record's
    /// column set; missing cells read as null.
    #[serde(default)]
    pub data: Vec<Record>,
    /// Advisory metrics (e.g. `pearson_correlation`).
    #[serde(default)]
    pub insights: Map<String, Value>,
    /// Upstream-reported problems; warnings only, never block rendering.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl VisualizationSpec {
    pub fn new(id: impl Into<String>, kind: VizKind) -> Self {
        VisualizationSpec {
            id: id.into(),
            kind,
            encoding: Encoding::default(),
            style: Style::default(),
            transforms: Vec::new(),
            data: Vec::new(),
            insights: Map::new(),
            errors: Vec::new(),
        }
    }

    /// Display label for lists: the title if styled, otherwise the id.
    pub fn display_label(&self) -> &str {
        self.style.title.as_deref().unwrap_or(&self.id)
    }
}
