//! Render dispatcher: derive a displayable view model from one spec.
//!
//! Picks the right derivation per chart kind, composes it with the color
//! system and number formatter, and turns derivation failures into values
//! the caller shows as placeholder text. Nothing here mutates the
//! collection, so a failed derivation can never corrupt session state.

use serde_json::{Map, Value};

use crate::aggregate::{aggregate, SliceSet, DEFAULT_MAX_SLICES};
use crate::color::{normalize, palette, Rgb};
use crate::data::{cell_text, coerce_number, columns};
use crate::error::RenderError;
use crate::format::format_number;
use crate::resolve::{resolve, ResolvedEncoding};
use crate::spec::{VisualizationSpec, VizKind};
use crate::table::{project, TableProjection};

// Kind defaults applied when the style carries no usable color hint.
const PIE_DEFAULT: Rgb = Rgb(0x63, 0x66, 0xf1);
const BAR_DEFAULT: Rgb = Rgb(0x4f, 0x46, 0xe5);
const SCATTER_DEFAULT: Rgb = Rgb(0x3b, 0x82, 0xf6);

/// One pie slice, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSliceView {
    pub label: String,
    pub value: f64,
    /// Share of the displayed total, in percent.
    pub percent: f64,
    /// Short-formatted value for tooltips/legends.
    pub display: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieView {
    pub slices: Vec<PieSliceView>,
    pub overflowed: bool,
    pub total_shown: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub x_column: String,
    pub y_column: String,
    pub bars: Vec<BarPoint>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<(f64, f64)>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub projection: TableProjection,
    pub header_bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Pie(PieView),
    Bar(BarView),
    Scatter(ScatterView),
    Table(TableView),
}

/// Everything the UI needs to show one spec.
#[derive(Debug, Clone)]
pub struct VizView {
    pub title: Option<String>,
    /// Upstream-declared problems, shown alongside whatever still renders.
    pub warnings: Vec<String>,
    pub insights: Map<String, Value>,
    /// The derived chart, or the failure to show in its place.
    pub chart: Result<ChartView, RenderError>,
}

/// Derive the view model for a spec with the default slice cap.
pub fn derive_view(spec: &VisualizationSpec) -> VizView {
    derive_view_with(spec, DEFAULT_MAX_SLICES)
}

/// Derive the view model for a spec, capping pies at `max_slices`.
pub fn derive_view_with(spec: &VisualizationSpec, max_slices: usize) -> VizView {
    let chart = match spec.kind {
        VizKind::Pie => derive_pie(spec, max_slices).map(ChartView::Pie),
        VizKind::Bar => derive_bar(spec).map(ChartView::Bar),
        VizKind::Scatter => derive_scatter(spec).map(ChartView::Scatter),
        VizKind::Table => derive_table(spec).map(ChartView::Table),
    };

    VizView {
        title: spec.style.title.clone(),
        warnings: spec.errors.clone(),
        insights: spec.insights.clone(),
        chart,
    }
}

fn base_color(spec: &VisualizationSpec, fallback: Rgb) -> String {
    normalize(spec.style.color.as_deref()).unwrap_or_else(|| fallback.to_hex())
}

fn derive_pie(spec: &VisualizationSpec, max_slices: usize) -> Result<PieView, RenderError> {
    // Encoding first, then the empty check: an incomplete pie encoding is
    // the better message even with no rows.
    let (label_key, value_key) = match resolve(spec.kind, &spec.encoding, &columns(&spec.data))? {
        ResolvedEncoding::Pie { label, value } => (label, value),
        _ => unreachable!("pie resolution yields a pie encoding"),
    };
    if spec.data.is_empty() {
        return Err(RenderError::EmptyDataset);
    }

    let SliceSet {
        slices,
        overflowed,
        total_shown,
    } = aggregate(&spec.data, &label_key, &value_key, max_slices)?;

    let colors = palette(&base_color(spec, PIE_DEFAULT), slices.len(), PIE_DEFAULT);
    // Guard the denominator; an all-zero pie still gets 0% labels.
    let denominator = if total_shown != 0.0 { total_shown } else { 1.0 };

    let slices = slices
        .into_iter()
        .zip(colors)
        .map(|(slice, color)| PieSliceView {
            percent: 100.0 * slice.value / denominator,
            display: format_number(slice.value),
            label: slice.label,
            value: slice.value,
            color,
        })
        .collect();

    Ok(PieView {
        slices,
        overflowed,
        total_shown,
    })
}

fn derive_bar(spec: &VisualizationSpec) -> Result<BarView, RenderError> {
    // Inference reads the first record's columns, so the empty check comes
    // first here.
    if spec.data.is_empty() {
        return Err(RenderError::EmptyDataset);
    }
    let (x, y) = match resolve(spec.kind, &spec.encoding, &columns(&spec.data))? {
        ResolvedEncoding::Bar { x, y } => (x, y),
        _ => unreachable!("bar resolution yields a bar encoding"),
    };

    // Rows with a non-numeric y are skipped rather than fatal.
    let bars = spec
        .data
        .iter()
        .filter_map(|row| {
            let value = coerce_number(row.get(&y)?)?;
            Some(BarPoint {
                label: cell_text(row.get(&x)),
                value,
                display: format_number(value),
            })
        })
        .collect();

    Ok(BarView {
        color: base_color(spec, BAR_DEFAULT),
        x_column: x,
        y_column: y,
        bars,
    })
}

fn derive_scatter(spec: &VisualizationSpec) -> Result<ScatterView, RenderError> {
    let (x, y) = match resolve(spec.kind, &spec.encoding, &columns(&spec.data))? {
        ResolvedEncoding::Scatter { x, y } => (x, y),
        _ => unreachable!("scatter resolution yields a scatter encoding"),
    };
    if spec.data.is_empty() {
        return Err(RenderError::EmptyDataset);
    }

    let points: Vec<(f64, f64)> = spec
        .data
        .iter()
        .filter_map(|row| {
            let px = coerce_number(row.get(&x)?)?;
            let py = coerce_number(row.get(&y)?)?;
            Some((px, py))
        })
        .collect();

    if points.is_empty() {
        return Err(RenderError::non_numeric(&y));
    }

    Ok(ScatterView {
        color: base_color(spec, SCATTER_DEFAULT),
        x_column: x,
        y_column: y,
        points,
    })
}

fn derive_table(spec: &VisualizationSpec) -> Result<TableView, RenderError> {
    Ok(TableView {
        projection: project(&spec.data)?,
        header_bold: spec.style.header_bold.unwrap_or(false),
    })
}
