// Library exports for promptviz

pub mod aggregate;
pub mod client;
pub mod color;
pub mod data;
pub mod error;
pub mod format;
pub mod render;
pub mod resolve;
pub mod session;
pub mod spec;
pub mod store;
pub mod table;

pub use error::RenderError;
pub use render::{derive_view, derive_view_with, ChartView, VizView};
pub use spec::{Encoding, Style, VisualizationSpec, VizKind};
pub use store::{StoreSnapshot, VizAction, VizStore};
