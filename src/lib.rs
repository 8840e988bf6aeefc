#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod error;
pub mod facet;
pub mod field;
pub mod graph;
pub mod layer;
pub mod picker;
pub mod sampling;
pub mod world;

pub use app::ViewerApp;
pub use error::{Error, Result};
pub use facet::{CornerValues, GraphFacet, Region, ScalarModel};
pub use graph::{Corner, CornerId, Graph, GraphId};
pub use layer::{LayerConfig, ScalarFacetLayer};
pub use picker::{pick_nearest, CirclePickerClosest};
pub use sampling::{JitteredGridSampling, NaivePointSampling, PointSampling};
