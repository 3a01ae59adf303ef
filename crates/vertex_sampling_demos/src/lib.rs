#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{render_layers_to_png, PointLayer, PointStyle, Projection, RenderConfig};
