//! Renderers that draw a built bar chart

mod colors;
mod echarts;
mod html;

pub use echarts::{EchartsRenderer, to_echarts};
pub use html::{DEFAULT_CHARTJS_SRC, HtmlRenderer};

use crate::config::BarChart;
use crate::error::Result;

/// Default canvas dimensions in pixels
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 400;

/// Something that can draw a [`BarChart`].
///
/// Renderers own all rendering-time validation; the configuration is passed
/// as built, including mismatched label/data lengths.
pub trait ChartRenderer {
    type Output;

    fn render(&mut self, chart: &BarChart) -> Result<Self::Output>;
}
