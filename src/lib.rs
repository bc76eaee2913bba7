//! Bar chart configuration builder.
//!
//! [`ChartConfigBuilder`] maps a handful of display parameters (labels,
//! datasets, orientation, stacking, axis titles, extra axes) to a Chart.js
//! bar chart configuration. Drawing is left to a [`ChartRenderer`]: a
//! Chart.js HTML page or a server-side ECharts render.

pub mod chart;
pub mod config;
pub mod error;
pub mod telemetry;

pub use chart::{ChartRenderer, EchartsRenderer, HtmlRenderer};
pub use config::{
    BarChart, BarChartOptions, ChartConfigBuilder, ChartData, DEFAULT_BAR_WIDTH, IndexAxis,
    NO_DATA_LABEL, Position, Scale, Series,
};
pub use error::{Error, Result};
