//! Server-side rendering through ECharts (charming)

use std::path::Path;

use charming::{
    Chart, ImageRenderer,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisType, ItemStyle, LineStyle, SplitLine, TextStyle},
    renderer::ImageFormat,
    series::Bar,
};
use tracing::{debug, info};

use super::colors::{COLOR_GRID, COLOR_TEXT, series_color};
use super::{ChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::config::{BarChart, IndexAxis, Scale};
use crate::error::{Error, Result};

/// Renders a chart to SVG, PNG or JPEG with the ECharts SSR runtime
#[derive(Debug, Clone, Copy)]
pub struct EchartsRenderer {
    width: u32,
    height: u32,
}

impl Default for EchartsRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl EchartsRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether `path` has an extension `save` can write
    pub fn supports_path(path: impl AsRef<Path>) -> bool {
        matches!(
            extension(path.as_ref()).as_deref(),
            Some("svg" | "png" | "jpg" | "jpeg")
        )
    }

    /// Render and write to `path`; the format follows the file extension
    pub fn save(&mut self, chart: &BarChart, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = match extension(path).as_deref() {
            Some("svg") => None,
            Some("png") => Some(ImageFormat::Png),
            Some("jpg" | "jpeg") => Some(ImageFormat::Jpeg),
            _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
        };

        match format {
            None => std::fs::write(path, self.render(chart)?)?,
            Some(format) => {
                let mut renderer = ImageRenderer::new(self.width, self.height);
                renderer
                    .save_format(format, &to_echarts(chart), path)
                    .map_err(|e| Error::Render(e.to_string()))?;
            }
        }

        info!(path = %path.display(), "wrote chart image");
        Ok(())
    }
}

impl ChartRenderer for EchartsRenderer {
    /// SVG document
    type Output = String;

    fn render(&mut self, chart: &BarChart) -> Result<String> {
        let mut renderer = ImageRenderer::new(self.width, self.height);
        renderer
            .render(&to_echarts(chart))
            .map_err(|e| Error::Render(e.to_string()))
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Translate a built chart into an ECharts option tree.
///
/// The category axis carries the labels (y when horizontal); every extra
/// scale becomes another value axis without split lines.
pub fn to_echarts(chart: &BarChart) -> Chart {
    let options = &chart.options;
    let horizontal = options.index_axis == IndexAxis::Y;
    let stacked = options
        .scales
        .get("x")
        .and_then(|s| s.stacked)
        .unwrap_or(false);

    let legend_data: Vec<String> = chart
        .data
        .datasets
        .iter()
        .map(|s| s.label.clone())
        .collect();

    let mut echart = Chart::new()
        .legend(
            Legend::new()
                .data(legend_data)
                .top("8%")
                .text_style(TextStyle::new().color(COLOR_TEXT)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("3%")
                .bottom("3%")
                .top("18%")
                .contain_label(true),
        );

    if let Some(text) = options.plugins.title.visible_text() {
        echart = echart.title(
            Title::new()
                .text(text)
                .left("center")
                .top("1%")
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(18)),
        );
    }

    let category = titled(
        Axis::new()
            .type_(AxisType::Category)
            .data(chart.data.labels.clone())
            .axis_label(AxisLabel::new().color(COLOR_TEXT)),
        options.scales.get(if horizontal { "y" } else { "x" }),
    );
    let value = titled(
        Axis::new()
            .type_(AxisType::Value)
            .axis_label(AxisLabel::new().color(COLOR_TEXT))
            .split_line(SplitLine::new().line_style(LineStyle::new().width(0.5).color(COLOR_GRID))),
        options.scales.get(if horizontal { "x" } else { "y" }),
    );

    let (x_axis, y_axis) = if horizontal {
        (value, category)
    } else {
        (category, value)
    };
    echart = echart.x_axis(x_axis).y_axis(y_axis);

    for (key, scale) in options.additional_scales() {
        debug!(axis = %key, "adding extra value axis");
        let axis = titled(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().color(COLOR_TEXT))
                .split_line(SplitLine::new().show(false)),
            Some(scale),
        );
        echart = if horizontal {
            echart.x_axis(axis)
        } else {
            echart.y_axis(axis)
        };
    }

    for (index, series) in chart.data.datasets.iter().enumerate() {
        // NaN serializes as null, which ECharts draws as an empty slot
        let values: Vec<f64> = series
            .values()
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();

        let mut bar = Bar::new()
            .name(&series.label)
            .data(values)
            .bar_width(options.bar_thickness)
            .item_style(ItemStyle::new().color(series_color(index)));

        if stacked {
            bar = bar.stack("total");
        }

        echart = echart.series(bar);
    }

    echart
}

fn titled(axis: Axis, scale: Option<&Scale>) -> Axis {
    match scale.and_then(|s| s.title.visible_text()) {
        Some(text) => axis
            .name(text)
            .name_text_style(TextStyle::new().color(COLOR_TEXT)),
        None => axis,
    }
}
