//! Bar chart configuration: display parameters in, renderer configuration out


use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::chart::ChartRenderer;
use crate::error::Result;

/// Placeholder used for both labels and datasets when the caller supplies none
pub const NO_DATA_LABEL: &str = "No Data";

/// Bar thickness in pixels when none is given
pub const DEFAULT_BAR_WIDTH: f64 = 40.0;

/// One labeled sequence of values, plotted as one set of bars.
///
/// `data` entries are kept as given, so `null` gaps reach the renderer.
/// Keys other than `label` and `data` (colors, `yAxisID`, ...) are kept in
/// `extra` and handed to the renderer untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Series {
    pub fn new(label: impl Into<String>, data: impl IntoIterator<Item = f64>) -> Self {
        Self {
            label: label.into(),
            data: Some(data.into_iter().map(Value::from).collect()),
            extra: Map::new(),
        }
    }

    /// Series with a label only (no `data` key)
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Attach a renderer-specific dataset property
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Numeric values of this series; `None` marks a gap or a non-numeric entry
    pub fn values(&self) -> Vec<Option<f64>> {
        self.data
            .iter()
            .flatten()
            .map(Value::as_f64)
            .collect()
    }
}

/// Display parameters of a bar chart.
///
/// Every field is optional on input; missing or `null` fields take the
/// defaults documented on each field. Deserializes from the camelCase prop
/// names (`barWidth`, `fixedRatio`, `yUnits`, `aditionalAxes`, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfigBuilder {
    /// Categorical axis values. Empty means `["No Data"]`. Numbers and
    /// booleans are taken as their text, `null` as an empty label.
    #[serde(deserialize_with = "labels_as_text")]
    pub labels: Vec<String>,
    /// Datasets aligned with `labels`. Empty means one `"No Data"` series.
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<Series>,
    /// Chart title; hidden when absent or empty
    pub legend: Option<String>,
    /// Horizontal bars (category axis on y). Default false.
    #[serde(deserialize_with = "null_as_default")]
    pub horizontal: bool,
    /// Bar thickness in pixels. Default 40.
    #[serde(deserialize_with = "bar_width_or_default")]
    pub bar_width: f64,
    /// Keep the renderer's fixed aspect ratio instead of filling the container. Default false.
    #[serde(deserialize_with = "null_as_default")]
    pub fixed_ratio: bool,
    /// Stack bars; applied to both axes. Default false.
    #[serde(deserialize_with = "null_as_default")]
    pub stacked: bool,
    /// Title of the y axis; hidden when empty
    #[serde(deserialize_with = "null_as_default")]
    pub y_units: String,
    /// Title of the x axis; hidden when empty
    #[serde(deserialize_with = "null_as_default")]
    pub x_units: String,
    /// Titles of extra right-hand value axes, keyed `y2`, `y3`, ...
    #[serde(
        rename = "aditionalAxes",
        alias = "additionalAxes",
        deserialize_with = "null_as_default"
    )]
    pub additional_axes: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn labels_as_text<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(labels
        .unwrap_or_default()
        .into_iter()
        .map(|label| match label {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect())
}

fn bar_width_or_default<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_BAR_WIDTH))
}

impl Default for ChartConfigBuilder {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            data: Vec::new(),
            legend: None,
            horizontal: false,
            bar_width: DEFAULT_BAR_WIDTH,
            fixed_ratio: false,
            stacked: false,
            y_units: String::new(),
            x_units: String::new(),
            additional_axes: Vec::new(),
        }
    }
}

impl ChartConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON props document
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn series(mut self, data: impl IntoIterator<Item = Series>) -> Self {
        self.data = data.into_iter().collect();
        self
    }

    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    pub fn fixed_ratio(mut self, fixed_ratio: bool) -> Self {
        self.fixed_ratio = fixed_ratio;
        self
    }

    pub fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    pub fn y_units(mut self, units: impl Into<String>) -> Self {
        self.y_units = units.into();
        self
    }

    pub fn x_units(mut self, units: impl Into<String>) -> Self {
        self.x_units = units.into();
        self
    }

    pub fn additional_axes<I, S>(mut self, axes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_axes = axes.into_iter().map(Into::into).collect();
        self
    }

    pub fn additional_axis(mut self, title: impl Into<String>) -> Self {
        self.additional_axes.push(title.into());
        self
    }

    /// Build the renderer options and the normalized data
    pub fn build(&self) -> BarChart {
        BarChart {
            options: self.options(),
            data: self.chart_data(),
        }
    }

    pub fn options(&self) -> BarChartOptions {
        let mut scales = IndexMap::new();
        scales.insert(
            "y".to_string(),
            Scale {
                stacked: Some(self.stacked),
                position: Some(Position::Left),
                title: TitleOptions::from_text(Some(&self.y_units)),
                grid: None,
            },
        );
        scales.insert(
            "x".to_string(),
            Scale {
                stacked: Some(self.stacked),
                position: None,
                title: TitleOptions::from_text(Some(&self.x_units)),
                grid: None,
            },
        );

        for (index, title) in self.additional_axes.iter().enumerate() {
            let key = format!("y{}", index + 2);
            debug!(axis = %key, title = %title, "adding additional axis");
            // Later keys overwrite earlier ones in place; collisions are not checked
            scales.insert(key, Scale::additional(title));
        }

        BarChartOptions {
            index_axis: if self.horizontal {
                IndexAxis::Y
            } else {
                IndexAxis::X
            },
            responsive: true,
            bar_thickness: self.bar_width,
            maintain_aspect_ratio: self.fixed_ratio,
            plugins: Plugins {
                legend: LegendOptions {
                    position: Position::Top,
                },
                title: TitleOptions::from_text(self.legend.as_deref()),
            },
            scales,
        }
    }

    pub fn chart_data(&self) -> ChartData {
        let labels = if self.labels.is_empty() {
            debug!("no labels given, using placeholder");
            vec![NO_DATA_LABEL.to_string()]
        } else {
            self.labels.clone()
        };

        let datasets = if self.data.is_empty() {
            debug!("no datasets given, using placeholder");
            vec![Series::label_only(NO_DATA_LABEL)]
        } else {
            self.data.clone()
        };

        ChartData { labels, datasets }
    }
}

/// Which axis carries the categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Left,
    Bottom,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartOptions {
    pub index_axis: IndexAxis,
    pub responsive: bool,
    pub bar_thickness: f64,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    /// Axes in insertion order: `y`, `x`, then `y2`, `y3`, ...
    pub scales: IndexMap<String, Scale>,
}

impl BarChartOptions {
    /// Extra value axes (everything after `y` and `x`)
    pub fn additional_scales(&self) -> impl Iterator<Item = (&String, &Scale)> {
        self.scales
            .iter()
            .filter(|(key, _)| key.as_str() != "x" && key.as_str() != "y")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    pub legend: LegendOptions,
    pub title: TitleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub position: Position,
}

/// Title of the chart or of one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleOptions {
    pub display: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TitleOptions {
    /// Shown only for non-empty text; the text is kept either way
    fn from_text(text: Option<&str>) -> Self {
        Self {
            display: text.is_some_and(|t| !t.is_empty()),
            text: text.map(str::to_string),
        }
    }

    /// Text to draw, if the title is displayed
    pub fn visible_text(&self) -> Option<&str> {
        if self.display {
            self.text.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub title: TitleOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOptions>,
}

impl Scale {
    fn additional(title: &str) -> Self {
        Self {
            stacked: None,
            position: Some(Position::Right),
            title: TitleOptions {
                display: true,
                text: Some(title.to_string()),
            },
            // grid lines only for the primary value axis
            grid: Some(GridOptions {
                draw_on_chart_area: false,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub draw_on_chart_area: bool,
}

/// Labels and datasets handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Series>,
}

/// A fully built bar chart: renderer options plus normalized data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub options: BarChartOptions,
    pub data: ChartData,
}

/// The document a Chart.js `new Chart(ctx, config)` call expects
#[derive(Debug, Serialize)]
pub struct ChartJsConfig<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: &'a ChartData,
    pub options: &'a BarChartOptions,
}

impl BarChart {
    pub fn to_chartjs_config(&self) -> ChartJsConfig<'_> {
        ChartJsConfig {
            kind: "bar",
            data: &self.data,
            options: &self.options,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_chartjs_config())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_chartjs_config())?)
    }

    /// Hand this chart to a renderer
    pub fn render<R: ChartRenderer>(&self, renderer: &mut R) -> Result<R::Output> {
        renderer.render(self)
    }
}
