//! Standalone HTML page drawing the chart with Chart.js

use std::path::Path;

use tracing::info;

use super::{ChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::config::BarChart;
use crate::error::Result;

/// Chart.js v4 from jsDelivr
pub const DEFAULT_CHARTJS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js@4";

const DEFAULT_PAGE_TITLE: &str = "Bar Chart";
const CANVAS_ID: &str = "bar-chart";

/// Renders a chart to an HTML document that loads Chart.js and calls
/// `new Chart(canvas, config)` with the built configuration.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    width: u32,
    height: u32,
    script_src: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            script_src: DEFAULT_CHARTJS_SRC.to_string(),
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container size in pixels. With `maintainAspectRatio: false` the chart
    /// fills this box.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// URL (or relative path) of the Chart.js script
    pub fn with_script_src(mut self, src: impl Into<String>) -> Self {
        self.script_src = src.into();
        self
    }

    /// Render and write the page to `path`
    pub fn save(&mut self, chart: &BarChart, path: impl AsRef<Path>) -> Result<()> {
        let page = self.render(chart)?;
        std::fs::write(path.as_ref(), page)?;
        info!(path = %path.as_ref().display(), "wrote html chart");
        Ok(())
    }
}

impl ChartRenderer for HtmlRenderer {
    type Output = String;

    fn render(&mut self, chart: &BarChart) -> Result<String> {
        let config = escape_script(&chart.to_json()?);
        let title = escape_html(
            chart
                .options
                .plugins
                .title
                .visible_text()
                .unwrap_or(DEFAULT_PAGE_TITLE),
        );

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{src}"></script>
</head>
<body>
<div style="position: relative; width: {width}px; height: {height}px;">
<canvas id="{id}"></canvas>
</div>
<script>
new Chart(document.getElementById("{id}"), {config});
</script>
</body>
</html>
"#,
            src = escape_html(&self.script_src),
            width = self.width,
            height = self.height,
            id = CANVAS_ID,
        ))
    }
}

/// Keep embedded JSON from closing or re-opening script elements.
/// `<`, `>` and `&` only occur inside JSON strings, where `\uXXXX` is valid.
fn escape_script(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
