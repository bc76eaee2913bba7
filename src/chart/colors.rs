//! Color definitions for rendered charts

pub(super) const COLOR_TEXT: &str = "#333333"; // Dark gray
pub(super) const COLOR_GRID: &str = "#D0D0D0"; // Grid lines

/// Series colors, cycled when a chart has more datasets than entries
pub(super) const SERIES_COLORS: [&str; 8] = [
    "#1888F8", // Vivid blue
    "#F03888", // Vivid magenta
    "#10D878", // Vivid green
    "#7840F8", // Vivid purple
    "#F8A800", // Orange
    "#58B8F0", // Cyan-blue
    "#C82828", // Red
    "#B8E818", // Yellow
];

/// Color for the series at `index`
pub(super) fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}
