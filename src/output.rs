use barchart::BarChart;
use colored::*;

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub(crate) fn print_saved(path: &str) {
    eprintln!("{} {}", "Chart saved to:".green(), path);
}

/// One-line description of what is about to be drawn
pub(crate) fn print_summary(chart: &BarChart) {
    let extra_axes = chart.options.additional_scales().count();
    eprintln!(
        "{} {} label(s), {} series, {} extra axis/axes",
        "Chart:".bold(),
        chart.data.labels.len(),
        chart.data.datasets.len(),
        extra_axes
    );
}
