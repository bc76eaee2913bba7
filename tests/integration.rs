//! Integration tests for the barchart CLI

mod common;

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::json;
use tempfile::TempDir;

/// Get the path to the barchart binary
fn barchart_bin() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("barchart");
    path
}

/// Run barchart with the given arguments
fn run_barchart(args: &[&str]) -> std::process::Output {
    Command::new(barchart_bin())
        .args(args)
        .output()
        .expect("failed to execute barchart")
}

/// Run barchart with `input` piped to stdin
fn run_barchart_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(barchart_bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn barchart");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

// =============================================================================
// Basic functionality tests
// =============================================================================

#[test]
fn test_help_flag() {
    let output = run_barchart(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bar chart configuration builder"));
    assert!(stdout.contains("--horizontal"));
    assert!(stdout.contains("--stacked"));
    assert!(stdout.contains("--axis"));
    assert!(stdout.contains("--html"));
    assert!(stdout.contains("--image"));
}

#[test]
fn test_version_flag() {
    let output = run_barchart(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("barchart"));
}

#[test]
fn test_no_props_prints_placeholder_chart() {
    let output = run_barchart(&["-q"]);
    assert!(output.status.success());

    let config = common::parse_config(&output.stdout);
    assert_eq!(config["type"], "bar");
    assert_eq!(config["data"]["labels"], json!(["No Data"]));
    assert_eq!(config["data"]["datasets"], json!([{ "label": "No Data" }]));
    assert_eq!(config["options"]["indexAxis"], "x");
    assert_eq!(config["options"]["barThickness"], json!(40.0));
    assert_eq!(config["options"]["maintainAspectRatio"], false);
    assert_eq!(config["options"]["responsive"], true);
}

#[test]
fn test_props_file() {
    let temp_dir = TempDir::new().unwrap();
    let props = common::write_props(temp_dir.path(), "sales", common::SALES_PROPS);

    let output = run_barchart(&["-q", props.to_str().unwrap()]);
    assert!(output.status.success());

    let config = common::parse_config(&output.stdout);
    assert_eq!(config["data"]["labels"], json!(["Jan", "Feb", "Mar"]));
    assert_eq!(config["data"]["datasets"][0]["label"], "Sales");
    assert_eq!(config["data"]["datasets"][1]["label"], "Returns");
    assert_eq!(config["options"]["plugins"]["title"]["display"], true);
    assert_eq!(config["options"]["plugins"]["title"]["text"], "Revenue");
    assert_eq!(config["options"]["scales"]["y"]["title"]["text"], "USD");
    assert_eq!(config["options"]["scales"]["x"]["title"]["display"], false);
}

#[test]
fn test_props_from_stdin() {
    let output = run_barchart_stdin(&["-q", "-"], common::SALES_PROPS);
    assert!(output.status.success());

    let config = common::parse_config(&output.stdout);
    assert_eq!(config["data"]["labels"][2], "Mar");
}

#[test]
fn test_flags_build_chart() {
    let output = run_barchart(&[
        "-q",
        "-l",
        "Jan,Feb",
        "-s",
        "Sales=10,20",
        "--legend",
        "Revenue",
    ]);
    assert!(output.status.success());

    let config = common::parse_config(&output.stdout);
    assert_eq!(config["data"]["labels"], json!(["Jan", "Feb"]));
    assert_eq!(
        config["data"]["datasets"],
        json!([{ "label": "Sales", "data": [10.0, 20.0] }])
    );
    assert_eq!(config["options"]["plugins"]["title"]["text"], "Revenue");
}

#[test]
fn test_flags_override_props() {
    let temp_dir = TempDir::new().unwrap();
    let props = common::write_props(temp_dir.path(), "sales", common::SALES_PROPS);

    let output = run_barchart(&[
        "-q",
        props.to_str().unwrap(),
        "--horizontal",
        "--stacked",
        "--fixed-ratio",
        "--bar-width",
        "12",
        "--x-units",
        "Month",
        "-a",
        "Temp",
        "-a",
        "Pressure",
    ]);
    assert!(output.status.success());

    let config = common::parse_config(&output.stdout);
    let options = &config["options"];
    assert_eq!(options["indexAxis"], "y");
    assert_eq!(options["barThickness"], json!(12.0));
    assert_eq!(options["maintainAspectRatio"], true);
    assert_eq!(options["scales"]["x"]["stacked"], true);
    assert_eq!(options["scales"]["y"]["stacked"], true);
    assert_eq!(options["scales"]["x"]["title"]["text"], "Month");
    // untouched props survive
    assert_eq!(options["scales"]["y"]["title"]["text"], "USD");
    assert_eq!(options["scales"]["y2"]["title"]["text"], "Temp");
    assert_eq!(options["scales"]["y3"]["title"]["text"], "Pressure");
    assert_eq!(options["scales"]["y3"]["position"], "right");
    assert_eq!(options["scales"]["y3"]["grid"]["drawOnChartArea"], false);
}

#[test]
fn test_series_without_values() {
    let output = run_barchart(&["-q", "-s", "Pending"]);
    assert!(output.status.success());

    let config = common::parse_config(&output.stdout);
    assert_eq!(config["data"]["datasets"], json!([{ "label": "Pending" }]));
}

#[test]
fn test_compact_output() {
    let output = run_barchart(&["-q", "--compact"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end().lines().count(), 1);
}

#[test]
fn test_summary_on_stderr() {
    let output = run_barchart(&["-l", "A,B", "-s", "X=1,2"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 label(s), 1 series"));
}

// =============================================================================
// File outputs
// =============================================================================

#[test]
fn test_html_output() {
    let temp_dir = TempDir::new().unwrap();
    let props = common::write_props(temp_dir.path(), "sales", common::SALES_PROPS);
    let html_path = temp_dir.path().join("chart.html");

    let output = run_barchart(&[
        props.to_str().unwrap(),
        "--html",
        html_path.to_str().unwrap(),
        "--width",
        "1024",
        "--height",
        "512",
    ]);
    assert!(output.status.success());

    // stdout stays empty without --print
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Chart saved to:"));

    let page = std::fs::read_to_string(&html_path).unwrap();
    assert!(page.contains("<title>Revenue</title>"));
    assert!(page.contains("new Chart("));
    assert!(page.contains(r#""labels":["Jan","Feb","Mar"]"#));
    assert!(page.contains("width: 1024px; height: 512px;"));
}

#[test]
fn test_html_output_with_print() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("chart.html");

    let output = run_barchart(&["-q", "--html", html_path.to_str().unwrap(), "--print"]);
    assert!(output.status.success());
    assert!(html_path.exists());

    let config = common::parse_config(&output.stdout);
    assert_eq!(config["type"], "bar");
}

#[test]
fn test_svg_image_output() {
    let temp_dir = TempDir::new().unwrap();
    let props = common::write_props(temp_dir.path(), "sales", common::SALES_PROPS);
    let image_path = temp_dir.path().join("chart.svg");

    let output = run_barchart(&[
        "-q",
        props.to_str().unwrap(),
        "--image",
        image_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let svg = std::fs::read_to_string(&image_path).unwrap();
    assert!(svg.contains("<svg"));
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_nonexistent_props_error() {
    let output = run_barchart(&["/nonexistent/path/props.json"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
    assert!(stderr.contains("Failed to read"));
}

#[test]
fn test_malformed_props_error() {
    let temp_dir = TempDir::new().unwrap();
    let props = common::write_props(temp_dir.path(), "bad", r#"{"labels": "#);

    let output = run_barchart(&[props.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid chart json"));
}

#[test]
fn test_invalid_series_value_error() {
    let output = run_barchart(&["-s", "Sales=10,abc"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value 'abc'"));
}

#[test]
fn test_non_finite_bar_width_error() {
    for width in ["nan", "inf"] {
        let output = run_barchart(&["-q", "--bar-width", width]);
        assert!(!output.status.success(), "--bar-width {} should fail", width);
        assert!(output.stdout.is_empty());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("finite number"));
    }
}

#[test]
fn test_non_numeric_bar_width_error() {
    let output = run_barchart(&["-q", "--bar-width", "wide"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'wide' is not a number"));
}

#[test]
fn test_negative_bar_width_passes_through() {
    let output = run_barchart(&["-q", "--bar-width", "-5"]);
    assert!(output.status.success());

    let config = common::parse_config(&output.stdout);
    assert_eq!(config["options"]["barThickness"], json!(-5.0));
}

#[test]
fn test_props_with_gaps_and_numeric_labels() {
    let temp_dir = TempDir::new().unwrap();
    let props = common::write_props(
        temp_dir.path(),
        "years",
        r#"{"labels": [2023, 2024], "data": [{"label": null, "data": [5, null]}]}"#,
    );

    let output = run_barchart(&["-q", props.to_str().unwrap()]);
    assert!(output.status.success());

    let config = common::parse_config(&output.stdout);
    assert_eq!(config["data"]["labels"], json!(["2023", "2024"]));
    assert_eq!(
        config["data"]["datasets"],
        json!([{ "label": "", "data": [5, null] }])
    );
}

#[test]
fn test_unsupported_image_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let image_path = temp_dir.path().join("chart.gif");

    let output = run_barchart(&["--image", image_path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(!image_path.exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported image format"));
}

#[test]
fn test_output_invalid_directory_error() {
    let output = run_barchart(&["-q", "--html", "/nonexistent/dir/chart.html"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Directory does not exist"));
}

// =============================================================================
// Output format tests
// =============================================================================

#[test]
fn test_no_color_option() {
    let output = run_barchart(&["--no-color", "/nonexistent/props.json"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("\x1b["),
        "Should not contain ANSI escape codes"
    );
}

#[test]
fn test_quiet_mode_reduces_output() {
    let verbose_output = run_barchart(&[]);
    let quiet_output = run_barchart(&["-q"]);

    assert!(!verbose_output.stderr.is_empty());
    assert!(quiet_output.stderr.is_empty());
    assert_eq!(verbose_output.stdout, quiet_output.stdout);
}
