mod output;

use std::io::Read;
use std::path::Path;

use clap::Parser;
use tracing::debug;

use barchart::{ChartConfigBuilder, EchartsRenderer, HtmlRenderer, Series, telemetry};
use output::{print_error, print_saved, print_summary, print_warning};

#[derive(Parser)]
#[command(
    name = "barchart",
    version,
    about = "Bar chart configuration builder with Chart.js and ECharts output",
    after_help = "Examples:
  barchart props.json                                  Print Chart.js config
  barchart -l Jan,Feb -s Sales=10,20 --legend Revenue  Build from flags
  barchart props.json --horizontal --stacked           Override props
  barchart props.json -a Temp -a Pressure              Extra right-hand axes
  barchart props.json --html chart.html                Chart.js page
  barchart props.json --image chart.svg                Render SVG/PNG/JPEG
  cat props.json | barchart -                          Read props from stdin"
)]
struct Args {
    /// JSON props file ("-" for stdin)
    props: Option<String>,

    /// Category labels (comma separated)
    #[arg(short, long, value_delimiter = ',', value_name = "LABEL")]
    labels: Option<Vec<String>>,

    /// Dataset as NAME=V1,V2,... (repeatable; NAME alone for no values)
    #[arg(short, long, value_name = "SERIES", value_parser = parse_series)]
    series: Vec<Series>,

    /// Chart title
    #[arg(long, value_name = "TEXT")]
    legend: Option<String>,

    /// Horizontal bars
    #[arg(long)]
    horizontal: bool,

    /// Bar thickness in pixels
    #[arg(long, value_name = "PX", allow_negative_numbers = true, value_parser = parse_bar_width)]
    bar_width: Option<f64>,

    /// Keep a fixed aspect ratio instead of filling the container
    #[arg(long)]
    fixed_ratio: bool,

    /// Stack bars
    #[arg(long)]
    stacked: bool,

    /// Title of the x axis
    #[arg(long, value_name = "TEXT")]
    x_units: Option<String>,

    /// Title of the y axis
    #[arg(long, value_name = "TEXT")]
    y_units: Option<String>,

    /// Extra right-hand value axis title (repeatable)
    #[arg(short = 'a', long = "axis", value_name = "TITLE")]
    axes: Vec<String>,

    /// Write a Chart.js HTML page
    #[arg(long, value_name = "PATH")]
    html: Option<String>,

    /// Render an image (.svg, .png, .jpg)
    #[arg(long, value_name = "PATH")]
    image: Option<String>,

    /// Output width in pixels (HTML and image)
    #[arg(long, default_value_t = barchart::chart::DEFAULT_WIDTH, value_name = "PX")]
    width: u32,

    /// Output height in pixels (HTML and image)
    #[arg(long, default_value_t = barchart::chart::DEFAULT_HEIGHT, value_name = "PX")]
    height: u32,

    /// Print the config even when writing files
    #[arg(long)]
    print: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Suppress status messages
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_series(input: &str) -> Result<Series, String> {
    let Some((label, values)) = input.split_once('=') else {
        return Ok(Series::label_only(input));
    };

    let data = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| format!("invalid value '{}' in series '{}'", v, label))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Series::new(label, data))
}

fn parse_bar_width(input: &str) -> Result<f64, String> {
    let width: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", input))?;
    if !width.is_finite() {
        return Err(format!("bar width must be a finite number, got '{}'", input));
    }
    Ok(width)
}

fn read_props(source: &str) -> Result<String, String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).map_err(|e| format!("Failed to read {}: {}", source, e))
    }
}

/// Apply command-line overrides on top of the props document
fn apply_overrides(mut builder: ChartConfigBuilder, args: &Args) -> ChartConfigBuilder {
    if let Some(ref labels) = args.labels {
        builder = builder.labels(labels.iter().cloned());
    }
    if !args.series.is_empty() {
        builder = builder.series(args.series.iter().cloned());
    }
    if let Some(ref legend) = args.legend {
        builder = builder.legend(legend.as_str());
    }
    if args.horizontal {
        builder = builder.horizontal(true);
    }
    if let Some(width) = args.bar_width {
        builder = builder.bar_width(width);
    }
    if args.fixed_ratio {
        builder = builder.fixed_ratio(true);
    }
    if args.stacked {
        builder = builder.stacked(true);
    }
    if let Some(ref units) = args.x_units {
        builder = builder.x_units(units.as_str());
    }
    if let Some(ref units) = args.y_units {
        builder = builder.y_units(units.as_str());
    }
    if !args.axes.is_empty() {
        builder = builder.additional_axes(args.axes.iter().cloned());
    }
    builder
}

/// Check that the directory an output goes into exists
fn check_output_dir(path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(format!("Directory does not exist: {}", parent.display()));
    }
    Ok(())
}

fn fail(msg: &str) -> ! {
    print_error(msg);
    std::process::exit(1);
}

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    telemetry::init_default_tracing(if args.verbose { "debug" } else { "warn" });

    // Validate outputs before doing any work
    if let Some(ref path) = args.image
        && !EchartsRenderer::supports_path(path)
    {
        fail(&format!(
            "Unsupported image format: {} (use .svg, .png or .jpg)",
            path
        ));
    }

    for path in [&args.html, &args.image].into_iter().flatten() {
        if let Err(e) = check_output_dir(path) {
            fail(&e);
        }
    }

    let writes_files = args.html.is_some() || args.image.is_some();
    if args.compact && writes_files && !args.print {
        print_warning("--compact has no effect without --print when writing files");
    }

    let builder = match args.props.as_deref() {
        Some(source) => {
            let text = read_props(source).unwrap_or_else(|e| fail(&e));
            ChartConfigBuilder::from_json_str(&text).unwrap_or_else(|e| fail(&e.to_string()))
        }
        None => ChartConfigBuilder::new(),
    };

    let builder = apply_overrides(builder, &args);
    debug!(?builder, "chart parameters");

    let chart = builder.build();

    if !args.quiet {
        print_summary(&chart);
    }

    if !writes_files || args.print {
        let json = if args.compact {
            chart.to_json()
        } else {
            chart.to_json_pretty()
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e.to_string()),
        }
    }

    if let Some(ref path) = args.html {
        let mut renderer = HtmlRenderer::new().with_size(args.width, args.height);
        if let Err(e) = renderer.save(&chart, path) {
            fail(&e.to_string());
        }
        if !args.quiet {
            print_saved(path);
        }
    }

    if let Some(ref path) = args.image {
        let mut renderer = EchartsRenderer::new(args.width, args.height);
        if let Err(e) = renderer.save(&chart, path) {
            fail(&e.to_string());
        }
        if !args.quiet {
            print_saved(path);
        }
    }
}
