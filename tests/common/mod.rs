//! Common test utilities

use std::path::{Path, PathBuf};

/// Props document matching a typical monthly sales chart
pub const SALES_PROPS: &str = r#"{
    "labels": ["Jan", "Feb", "Mar"],
    "data": [
        { "label": "Sales", "data": [10, 20, 30] },
        { "label": "Returns", "data": [1, 2, 3] }
    ],
    "legend": "Revenue",
    "yUnits": "USD"
}"#;

/// Write a props document into `dir` and return its path
pub fn write_props(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    std::fs::write(&path, json).unwrap();
    path
}

/// Parse stdout as the emitted Chart.js config
pub fn parse_config(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout should be a JSON config")
}
