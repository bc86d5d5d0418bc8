//! Shared test utilities and fixtures for composition lookup tests

use std::path::Path;
use tempfile::NamedTempFile;


/// JSON-lines feedstock whose document `i` has composition `C{i}H4`
pub fn create_feedstock_lines(count: usize) -> String {
    (0..count)
        .map(|i| {
            serde_json::json!({
                "mdf-title": format!("gdb9-14 - record {}", i),
                "mdf-composition": format!("C{}H4", i),
            })
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write feedstock text to a temporary file
pub fn create_feedstock_file(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), content).unwrap();
    file
}

pub fn fixture_path() -> &'static Path {
    Path::new("fixture.json")
}
