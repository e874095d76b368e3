// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use crate::ast::Value;
use crate::config::{LoadOptions, load_jsc};
use crate::JscError;

/// Render a resolved tree as JSON with 4-space indentation, members in
/// document order.
///
/// # Examples
/// ```no_run
/// use jsc_cfg::{export, parse_jsc, LoadOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tree = parse_jsc("{name: demo}", &LoadOptions::default())?;
/// println!("{}", export::to_json_string(&tree)?);
/// # Ok(())
/// # }
/// ```
pub fn to_json_string(value: &Value) -> Result<String, JscError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut ser)
        .map_err(|e| export_error(format!("JSON serialization failed: {}", e)))?;

    String::from_utf8(buf).map_err(|e| export_error(format!("Serialized JSON is not UTF-8: {}", e)))
}

fn export_error(message: String) -> JscError {
    JscError::ExportError {
        message,
        hint: None,
        code: Some(307),
    }
}

/// Where `input` lands under `output_dir`: the input path, relative as given,
/// with its extension swapped for `.json`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let relative: PathBuf = input
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect();
    output_dir.join(relative).with_extension("json")
}

/// Resolve `input` and write it as JSON under `output_dir`, creating
/// directories as needed. Returns the written path.
pub fn export_jsc_file(
    input: &Path,
    output_dir: &Path,
    options: &LoadOptions,
) -> Result<PathBuf, JscError> {
    let output = output_path_for(input, output_dir);
    info!(input = %input.display(), output = %output.display(), "start to generate");

    let tree = load_jsc(input, options)?;
    let text = to_json_string(&tree)?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| JscError::FileError {
            message: format!("Failed to create output directory: {}", e),
            path: parent.to_string_lossy().to_string(),
            hint: Some("Check permissions on the output directory".into()),
            code: Some(305),
        })?;
    }

    fs::write(&output, text).map_err(|e| JscError::FileError {
        message: format!("Failed to write output: {}", e),
        path: output.to_string_lossy().to_string(),
        hint: None,
        code: Some(306),
    })?;

    info!(input = %input.display(), "finish generating");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_jsc;
    use crate::platform::Platform;
    use tempfile::TempDir;

    fn options() -> LoadOptions {
        LoadOptions::default().with_platform(Some(Platform::Linux))
    }

    #[test]
    fn test_four_space_indent_in_document_order() {
        let tree = parse_jsc("{zeta: 1, alpha: [true, null], mid: {x: 'y'}}", &options()).unwrap();
        let text = to_json_string(&tree).unwrap();

        let expected = "{\n    \"zeta\": 1,\n    \"alpha\": [\n        true,\n        null\n    ],\n    \"mid\": {\n        \"x\": \"y\"\n    }\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_failure_is_export_error() {
        let err = export_error("JSON serialization failed: key must be a string".into());
        assert_eq!(err.code(), Some(307));
        assert!(matches!(err, JscError::ExportError { .. }));
        assert!(err.to_string().starts_with("[JSC] Export Error: JSON serialization failed"));
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("configs/app.jsc"), Path::new("out")),
            PathBuf::from("out/configs/app.json")
        );
        assert_eq!(
            output_path_for(Path::new("./plain"), Path::new("out")),
            PathBuf::from("out/plain.json")
        );
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("app.jsc");
        fs::write(&input, "{name: demo, debug(name_base): {}, name_base: {level: 1}}").unwrap();

        let out_dir = dir.path().join("build/json");
        let written = export_jsc_file(&input, &out_dir, &options()).unwrap();

        assert!(written.starts_with(&out_dir));
        assert_eq!(written.extension().and_then(|e| e.to_str()), Some("json"));

        let text = fs::read_to_string(&written).unwrap();
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back["debug"]["level"], 1);
        assert_eq!(back["name"], "demo");
    }
}
