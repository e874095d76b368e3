// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{LoadOptions, build_tree};
use crate::ast::Value;
use crate::JscError;

/// Split the leading `import` lines from the document body.
///
/// Accepts `import "path"`, `import 'path'` and `import path`, with blank
/// lines in between. The body may start on the last import line, right after
/// the path. Returns the raw paths in order and the remaining text.
pub fn split_imports(text: &str) -> (Vec<String>, &str) {
    let mut paths = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            offset += line.len();
            continue;
        }
        let Some((path, tail)) = import_target(trimmed) else {
            break;
        };
        paths.push(path.to_string());
        if !tail.is_empty() {
            let lead = line.len() - line.trim_start().len();
            offset += lead + trimmed.len() - tail.len();
            break;
        }
        offset += line.len();
    }

    (paths, &text[offset..])
}

/// The path of an `import` directive line and whatever follows it on the
/// same line, or `None` for any other line.
///
/// A quoted path runs to its closing quote. A bare path stops at `{` and may
/// not contain `:`, so `import: value` stays a key.
fn import_target(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("import")?;
    if !rest.starts_with(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
        return None;
    }

    let rest = rest.trim_start();
    let (path, tail) = match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            let end = rest[1..].find(quote)? + 1;
            (&rest[1..end], &rest[end + 1..])
        }
        _ => {
            let end = rest.find('{').unwrap_or(rest.len());
            let path = rest[..end].trim_end();
            if path.contains(':') {
                return None;
            }
            (path, &rest[end..])
        }
    };

    if path.is_empty() { None } else { Some((path, tail.trim_start())) }
}

/// Expand `~/` and resolve relative paths against `base_dir`.
pub fn resolve_import_path(raw_path: &str, base_dir: Option<&Path>) -> Result<PathBuf, JscError> {
    let mut p = if let Some(rest) = raw_path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| JscError::FileError {
            message: "Could not determine home directory for ~ expansion".into(),
            path: raw_path.to_string(),
            hint: Some("Set HOME or use an absolute path in the import".into()),
            code: Some(300),
        })?;
        home.join(rest)
    } else {
        PathBuf::from(raw_path)
    };

    if p.is_relative() {
        if let Some(base) = base_dir {
            p = base.join(p);
        }
    }
    Ok(p)
}

/// Load one imported document through the structural stages.
///
/// `chain` holds the documents currently being loaded, outermost first.
/// Meeting one of them again is a cycle; loading the same file twice from
/// different branches is not.
pub(super) fn load_import(
    raw_path: &str,
    options: &LoadOptions,
    chain: &mut Vec<PathBuf>,
) -> Result<Value, JscError> {
    let path = resolve_import_path(raw_path, options.import_dir.as_deref())?;
    if !path.exists() {
        return Err(JscError::MissingImport {
            path: path.to_string_lossy().to_string(),
            hint: Some("Check the import path and the import directory".into()),
            code: Some(303),
        });
    }

    let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
    if chain.contains(&key) {
        let mut cycle: Vec<String> = chain.iter().map(|p| p.to_string_lossy().to_string()).collect();
        cycle.push(key.to_string_lossy().to_string());
        return Err(JscError::ImportCycle {
            path: path.to_string_lossy().to_string(),
            chain: cycle,
            hint: Some("Remove one of the imports that lead back to this file".into()),
            code: Some(304),
        });
    }

    let content = fs::read_to_string(&path).map_err(|e| JscError::FileError {
        message: format!("Failed to read import file: {}", e),
        path: path.to_string_lossy().to_string(),
        hint: Some("Check that the imported file is readable".into()),
        code: Some(302),
    })?;

    debug!(path = %path.display(), depth = chain.len(), "loading import");

    chain.push(key);
    let tree = build_tree(&content, options, chain);
    chain.pop();
    tree
}
