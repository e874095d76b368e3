// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::ast::Value;
use crate::normalize;
use crate::parser;
use crate::platform::Platform;
use crate::resolver;
use crate::JscError;

mod access;
mod conversion;
mod imports;

pub use imports::{resolve_import_path, split_imports};

/// Knobs for one resolution run.
///
/// # Example
/// ```ignore
/// let options = LoadOptions::default()
///     .with_import_dir("configs/shared")
///     .with_platform(Some(Platform::Linux));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Base directory for `import` paths. Relative paths resolve against the
    /// working directory when unset.
    pub import_dir: Option<PathBuf>,
    /// Run the variable stage.
    pub resolve_variables: bool,
    /// Platform whose tagged keys are kept. `None` drops every tagged key.
    pub platform: Option<Platform>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            import_dir: None,
            resolve_variables: true,
            platform: Platform::current(),
        }
    }
}

impl LoadOptions {
    pub fn with_import_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.import_dir = Some(dir.into());
        self
    }

    pub fn with_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }

    /// Select the platform by its tag spelling. Unknown names leave no
    /// active platform.
    pub fn with_platform_name(mut self, name: &str) -> Self {
        self.platform = match name.parse::<Platform>() {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };
        self
    }

    pub fn with_variables(mut self, enabled: bool) -> Self {
        self.resolve_variables = enabled;
        self
    }
}

/// Resolve a config-language document held in memory.
pub fn parse_jsc(text: &str, options: &LoadOptions) -> Result<Value, JscError> {
    let mut tree = build_tree(text, options, &mut Vec::new())?;
    finish(&mut tree, options)?;
    Ok(tree)
}

/// Read and resolve a config-language document from disk.
pub fn load_jsc<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Value, JscError> {
    let path = path.as_ref();
    let content = read_document(path)?;
    resolve_loaded(path, &content, options)
}

fn resolve_loaded(path: &Path, content: &str, options: &LoadOptions) -> Result<Value, JscError> {
    let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut tree = build_tree(content, options, &mut vec![key])?;
    finish(&mut tree, options)?;
    Ok(tree)
}

fn read_document(path: &Path) -> Result<String, JscError> {
    fs::read_to_string(path).map_err(|e| JscError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.to_string_lossy().to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    })
}

/// Every stage up to and including inheritance. Imports come through here
/// too, which is why variables are left for [`finish`].
pub(crate) fn build_tree(
    text: &str,
    options: &LoadOptions,
    chain: &mut Vec<PathBuf>,
) -> Result<Value, JscError> {
    let stripped = normalize::strip_comments(text);
    let (import_paths, body) = imports::split_imports(&stripped);
    let body = normalize::compact_line_whitespace(&normalize::unify_quotes(body));
    debug!(imports = import_paths.len(), bytes = body.len(), "normalized document");

    let json = parser::transform(&body)?;
    let json = normalize::remove_trailing_commas(&json);
    let mut root = parse_buffer(&json)?;

    for raw in &import_paths {
        let imported = imports::load_import(raw, options, chain)?;
        match (root.as_mapping_mut(), imported) {
            (Some(items), Value::Mapping(imported)) => resolver::merge(items, &imported),
            (_, other) => {
                warn!(import = %raw, kind = other.kind(), "import skipped, only mappings merge");
            }
        }
    }

    resolver::resolve_platform_keys(&mut root, options.platform);
    resolver::resolve_inheritance(&mut root)?;
    debug!("structural stages done");

    Ok(root)
}

fn finish(tree: &mut Value, options: &LoadOptions) -> Result<(), JscError> {
    if options.resolve_variables {
        resolver::resolve_variables(tree)?;
        debug!("variables resolved");
    }
    Ok(())
}

/// Parse the transformed buffer as strict JSON.
fn parse_buffer(json: &str) -> Result<Value, JscError> {
    serde_json::from_str::<serde_json::Value>(json)
        .map(Value::from)
        .map_err(|e| JscError::InvalidBuffer {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
            hint: Some("The document transformed into invalid JSON; check separators and brackets".into()),
            code: Some(213),
        })
}

/// A resolved document with dot-path access on top.
pub struct JscConfig {
    root: Value,
    raw_content: String, // Kept for error reporting
}

impl JscConfig {
    /// Load a document and resolve imports from the same directory
    ///
    /// # Example
    /// ```ignore
    /// let config = JscConfig::from_file("build.jsc")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, JscError> {
        let path_ref = path.as_ref();
        let base_dir = path_ref
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        Self::from_file_with(path_ref, &LoadOptions::default().with_import_dir(base_dir))
    }

    pub fn from_file_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self, JscError> {
        let raw_content = read_document(path.as_ref())?;
        let root = resolve_loaded(path.as_ref(), &raw_content, options)?;
        Ok(Self { root, raw_content })
    }

    /// Resolve a document held in memory with default options.
    pub fn from_str(content: &str) -> Result<Self, JscError> {
        Self::from_str_with(content, &LoadOptions::default())
    }

    pub fn from_str_with(content: &str, options: &LoadOptions) -> Result<Self, JscError> {
        let root = parse_jsc(content, options)?;
        Ok(Self {
            root,
            raw_content: content.to_string(),
        })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }
}

#[cfg(test)]
mod tests;
