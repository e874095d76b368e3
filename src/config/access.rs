use super::*;

impl JscConfig {
    /// Get a typed value from the resolved document using dot notation.
    ///
    /// Automatically handles both `snake_case` and `kebab-case` key names.
    /// Numeric segments index into sequences.
    ///
    /// # Examples
    /// ```no_run
    /// # use jsc_cfg::JscConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = JscConfig::from_file("build.jsc")?;
    /// let target: String = config.get("linux.target")?;
    /// let jobs: u32 = config.get("build.jobs")?;
    /// let first: String = config.get("build.sources.0")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if path doesn't exist or value can't be converted to type T.
    pub fn get<T>(&self, path: &str) -> Result<T, JscError>
    where
        T: TryFrom<Value, Error = JscError>,
    {
        let value = self.get_value_flexible(path)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content))
    }

    /// Get an optional typed value - returns `None` if the path doesn't exist.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, JscError>
    where
        T: TryFrom<Value, Error = JscError>,
    {
        match self.get_value_flexible(path) {
            Ok(value) => Ok(Some(T::try_from(value)?)),
            Err(JscError::PathNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use jsc_cfg::JscConfig;
    /// # let config = JscConfig::from_file("build.jsc").unwrap();
    /// let jobs = config.get_or("build.jobs", 4u32);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = JscError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Tries each segment as written, then its snake_case and kebab-case spellings.
    fn get_value_flexible(&self, path: &str) -> Result<Value, JscError> {
        if let Ok(v) = self.get_value(path) {
            return Ok(v);
        }
        if path.trim().is_empty() {
            return self.get_value(path);
        }

        let segs: Vec<&str> = path.split('.').collect();

        fn variants(seg: &str) -> Vec<String> {
            let mut out = vec![seg.to_string()];
            for alt in [seg.replace('-', "_"), seg.replace('_', "-")] {
                if !out.contains(&alt) {
                    out.push(alt);
                }
            }
            out
        }

        fn dfs<'v>(node: &'v Value, segs: &[&str]) -> Option<&'v Value> {
            let Some((first, rest)) = segs.split_first() else {
                return Some(node);
            };
            variants(first)
                .iter()
                .find_map(|v| step(node, v).and_then(|child| dfs(child, rest)))
        }

        dfs(&self.root, &segs)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    /// Get a raw `Value` by exact path. An empty path returns the whole tree.
    pub fn get_value(&self, path: &str) -> Result<Value, JscError> {
        if path.trim().is_empty() {
            return Ok(self.root.clone());
        }

        let mut node = &self.root;
        for seg in path.split('.') {
            node = step(node, seg).ok_or_else(|| not_found(path))?;
        }
        Ok(node.clone())
    }

    /// Get all keys at a given path level.
    ///
    /// # Examples
    /// ```no_run
    /// # use jsc_cfg::JscConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = JscConfig::from_file("build.jsc")?;
    /// for key in config.get_keys("targets")? {
    ///     println!("targets.{}", key);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, JscError> {
        match self.get_value_flexible(path)? {
            Value::Mapping(items) => Ok(items.keys().cloned().collect()),
            other => Err(JscError::TypeError {
                message: format!("Path '{}' is a {}, not a mapping", path, other.kind()),
                hint: Some("Only mappings have keys".into()),
                code: Some(406),
            }),
        }
    }

    /// Check if a path exists.
    pub fn has(&self, path: &str) -> bool {
        self.get_value_flexible(path).is_ok()
    }
}

fn step<'v>(node: &'v Value, seg: &str) -> Option<&'v Value> {
    match node {
        Value::Mapping(items) => items.get(seg),
        Value::Sequence(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn not_found(path: &str) -> JscError {
    JscError::PathNotFound {
        path: path.to_string(),
        hint: Some("Check that the path exists in the resolved document".into()),
        code: Some(404),
    }
}

/// Point type errors at the source line that defines the key, when it can be found.
fn enhance_error_with_line_info(e: JscError, path: &str, raw_content: &str) -> JscError {
    match e {
        JscError::TypeError { message, hint, code } => match find_config_line(path, raw_content) {
            Some((line, snippet)) => JscError::TypeError {
                message: format!("{}\n  → line {}: {}", message, line, snippet),
                hint,
                code,
            },
            None => JscError::TypeError { message, hint, code },
        },
        other => other,
    }
}

/// First line whose key is the last segment of `path`, with its 1-based number.
fn find_config_line(path: &str, raw_content: &str) -> Option<(usize, String)> {
    let key = path.rsplit('.').next()?;
    if key.is_empty() {
        return None;
    }

    raw_content.lines().enumerate().find_map(|(idx, line)| {
        let trimmed = line.trim_start();
        let rest = trimmed
            .strip_prefix(key)
            .or_else(|| trimmed.strip_prefix('"').and_then(|t| t.strip_prefix(key)?.strip_prefix('"')))
            .or_else(|| trimmed.strip_prefix('\'').and_then(|t| t.strip_prefix(key)?.strip_prefix('\'')))?;
        let rest = rest.trim_start();
        if rest.starts_with(':') || rest.starts_with('<') || rest.starts_with('(') {
            Some((idx + 1, trimmed.trim_end().to_string()))
        } else {
            None
        }
    })
}
