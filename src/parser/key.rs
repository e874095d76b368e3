use once_cell::sync::Lazy;
use regex::Regex;

static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[^(]*)\((?P<parents>[^)]*)\)(?P<rest>.*)$")
        .expect("inheritance annotation pattern is valid")
});

/// Split `name(parentA,parentB)` into `name` and its parent list.
///
/// Text after the closing parenthesis stays on the name, so
/// `name(base)<Linux>` yields `name<Linux>`.
pub fn split_inheritance(key: &str) -> (String, Vec<String>) {
    let Some(caps) = ANNOTATION.captures(key) else {
        return (key.trim().to_string(), Vec::new());
    };

    let name = format!("{}{}", caps["name"].trim(), caps["rest"].trim());
    let parents = caps["parents"]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    (name, parents)
}
