use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::merge;
use crate::ast::{Mapping, Value};
use crate::platform::Platform;

static TAGGED_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[^<]*)<(?P<tag>[^>]*)>").expect("platform tag pattern is valid")
});

/// Split `name<Tag>` into `("name", "Tag")`.
pub fn split_platform_tag(key: &str) -> Option<(&str, &str)> {
    let caps = TAGGED_KEY.captures(key)?;
    let name = caps.name("name")?.as_str();
    let tag = caps.name("tag")?.as_str();
    Some((name, tag))
}

/// Fold `key<Platform>` entries into `key` for the active platform and drop
/// the rest. Untagged keys always take precedence.
///
/// With no active platform every tagged key is dropped.
pub fn resolve_platform_keys(root: &mut Value, platform: Option<Platform>) {
    if platform.is_none() {
        warn!("unsupported platform, platform-specific keys are dropped");
    }
    resolve_value(root, platform);
}

fn resolve_value(value: &mut Value, platform: Option<Platform>) {
    match value {
        Value::Mapping(items) => resolve_mapping(items, platform),
        Value::Sequence(items) => {
            for item in items {
                resolve_value(item, platform);
            }
        }
        _ => {}
    }
}

fn resolve_mapping(mapping: &mut Mapping, platform: Option<Platform>) {
    for value in mapping.values_mut() {
        resolve_value(value, platform);
    }

    let tagged: Vec<String> = mapping
        .keys()
        .filter(|k| split_platform_tag(k).is_some())
        .cloned()
        .collect();
    if tagged.is_empty() {
        return;
    }

    let mut staged = Mapping::new();
    for key in tagged {
        let Some(value) = mapping.shift_remove(&key) else {
            continue;
        };
        let Some((name, tag)) = split_platform_tag(&key) else {
            continue;
        };
        if platform.is_some_and(|p| p.as_str() == tag) {
            staged.insert(name.to_string(), value);
        } else {
            debug!(key = %key, "dropping key for another platform");
        }
    }

    merge(mapping, &staged);
}
