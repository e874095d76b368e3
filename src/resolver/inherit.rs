use tracing::warn;

use super::merge;
use crate::ast::{INHERIT_KEY, Mapping, Value};
use crate::JscError;

/// Merge `jsc_inherit` parents into every mapping that names them.
///
/// Parents are looked up among the inheriting mapping's siblings and are
/// resolved before they are merged, so chains like `c(b)`, `b(a)` come out
/// complete whatever order the members were written in. Parents listed first
/// win fields that several of them provide.
pub fn resolve_inheritance(root: &mut Value) -> Result<(), JscError> {
    if let Value::Mapping(items) = root {
        // A root-level list refers to the root's own members
        if let Some(parents) = take_parents(items, "<root>") {
            let mut chain = vec!["<root>".to_string()];
            for parent in &parents {
                if !items.contains_key(parent.as_str()) {
                    warn!(parent = %parent, "root inherits from an unknown member");
                    continue;
                }
                resolve_member(items, parent, &mut chain)?;
                if let Some(Value::Mapping(parent_items)) = items.get(parent.as_str()).cloned() {
                    merge(items, &parent_items);
                }
            }
        }
    }
    resolve_value(root)
}

fn resolve_value(value: &mut Value) -> Result<(), JscError> {
    match value {
        Value::Mapping(items) => resolve_scope(items),
        Value::Sequence(items) => {
            for item in items {
                resolve_value(item)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Resolve every member of `scope`, then descend into each of them.
fn resolve_scope(scope: &mut Mapping) -> Result<(), JscError> {
    let keys: Vec<String> = scope.keys().cloned().collect();
    for key in &keys {
        resolve_member(scope, key, &mut Vec::new())?;
    }

    for value in scope.values_mut() {
        resolve_value(value)?;
    }
    Ok(())
}

fn resolve_member(scope: &mut Mapping, key: &str, chain: &mut Vec<String>) -> Result<(), JscError> {
    if chain.iter().any(|k| k == key) {
        let mut cycle = chain.clone();
        cycle.push(key.to_string());
        return Err(JscError::InheritanceCycle {
            chain: cycle,
            hint: Some("A mapping cannot inherit from itself, directly or through its parents".into()),
            code: Some(502),
        });
    }

    let Some(Value::Mapping(member)) = scope.get_mut(key) else {
        return Ok(());
    };
    let Some(parents) = take_parents(member, key) else {
        return Ok(());
    };

    chain.push(key.to_string());
    for parent in &parents {
        if !scope.contains_key(parent.as_str()) {
            warn!(key = %key, parent = %parent, "inherited parent not found in scope");
            continue;
        }

        resolve_member(scope, parent, chain)?;

        match scope.get(parent.as_str()).cloned() {
            Some(Value::Mapping(parent_items)) => {
                if let Some(Value::Mapping(member)) = scope.get_mut(key) {
                    merge(member, &parent_items);
                }
            }
            Some(other) => {
                warn!(key = %key, parent = %parent, kind = other.kind(), "inherited parent is not a mapping");
            }
            None => {}
        }
    }
    chain.pop();

    Ok(())
}

/// Remove the inheritance list from `member`, returning the parent names.
fn take_parents(member: &mut Mapping, key: &str) -> Option<Vec<String>> {
    let list = member.shift_remove(INHERIT_KEY)?;
    let Value::Sequence(items) = list else {
        warn!(key = %key, "{} must be a list of names, ignored", INHERIT_KEY);
        return None;
    };

    let mut parents = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(name) => parents.push(name),
            other => {
                warn!(key = %key, kind = other.kind(), "non-string entry in {} ignored", INHERIT_KEY);
            }
        }
    }
    Some(parents)
}
