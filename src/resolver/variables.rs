use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::ast::{DEFINE_KEY, Mapping, Value};
use crate::JscError;

static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]*)\}").expect("variable pattern is valid"));

/// Variable bindings visible at one point of the tree.
///
/// Each mapping gets a child scope holding its own `jcs_def` entries; lookups
/// fall back to the enclosing scopes. Siblings never see each other's layer.
#[derive(Debug, Default)]
pub struct Scope<'a> {
    vars: Mapping,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A root scope seeded with predefined bindings.
    pub fn with_vars(vars: Mapping) -> Self {
        Self { vars, parent: None }
    }

    pub fn child(&self) -> Scope<'_> {
        Scope {
            vars: Mapping::new(),
            parent: Some(self),
        }
    }

    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.vars
            .get(name)
            .or_else(|| self.parent.and_then(|p| p.lookup(name)))
    }

    /// Every visible binding, inner definitions shadowing outer ones.
    pub fn flatten(&self) -> Mapping {
        let mut out = self.parent.map(Scope::flatten).unwrap_or_default();
        for (name, value) in &self.vars {
            out.insert(name.clone(), value.clone());
        }
        out
    }
}

/// Substitute every `${name}` in the tree, starting from an empty scope.
pub fn resolve_variables(root: &mut Value) -> Result<(), JscError> {
    resolve_variables_in(root, &Scope::new())
}

/// Substitute every `${name}` in the tree against `scope`.
pub fn resolve_variables_in(root: &mut Value, scope: &Scope) -> Result<(), JscError> {
    substitute(root, scope)
}

fn resolve_mapping(mapping: &mut Mapping, parent: &Scope) -> Result<(), JscError> {
    let mut scope = parent.child();

    if let Some(definitions) = mapping.shift_remove(DEFINE_KEY) {
        match definitions {
            Value::Mapping(definitions) => {
                // later definitions may use earlier ones
                for (name, mut value) in definitions {
                    substitute(&mut value, &scope)?;
                    scope.define(name, value);
                }
            }
            other => {
                warn!(kind = other.kind(), "{} must be a mapping, ignored", DEFINE_KEY);
            }
        }
    }

    for value in mapping.values_mut() {
        substitute(value, &scope)?;
    }
    Ok(())
}

fn substitute(value: &mut Value, scope: &Scope) -> Result<(), JscError> {
    match value {
        Value::Mapping(items) => resolve_mapping(items, scope),
        Value::Sequence(items) => {
            for item in items {
                substitute(item, scope)?;
            }
            Ok(())
        }
        Value::String(text) => {
            if let Some(replacement) = interpolate(text, scope)? {
                *value = replacement;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Expand the `${name}` tokens of `text`. Returns `None` when there is nothing
/// to expand.
fn interpolate(text: &str, scope: &Scope) -> Result<Option<Value>, JscError> {
    let tokens: Vec<_> = VARIABLE.captures_iter(text).collect();
    if tokens.is_empty() {
        return Ok(None);
    }

    // A value that is exactly one token takes the bound value as is
    if let [only] = tokens.as_slice() {
        let whole = only.get(0).map(|m| m.as_str().len()) == Some(text.len());
        if whole {
            let bound = lookup(scope, &only[1])?;
            return Ok(Some(bound.clone()));
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in &tokens {
        let Some(token) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..token.start()]);
        match lookup(scope, &caps[1])? {
            Value::String(s) => out.push_str(s),
            other => out.push_str(&serde_json::to_string(other).unwrap_or_default()),
        }
        last = token.end();
    }
    out.push_str(&text[last..]);

    Ok(Some(Value::String(out)))
}

fn lookup<'s>(scope: &'s Scope, name: &str) -> Result<&'s Value, JscError> {
    scope.lookup(name).ok_or_else(|| JscError::UndefinedVariable {
        name: name.to_string(),
        environment: serde_json::to_string_pretty(&scope.flatten()).unwrap_or_default(),
        hint: Some(format!(
            "Define it in a {} block of this mapping or an enclosing one",
            DEFINE_KEY
        )),
        code: Some(503),
    })
}
