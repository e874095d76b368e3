// Author: Dustin Pilgrim
// License: MIT

//! Tree-level resolution stages: platform keys, inheritance and variables.

use crate::ast::{Mapping, Value};

mod inherit;
mod platform;
mod variables;

pub use inherit::resolve_inheritance;
pub use platform::{resolve_platform_keys, split_platform_tag};
pub use variables::{resolve_variables, resolve_variables_in, Scope};

/// Field-level deep merge of `parent` into `child`.
///
/// Fields missing from `child` are copied over; when both sides hold a
/// mapping the merge recurses. Anything else already in `child` is left
/// alone, so a child scalar or sequence always wins.
pub fn merge(child: &mut Mapping, parent: &Mapping) {
    for (key, parent_value) in parent {
        match child.get_mut(key) {
            None => {
                child.insert(key.clone(), parent_value.clone());
            }
            Some(Value::Mapping(child_items)) => {
                if let Value::Mapping(parent_items) = parent_value {
                    merge(child_items, parent_items);
                }
            }
            Some(_) => {}
        }
    }
}
