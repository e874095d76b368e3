// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{JscError, Value};

fn type_error(expected: &str, value: &Value, hint: &str, code: u32) -> JscError {
    JscError::TypeError {
        message: format!("Expected {}, got {} {}", expected, value.kind(), render(value)),
        hint: Some(hint.into()),
        code: Some(code),
    }
}

fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Whole numbers, including floats without a fractional part.
fn integer(value: &Value) -> Option<i128> {
    match value {
        Value::Integer(n) => Some(i128::from(*n)),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i128),
        _ => None,
    }
}

macro_rules! integer_conversion {
    ($($ty:ty => $code:expr),* $(,)?) => {$(
        impl TryFrom<Value> for $ty {
            type Error = JscError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                let n = integer(&value).ok_or_else(|| {
                    type_error("integer", &value, "Use a whole number in your document", 402)
                })?;
                <$ty>::try_from(n).map_err(|_| JscError::TypeError {
                    message: format!("Number {} out of range for {}", n, stringify!($ty)),
                    hint: Some(format!(
                        "Use a number between {} and {}",
                        <$ty>::MIN,
                        <$ty>::MAX
                    )),
                    code: Some($code),
                })
            }
        }
    )*};
}

integer_conversion! {
    i64 => 403,
    i32 => 403,
    u64 => 403,
    u32 => 403,
    u16 => 403,
    usize => 403,
}

impl TryFrom<Value> for String {
    type Error = JscError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(type_error("string", &other, "Use a string value in your document", 401)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = JscError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::String(ref s) if matches!(s.to_lowercase().as_str(), "true" | "false") => {
                Err(JscError::TypeError {
                    message: format!("Expected boolean, got the string \"{}\"", s),
                    hint: Some("Write true or false without quotes".into()),
                    code: Some(405),
                })
            }
            other => Err(type_error("boolean", &other, "Use true or false", 405)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = JscError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Integer(n) => Ok(n as f64),
            other => Err(type_error("number", &other, "Use a number value in your document", 402)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = JscError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|f| f as f32)
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = JscError>,
{
    type Error = JscError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(type_error("array", &other, "Use an array [...] in your document", 407)),
        }
    }
}

impl<T> TryFrom<Value> for HashMap<String, T>
where
    T: TryFrom<Value, Error = JscError>,
{
    type Error = JscError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(items) => items
                .into_iter()
                .map(|(k, v)| Ok((k, T::try_from(v)?)))
                .collect(),
            other => Err(type_error("mapping", &other, "Use an object {...} in your document", 408)),
        }
    }
}

impl<T> TryFrom<Value> for IndexMap<String, T>
where
    T: TryFrom<Value, Error = JscError>,
{
    type Error = JscError;

    /// Keeps the member order of the document.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(items) => items
                .into_iter()
                .map(|(k, v)| Ok((k, T::try_from(v)?)))
                .collect(),
            other => Err(type_error("mapping", &other, "Use an object {...} in your document", 408)),
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = JscError>,
{
    type Error = JscError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(None),
            v => Ok(Some(T::try_from(v)?)),
        }
    }
}
