//! Literal parameter coercion

use serde_json::Value;

use crate::domain::{ParameterValue, PathSeparator};
use crate::error::ConfigurationError;

/// Conversion of a literal parameter value into a typed option value.
///
/// Strings are parsed, native JSON values are taken as they are.
pub trait FromParameter: Sized {
    const TYPE_NAME: &'static str;

    fn from_parameter(value: &ParameterValue) -> Result<Self, ConfigurationError>;
}

fn invalid<T: FromParameter>(value: &ParameterValue) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        value: display_value(value),
        expected: T::TYPE_NAME,
    }
}

/// Render a value the way it was most likely written in the URI
pub fn display_value(value: &ParameterValue) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl FromParameter for String {
    const TYPE_NAME: &'static str = "String";

    fn from_parameter(value: &ParameterValue) -> Result<Self, ConfigurationError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(invalid::<Self>(value)),
        }
    }
}

impl FromParameter for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_parameter(value: &ParameterValue) -> Result<Self, ConfigurationError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(invalid::<Self>(value)),
        }
    }
}

macro_rules! impl_from_parameter_for_int {
    ($($ty:ty),*) => {
        $(
            impl FromParameter for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_parameter(value: &ParameterValue) -> Result<Self, ConfigurationError> {
                    let parsed = match value {
                        Value::Number(n) => n
                            .as_i64()
                            .and_then(|v| <$ty>::try_from(v).ok())
                            .or_else(|| n.as_u64().and_then(|v| <$ty>::try_from(v).ok())),
                        Value::String(s) => s.trim().parse::<$ty>().ok(),
                        _ => None,
                    };
                    parsed.ok_or_else(|| invalid::<Self>(value))
                }
            }
        )*
    };
}

impl_from_parameter_for_int!(u16, u32, u64, i64, usize);

impl FromParameter for PathSeparator {
    const TYPE_NAME: &'static str = "PathSeparator";

    fn from_parameter(value: &ParameterValue) -> Result<Self, ConfigurationError> {
        match value {
            Value::String(s) => s.parse(),
            _ => Err(invalid::<Self>(value)),
        }
    }
}
