//! Reference resolution
//!
//! A parameter value of the form `#name` (or `#bean:name`) names an object in
//! the registry instead of carrying the value itself.

use std::any::Any;
use std::sync::Arc;
use tracing::debug;

use super::{FromParameter, Registry};
use crate::domain::ParameterValue;
use crate::error::{EndpointResult, ReferenceResolutionError};

const REFERENCE_SIGIL: &str = "#";
const BEAN_REFERENCE_PREFIX: &str = "#bean:";

/// Resolves literal-or-reference parameter values against a [`Registry`]
#[derive(Clone)]
pub struct ReferenceResolver {
    registry: Arc<dyn Registry>,
}

impl ReferenceResolver {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// Whether `value` uses the reference syntax
    pub fn is_reference(value: &str) -> bool {
        Self::reference_name(value).is_some()
    }

    /// The registry name a reference points at, or `None` for literals.
    ///
    /// Surrounding whitespace is ignored.
    pub fn reference_name(value: &str) -> Option<&str> {
        let value = value.trim();
        value
            .strip_prefix(BEAN_REFERENCE_PREFIX)
            .or_else(|| value.strip_prefix(REFERENCE_SIGIL))
            .filter(|name| !name.is_empty())
    }

    /// Resolve a parameter value to `T`.
    ///
    /// References are looked up in the registry; anything else is coerced as
    /// a literal through [`FromParameter`].
    pub fn resolve<T>(&self, value: &ParameterValue) -> EndpointResult<T>
    where
        T: FromParameter + Any + Clone,
    {
        if let Some(reference) = value.as_str().filter(|s| Self::is_reference(s)) {
            return Ok(self.resolve_reference(reference)?);
        }
        Ok(T::from_parameter(value)?)
    }

    /// Look up the object a reference points at and downcast it to `T`
    pub fn resolve_reference<T>(&self, reference: &str) -> Result<T, ReferenceResolutionError>
    where
        T: Any + Clone,
    {
        let name = Self::reference_name(reference).unwrap_or(reference);

        let object = self.registry.lookup_by_name(name).ok_or_else(|| {
            ReferenceResolutionError::NotFound {
                name: name.to_string(),
            }
        })?;

        let resolved = object
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| ReferenceResolutionError::WrongType {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })?;

        debug!("[ReferenceResolver] Resolved reference '{}'", name);
        Ok(resolved)
    }
}
