//! Named-object registry
//!
//! The host owns the registry; endpoint construction only reads from it to
//! resolve `#name` references in parameter values.

mod convert;
mod reference;

pub use convert::*;
pub use reference::*;

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A registered object
pub type RegistryObject = Arc<dyn Any + Send + Sync>;

/// Lookup-by-name over objects registered by the host
pub trait Registry: Send + Sync {
    fn lookup_by_name(&self, name: &str) -> Option<RegistryObject>;
}

/// Thread-safe in-memory registry
#[derive(Default)]
pub struct InMemoryRegistry {
    objects: RwLock<HashMap<String, RegistryObject>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an object under `name`, replacing any previous binding
    pub fn bind<T: Any + Send + Sync>(&self, name: impl Into<String>, object: T) {
        let name = name.into();
        debug!("[Registry] Binding '{}' ({})", name, std::any::type_name::<T>());
        self.objects.write().insert(name, Arc::new(object));
    }

    /// Builder-style `bind`
    pub fn with<T: Any + Send + Sync>(self, name: impl Into<String>, object: T) -> Self {
        self.bind(name, object);
        self
    }

    pub fn unbind(&self, name: &str) -> bool {
        self.objects.write().remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

impl Registry for InMemoryRegistry {
    fn lookup_by_name(&self, name: &str) -> Option<RegistryObject> {
        self.objects.read().get(name).cloned()
    }
}

impl std::fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let objects = self.objects.read();
        f.debug_struct("InMemoryRegistry")
            .field("names", &objects.keys().collect::<Vec<_>>())
            .finish()
    }
}
