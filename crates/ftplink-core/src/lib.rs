//! # ftplink Core Library
//!
//! Builds typed FTP endpoints from a connection URI and a bag of parameters.
//!
//! ## Modules
//!
//! - `domain` - Parameter store, connection configuration, endpoint
//! - `registry` - Named-object registry and `#reference` resolution
//! - `service` - Endpoint factory and generic property binding
//! - `settings` - Component settings and option key constants
//! - `error` - Error taxonomy

pub mod domain;
pub mod error;
pub mod registry;
pub mod service;
pub mod settings;

// Re-export commonly used types
pub use domain::*;
pub use error::{ConfigurationError, EndpointError, EndpointResult, ReferenceResolutionError};
pub use registry::{FromParameter, InMemoryRegistry, ReferenceResolver, Registry};
pub use service::*;
pub use settings::{keys, ComponentSettings};
