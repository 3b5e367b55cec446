//! Services
//!
//! - `endpoint_factory` - builds endpoints from a URI and parameters
//! - `property_binder` - applies generic options onto an endpoint

mod endpoint_factory;
mod property_binder;

pub use endpoint_factory::FtpEndpointFactory;
pub use property_binder::{EndpointPropertyBinder, PropertyApplier};
