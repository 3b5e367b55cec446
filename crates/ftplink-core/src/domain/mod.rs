//! Domain types for ftplink

mod configuration;
mod endpoint;
mod parameters;

pub use configuration::*;
pub use endpoint::*;
pub use parameters::*;
