//! Generic property binding
//!
//! Options left over after the factory has consumed the client groups and
//! `siteCommand` are applied one by one through a [`PropertyApplier`].

use std::time::Duration;
use tracing::trace;

use crate::domain::{FtpEndpoint, ParameterValue};
use crate::error::{ConfigurationError, EndpointResult};
use crate::registry::FromParameter;
use crate::settings::keys::options;

/// Applies a single `key=value` option onto an endpoint
pub trait PropertyApplier: Send + Sync {
    /// Fails with [`ConfigurationError::UnknownOption`] for keys it does not know
    fn set_property(
        &self,
        endpoint: &mut FtpEndpoint,
        key: &str,
        value: &ParameterValue,
    ) -> EndpointResult<()>;
}

/// Default binder for the generic FTP endpoint options
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointPropertyBinder;

impl EndpointPropertyBinder {
    pub fn new() -> Self {
        Self
    }
}

fn parse<T: FromParameter>(key: &str, value: &ParameterValue) -> EndpointResult<T> {
    T::from_parameter(value).map_err(|e| {
        ConfigurationError::InvalidOption {
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn millis(key: &str, value: &ParameterValue) -> EndpointResult<Duration> {
    parse::<u64>(key, value).map(Duration::from_millis)
}

impl PropertyApplier for EndpointPropertyBinder {
    fn set_property(
        &self,
        endpoint: &mut FtpEndpoint,
        key: &str,
        value: &ParameterValue,
    ) -> EndpointResult<()> {
        let config = endpoint.configuration_mut();

        match key {
            options::ACCOUNT => config.account = Some(parse(key, value)?),
            options::BINARY => config.binary = parse(key, value)?,
            options::PASSIVE_MODE => config.passive_mode = parse(key, value)?,
            options::CONNECT_TIMEOUT => config.connect_timeout = millis(key, value)?,
            options::SO_TIMEOUT => config.so_timeout = millis(key, value)?,
            options::TIMEOUT => config.data_timeout = millis(key, value)?,
            options::STEPWISE => config.stepwise = parse(key, value)?,
            options::DISCONNECT => config.disconnect = parse(key, value)?,
            options::SEPARATOR => config.separator = parse(key, value)?,
            options::MAXIMUM_RECONNECT_ATTEMPTS => {
                config.maximum_reconnect_attempts = parse(key, value)?
            }
            options::RECONNECT_DELAY => config.reconnect_delay = millis(key, value)?,
            options::USERNAME => config.set_username(parse::<String>(key, value)?),
            options::PASSWORD => config.set_password(parse::<String>(key, value)?),
            _ => return Err(ConfigurationError::UnknownOption(key.to_string()).into()),
        }

        trace!("[PropertyBinder] Applied option '{}'", key);
        Ok(())
    }
}
