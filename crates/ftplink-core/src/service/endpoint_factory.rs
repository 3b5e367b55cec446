//! FTP Endpoint Factory
//!
//! Turns `uri + parameters` into a configured [`FtpEndpoint`].
//!
//! Steps, in order:
//! 1. Split off the option suffix (`?...`); only the base is parsed as a URI
//! 2. Build a fresh [`FtpConfiguration`] from the base URI
//! 3. Make the directory relative
//! 4. Move the `ftpClientConfig.` / `ftpClient.` groups onto the endpoint
//! 5. Resolve `siteCommand` (may be a `#reference`) and bind the remaining options

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{redact_password, FtpConfiguration, FtpEndpoint, ParameterStore};
use crate::error::{ConfigurationError, EndpointError, EndpointResult};
use crate::registry::{FromParameter, ReferenceResolver, Registry};
use crate::service::{EndpointPropertyBinder, PropertyApplier};
use crate::settings::{keys, ComponentSettings};

/// Factory for FTP endpoints.
///
/// Holds no per-endpoint state: every call builds a new configuration and a
/// new endpoint, so one factory can be shared between threads.
#[derive(Clone)]
pub struct FtpEndpointFactory {
    resolver: ReferenceResolver,
    property_applier: Arc<dyn PropertyApplier>,
    settings: ComponentSettings,
}

impl FtpEndpointFactory {
    /// Create a factory that binds generic options with [`EndpointPropertyBinder`]
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self::with_property_applier(registry, Arc::new(EndpointPropertyBinder::new()))
    }

    pub fn with_property_applier(
        registry: Arc<dyn Registry>,
        property_applier: Arc<dyn PropertyApplier>,
    ) -> Self {
        Self {
            resolver: ReferenceResolver::new(registry),
            property_applier,
            settings: ComponentSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ComponentSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ComponentSettings {
        &self.settings
    }

    /// Build a configured endpoint.
    ///
    /// Consumes the client groups, `siteCommand` and every option that was
    /// applied from `parameters`. On failure no endpoint is returned; options
    /// that were not applied stay in `parameters`, the client groups and
    /// `siteCommand` are not put back.
    pub fn build_endpoint(
        &self,
        uri: &str,
        parameters: &mut ParameterStore,
    ) -> EndpointResult<FtpEndpoint> {
        debug!(
            "[FtpEndpointFactory] Building endpoint for {} ({} parameters)",
            redact_password(Self::base_uri(uri)),
            parameters.len()
        );

        let mut endpoint = self.build_file_endpoint(uri, parameters)?;
        self.set_properties(&mut endpoint, parameters)?;

        debug!(
            "[FtpEndpointFactory] Endpoint {} ready: host={} directory='{}'",
            endpoint.id(),
            endpoint.configuration().host(),
            endpoint.configuration().directory()
        );
        Ok(endpoint)
    }

    /// The URI up to (not including) the first `?`.
    ///
    /// Options may hold characters a strict URI parser rejects (e.g. `$` in
    /// expressions), so only this part goes through URI parsing.
    pub fn base_uri(uri: &str) -> &str {
        uri.split_once('?').map_or(uri, |(base, _)| base)
    }

    fn build_file_endpoint(
        &self,
        uri: &str,
        parameters: &mut ParameterStore,
    ) -> EndpointResult<FtpEndpoint> {
        // Every endpoint gets its own configuration so it can customize it freely
        let mut config = FtpConfiguration::from_uri(Self::base_uri(uri))?;

        if self.settings.relative_directories {
            config.ensure_relative_directory();
        }

        let mut endpoint = FtpEndpoint::new(uri, config);
        self.extract_and_set_client_config_parameters(parameters, &mut endpoint);
        self.extract_and_set_client_parameters(parameters, &mut endpoint);

        Ok(endpoint)
    }

    /// Move `ftpClientConfig.*` options onto the endpoint, if any were given
    fn extract_and_set_client_config_parameters(
        &self,
        parameters: &mut ParameterStore,
        endpoint: &mut FtpEndpoint,
    ) {
        if parameters.has_properties(keys::FTP_CLIENT_CONFIG_PREFIX) {
            let params = parameters.extract_properties(keys::FTP_CLIENT_CONFIG_PREFIX);
            debug!(
                "[FtpEndpointFactory] {} client config option(s) for {}",
                params.len(),
                endpoint.id()
            );
            endpoint.set_client_config_parameters(params);
        }
    }

    /// Move `ftpClient.*` options onto the endpoint, if any were given
    fn extract_and_set_client_parameters(
        &self,
        parameters: &mut ParameterStore,
        endpoint: &mut FtpEndpoint,
    ) {
        if parameters.has_properties(keys::FTP_CLIENT_PREFIX) {
            let params = parameters.extract_properties(keys::FTP_CLIENT_PREFIX);
            debug!(
                "[FtpEndpointFactory] {} client option(s) for {}",
                params.len(),
                endpoint.id()
            );
            endpoint.set_client_parameters(params);
        }
    }

    fn set_properties(
        &self,
        endpoint: &mut FtpEndpoint,
        parameters: &mut ParameterStore,
    ) -> EndpointResult<()> {
        let site_command = parameters
            .remove(keys::SITE_COMMAND)
            .filter(|value| !value.is_null());

        if let Some(value) = site_command {
            let mut cmd = String::from_parameter(&value)?;
            if ReferenceResolver::is_reference(&cmd) {
                cmd = self.resolver.resolve_reference::<String>(&cmd)?;
            }
            endpoint.configuration_mut().set_site_command(cmd);
        }

        self.apply_remaining(endpoint, parameters)
    }

    /// Apply the remaining options in order. An option leaves the store only
    /// once it has been applied.
    fn apply_remaining(
        &self,
        endpoint: &mut FtpEndpoint,
        parameters: &mut ParameterStore,
    ) -> EndpointResult<()> {
        let pending: Vec<String> = parameters.keys().map(str::to_owned).collect();

        for key in pending {
            let Some(value) = parameters.get(&key) else {
                continue;
            };

            match self.property_applier.set_property(endpoint, &key, value) {
                Ok(()) => {
                    parameters.remove(&key);
                }
                Err(EndpointError::Configuration(ConfigurationError::UnknownOption(_)))
                    if self.settings.lenient_properties =>
                {
                    warn!(
                        "[FtpEndpointFactory] Ignoring unknown option '{}' on {}",
                        key,
                        endpoint.configuration().base_uri()
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}
